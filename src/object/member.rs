//! Ladingtypes en de homogene ledenreeks van een object.

use core::fmt;

use crate::geom::{GeometryValue, SpaceMorph, Transform, Vec3};

use super::ObjectError;

/// Beschikbare ladingsoorten binnen een objectlid.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Geometrische lading met het volledige vermogensstel
    /// (transformeren, morphen, dupliceren, bounding box, preview, bake).
    Geometry(GeometryValue),
    /// Een enkele numerieke waarde.
    Number(f64),
    /// Een stuk tekst.
    Text(String),
    /// Een 3D-vector.
    Vector(Vec3),
}

impl Payload {
    /// Geeft de soortnaam terug. Wordt gebruikt in foutmeldingen.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Geometry(_) => PayloadKind::Geometry,
            Self::Number(_) => PayloadKind::Number,
            Self::Text(_) => PayloadKind::Text,
            Self::Vector(_) => PayloadKind::Vector,
        }
    }

    /// Verwacht een `Geometry` en retourneert een verwijzing.
    pub fn expect_geometry(&self) -> Result<&GeometryValue, ObjectError> {
        match self {
            Self::Geometry(value) => Ok(value),
            _ => Err(ObjectError::TypeMismatch {
                expected: PayloadKind::Geometry,
                found: self.kind(),
            }),
        }
    }

    /// Verwacht een `Number` en retourneert de f64-waarde.
    pub fn expect_number(&self) -> Result<f64, ObjectError> {
        match self {
            Self::Number(value) => Ok(*value),
            _ => Err(ObjectError::TypeMismatch {
                expected: PayloadKind::Number,
                found: self.kind(),
            }),
        }
    }

    /// Verwacht een `Text` en retourneert de tekst.
    pub fn expect_text(&self) -> Result<&str, ObjectError> {
        match self {
            Self::Text(value) => Ok(value),
            _ => Err(ObjectError::TypeMismatch {
                expected: PayloadKind::Text,
                found: self.kind(),
            }),
        }
    }

    /// Verwacht een `Vector` en retourneert de componenten.
    pub fn expect_vector(&self) -> Result<Vec3, ObjectError> {
        match self {
            Self::Vector(value) => Ok(*value),
            _ => Err(ObjectError::TypeMismatch {
                expected: PayloadKind::Vector,
                found: self.kind(),
            }),
        }
    }

    /// Pas een affiene transformatie toe. Alleen geometrische lading draagt
    /// dit vermogen; vectorleden zijn rekenwaarden en bewegen niet mee.
    pub fn transformed(&self, xform: &Transform) -> Result<Self, ObjectError> {
        match self {
            Self::Geometry(value) => Ok(Self::Geometry(value.transformed(xform))),
            _ => Err(ObjectError::UnsupportedPayload {
                operation: "transform",
                kind: self.kind(),
            }),
        }
    }

    /// Pas een vrije-vorm morph toe, alleen gedragen door geometrie.
    pub fn morphed(&self, morph: &dyn SpaceMorph) -> Result<Self, ObjectError> {
        match self {
            Self::Geometry(value) => Ok(Self::Geometry(value.morphed(morph))),
            _ => Err(ObjectError::UnsupportedPayload {
                operation: "morph",
                kind: self.kind(),
            }),
        }
    }

    /// Roep het dupliceer-vermogen van geometrische lading aan.
    pub fn duplicated_geometry(&self) -> Result<Self, ObjectError> {
        match self {
            Self::Geometry(value) => Ok(Self::Geometry(value.duplicated())),
            _ => Err(ObjectError::UnsupportedPayload {
                operation: "duplicate",
                kind: self.kind(),
            }),
        }
    }
}

/// Beschrijft het soort lading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Geometry,
    Number,
    Text,
    Vector,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Geometry => "geometry",
            Self::Number => "number",
            Self::Text => "text",
            Self::Vector => "vector",
        };
        f.write_str(name)
    }
}

/// Controleert of een reeks ladingen één soort draagt.
/// Een lege of enkelvoudige reeks geldt als homogeen.
#[must_use]
pub fn all_same_kind(payloads: &[Payload]) -> bool {
    match payloads.split_first() {
        Some((first, rest)) => {
            let kind = first.kind();
            rest.iter().all(|p| p.kind() == kind)
        }
        None => true,
    }
}

/// Een objectlid: niet-lege, homogene reeks ladingen van één soort.
///
/// [`Member::from_payloads`] is de enige schrijfroute en bewaakt beide
/// invarianten, zodat de container zelf dom kan blijven.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    payloads: Vec<Payload>,
}

impl Member {
    /// Valideert en neemt de reeks over.
    ///
    /// # Errors
    /// `EmptyMember` voor een lege reeks, `HeterogeneousMember` wanneer de
    /// reeks ladingsoorten mengt; de reeks wordt dan niet overgenomen.
    pub fn from_payloads(payloads: Vec<Payload>) -> Result<Self, ObjectError> {
        if payloads.is_empty() {
            return Err(ObjectError::EmptyMember);
        }
        if !all_same_kind(&payloads) {
            let first = payloads[0].kind();
            let conflicting = payloads
                .iter()
                .map(Payload::kind)
                .find(|&kind| kind != first)
                .unwrap_or(first);
            return Err(ObjectError::HeterogeneousMember { first, conflicting });
        }
        Ok(Self { payloads })
    }

    /// Lid met precies één lading; per constructie geldig.
    #[must_use]
    pub fn single(payload: Payload) -> Self {
        Self {
            payloads: vec![payload],
        }
    }

    /// De gedeelde soort van alle ladingen.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        self.payloads[0].kind()
    }

    #[must_use]
    pub fn payloads(&self) -> &[Payload] {
        &self.payloads
    }

    /// Aantal ladingen in de reeks; nooit nul.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    #[must_use]
    pub fn into_payloads(self) -> Vec<Payload> {
        self.payloads
    }

    /// Transformeer iedere lading; faalt als de reeks het vermogen mist.
    pub fn transformed(&self, xform: &Transform) -> Result<Self, ObjectError> {
        let payloads = self
            .payloads
            .iter()
            .map(|p| p.transformed(xform))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { payloads })
    }

    /// Morph iedere lading; faalt als de reeks het vermogen mist.
    pub fn morphed(&self, morph: &dyn SpaceMorph) -> Result<Self, ObjectError> {
        let payloads = self
            .payloads
            .iter()
            .map(|p| p.morphed(morph))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { payloads })
    }

    /// Dupliceer iedere lading via het eigen vermogen.
    pub fn duplicated_geometry(&self) -> Result<Self, ObjectError> {
        let payloads = self
            .payloads
            .iter()
            .map(Payload::duplicated_geometry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { payloads })
    }
}
