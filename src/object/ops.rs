//! Structurele bewerkingen over alle geometriedragende leden.
//!
//! Iedere bewerking levert een nieuw object op en publiceert pas bij succes;
//! het bronobject blijft bij een fout onaangeroerd. Dit is de enige
//! gesanctioneerde manier om de levensduur van een object te vertakken:
//! reeksen worden nooit gedeeld tussen twee objecten.

use crate::geom::{SpaceMorph, Transform};

use super::member::{Member, PayloadKind};
use super::{GeomObject, ObjectError};

impl GeomObject {
    /// Diepe kopie. Niet-geometrische leden en beide vlagkaarten gaan altijd
    /// mee; geometrieleden alleen wanneer `include_geometry` waar is. De
    /// vlagkaarten worden integraal gekopieerd, ook voor achtergebleven
    /// geometriesleutels.
    #[must_use]
    pub fn fresh(&self, include_geometry: bool) -> Self {
        let mut out = Self::with_name(self.name.clone());
        for (key, member) in self.iter() {
            if !include_geometry && member.kind() == PayloadKind::Geometry {
                continue;
            }
            out.insert_member_raw(key, member.clone());
        }
        out.visibility = self.visibility.clone();
        out.bakability = self.bakability.clone();
        out
    }

    /// Pas een affiene transformatie toe op alle geometrieleden.
    ///
    /// # Errors
    /// `UnsupportedPayload` wanneer een reeks het vermogen mist; er wordt
    /// dan niets gepubliceerd.
    pub fn transformed(&self, xform: &Transform) -> Result<Self, ObjectError> {
        self.map_geometry_members(|member| member.transformed(xform))
    }

    /// Pas een vrije-vorm morph toe op alle geometrieleden.
    ///
    /// # Errors
    /// `UnsupportedPayload` wanneer een reeks het vermogen mist.
    pub fn morphed(&self, morph: &dyn SpaceMorph) -> Result<Self, ObjectError> {
        self.map_geometry_members(|member| member.morphed(morph))
    }

    /// Dupliceer alle geometrieleden via hun eigen vermogen; gebruikt om
    /// deling te breken voordat een kopie gemuteerd wordt.
    ///
    /// # Errors
    /// `UnsupportedPayload` wanneer een reeks het vermogen mist.
    pub fn duplicated_geometry(&self) -> Result<Self, ObjectError> {
        self.map_geometry_members(Member::duplicated_geometry)
    }

    /// De ene bezoeker achter alle structurele bewerkingen: geometrieleden
    /// worden afgebeeld, overige leden gekopieerd. Volgorde en vlaggen
    /// blijven staan.
    fn map_geometry_members(
        &self,
        mut op: impl FnMut(&Member) -> Result<Member, ObjectError>,
    ) -> Result<Self, ObjectError> {
        let mut out = Self::with_name(self.name.clone());
        for (key, member) in self.iter() {
            let mapped = if member.kind() == PayloadKind::Geometry {
                op(member)?
            } else {
                member.clone()
            };
            out.insert_member_raw(key, mapped);
        }
        out.visibility = self.visibility.clone();
        out.bakability = self.bakability.clone();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{GeometryValue, Point3, TwistMorph, Vec3};
    use crate::object::member::Payload;

    fn sample_object() -> GeomObject {
        let mut obj = GeomObject::with_name("Huis");
        obj.insert_member(
            "dak",
            Member::single(Payload::Geometry(GeometryValue::Point(Point3::new(
                1.0, 0.0, 0.0,
            )))),
            true,
            true,
        );
        obj.insert_member(
            "hoogte",
            Member::single(Payload::Number(12.5)),
            true,
            false,
        );
        obj.insert_member(
            "muur",
            Member::single(Payload::Geometry(GeometryValue::Line {
                p1: Point3::ORIGIN,
                p2: Point3::new(0.0, 0.0, 2.0),
            })),
            false,
            true,
        );
        obj
    }

    #[test]
    fn fresh_without_geometry_drops_geometry_members() {
        let obj = sample_object();
        let copy = obj.fresh(false);
        assert!(!copy.has_member("dak"));
        assert!(!copy.has_member("muur"));
        assert!(copy.has_member("hoogte"));
        // De vlagkaarten gaan integraal mee, ook voor gesneuvelde sleutels.
        assert_eq!(copy.is_visible("dak"), Some(true));
        assert_eq!(copy.is_bakable("muur"), Some(true));
        assert_eq!(copy.name, "Huis");
    }

    #[test]
    fn fresh_copy_is_independent() {
        let obj = sample_object();
        let mut copy = obj.fresh(true);
        copy.remove_member("dak");
        copy.insert_member("extra", Member::single(Payload::Number(1.0)), true, true);
        assert!(obj.has_member("dak"));
        assert!(!obj.has_member("extra"));
        assert_eq!(obj.to_string(), "Huis object with 3 members:{dak, hoogte, muur}");
    }

    #[test]
    fn transform_moves_geometry_and_keeps_scalars() {
        let obj = sample_object();
        let moved = obj
            .transformed(&Transform::translate(Vec3::new(0.0, 0.0, 1.0)))
            .unwrap();

        assert_eq!(moved.member("hoogte"), obj.member("hoogte"));
        assert_eq!(
            moved.member("dak").unwrap().payloads()[0],
            Payload::Geometry(GeometryValue::Point(Point3::new(1.0, 0.0, 1.0)))
        );
        // Volgorde en vlaggen blijven staan.
        let keys: Vec<_> = moved.keys().collect();
        assert_eq!(keys, ["dak", "hoogte", "muur"]);
        assert_eq!(moved.is_visible("muur"), Some(false));
    }

    #[test]
    fn transform_preserves_payload_counts() {
        let mut obj = GeomObject::new();
        let paar = Member::from_payloads(vec![
            Payload::Geometry(GeometryValue::Point(Point3::ORIGIN)),
            Payload::Geometry(GeometryValue::Point(Point3::new(1.0, 1.0, 1.0))),
        ])
        .unwrap();
        obj.insert_member("paar", paar, true, true);
        let moved = obj.transformed(&Transform::uniform_scale(2.0)).unwrap();
        assert_eq!(moved.member("paar").unwrap().payloads().len(), 2);
    }

    #[test]
    fn morph_runs_over_geometry_members() {
        let obj = sample_object();
        let twist = TwistMorph::new(Point3::ORIGIN, Vec3::Z, std::f64::consts::PI)
            .expect("geldige as");
        let morphed = obj.morphed(&twist).unwrap();
        // Punten op de as blijven staan; het getallenlid blijft gelijk.
        assert_eq!(morphed.member("hoogte"), obj.member("hoogte"));
        assert_eq!(morphed.count(), 3);
    }

    #[test]
    fn duplicate_geometry_keeps_content_equal() {
        let obj = sample_object();
        let copy = obj.duplicated_geometry().unwrap();
        assert_eq!(copy, obj);
    }
}
