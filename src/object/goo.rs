//! Hostwaarde-adapter rond [`GeomObject`] plus een minimaal bakdoel.
//!
//! De adapter bezit zijn object en vertaalt de hostcontracten naar de
//! gefilterde weergaven: bounding box en bake lopen over de bakbare
//! weergave, de twee tekenpassen over de zichtbare weergave, en de
//! groepscast over de doorsnede van beide.

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::archive::{self, ArchiveResult};
use crate::geom::{
    collect_meshes, collect_wires, BBox, GeometryValue, PreviewMesh, PreviewWire, SpaceMorph,
    Transform,
};

use super::filter::GeometryFilter;
use super::{GeomObject, ObjectError};

/// Typenaam waaronder de adapter zich bij de host meldt.
pub const TYPE_NAME: &str = "Geometry Object";
/// Omschrijving voor de host.
pub const TYPE_DESCRIPTION: &str = "This is the Main data type used by the Objectify Component.";

/// Waardeadapter die een [`GeomObject`] in de hostcontracten laat meedoen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomObjGoo {
    value: GeomObject,
}

impl GeomObjGoo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self) -> &GeomObject {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> GeomObject {
        self.value
    }

    /// Geldig zodra het object minstens één lid draagt.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.value.is_empty()
    }

    /// Bounding box over de bakbare weergave; `None` zonder bakbare
    /// geometrie.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BBox> {
        self.value
            .geometry_group(GeometryFilter::Bakable)
            .bounding_box()
    }

    /// Bounding box van de getransformeerde bakbare weergave.
    #[must_use]
    pub fn bounding_box_transformed(&self, xform: &Transform) -> Option<BBox> {
        self.value
            .geometry_group(GeometryFilter::Bakable)
            .transformed(xform)
            .bounding_box()
    }

    /// Clipbox voor de tekenpassen, gelijk aan de bounding box.
    #[must_use]
    pub fn clipping_box(&self) -> Option<BBox> {
        self.bounding_box()
    }

    /// # Errors
    /// `UnsupportedPayload` wanneer een geometrielid de bewerking mist.
    pub fn transformed(&self, xform: &Transform) -> Result<Self, ObjectError> {
        self.value.transformed(xform).map(Self::from)
    }

    /// # Errors
    /// `UnsupportedPayload` wanneer een geometrielid de bewerking mist.
    pub fn morphed(&self, morph: &dyn SpaceMorph) -> Result<Self, ObjectError> {
        self.value.morphed(morph).map(Self::from)
    }

    /// # Errors
    /// `UnsupportedPayload` wanneer een geometrielid de bewerking mist.
    pub fn duplicated(&self) -> Result<Self, ObjectError> {
        self.value.duplicated_geometry().map(Self::from)
    }

    /// Schaduwpas van de preview: alle meshes uit de zichtbare weergave.
    #[must_use]
    pub fn preview_meshes(&self) -> Vec<PreviewMesh> {
        let group = self.value.geometry_group(GeometryFilter::Visible);
        let mut out = Vec::new();
        collect_meshes(&group, &mut out);
        out
    }

    /// Draadpas van de preview: punten, lijnen en polylijnen uit de
    /// zichtbare weergave.
    #[must_use]
    pub fn preview_wires(&self) -> Vec<PreviewWire> {
        let group = self.value.geometry_group(GeometryFilter::Visible);
        let mut out = Vec::new();
        collect_wires(&group, &mut out);
        out
    }

    /// Cast naar een geometriegroep: de doorsnede van zichtbaar en bakbaar.
    #[must_use]
    pub fn cast_to_group(&self) -> GeometryValue {
        self.value.geometry_group(GeometryFilter::VisibleAndBakable)
    }

    /// Cast naar de platte sleutel→tekst afbeelding.
    ///
    /// # Errors
    /// Zie [`archive::to_flat_fields`].
    pub fn cast_to_fields(&self) -> ArchiveResult<BTreeMap<String, String>> {
        archive::to_flat_fields(&self.value)
    }

    /// Bakt de bakbare weergave als één documentobject. `None` wanneer die
    /// weergave leeg is; anders de identiteit van het nieuwe object.
    pub fn bake(&self, doc: &mut Document, attributes: &ObjectAttributes) -> Option<Uuid> {
        let group = self.value.geometry_group(GeometryFilter::Bakable);
        if group.is_empty_group() {
            return None;
        }
        Some(doc.add(group, attributes.clone()))
    }
}

impl From<GeomObject> for GeomObjGoo {
    fn from(value: GeomObject) -> Self {
        Self { value }
    }
}

impl fmt::Display for GeomObjGoo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Minimaal documentmodel waarin gebakken geometrie landt.
#[derive(Debug, Default)]
pub struct Document {
    objects: Vec<DocObject>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn objects(&self) -> &[DocObject] {
        &self.objects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn add(&mut self, geometry: GeometryValue, attributes: ObjectAttributes) -> Uuid {
        let id = Uuid::new_v4();
        self.objects.push(DocObject {
            id,
            geometry,
            attributes,
        });
        id
    }
}

/// Eén gebakken object in het document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocObject {
    pub id: Uuid,
    pub geometry: GeometryValue,
    pub attributes: ObjectAttributes,
}

/// Attributen die de host aan een gebakken object meegeeft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectAttributes {
    pub name: Option<String>,
    pub layer_index: u32,
}
