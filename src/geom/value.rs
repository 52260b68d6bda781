//! De gesloten verzameling geometrietypes die een objectlid kan dragen.
//!
//! Objectleden behandelen geometrie als ondoorzichtige lading met een vast
//! stel vermogens: transformeren, morphen, dupliceren, bounding box, preview
//! en bake. Alles daarbuiten blijft bij de geometriekern zelf.

use serde::{Deserialize, Serialize};

use super::core::{BBox, Point3, Transform};
use super::morph::SpaceMorph;

/// Eén geometrische waarde. Groepen zijn nestbaar en vormen de gefilterde
/// weergaven van een object (groep van subgroepen per lid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeometryValue {
    Point(Point3),
    Line { p1: Point3, p2: Point3 },
    Polyline(Vec<Point3>),
    Mesh { vertices: Vec<Point3>, faces: Vec<[u32; 3]> },
    Group(Vec<GeometryValue>),
}

impl GeometryValue {
    /// Lege groep, het neutrale resultaat van een filter zonder treffers.
    #[must_use]
    pub const fn empty_group() -> Self {
        Self::Group(Vec::new())
    }

    /// Naam van de variant voor diagnostiek.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Line { .. } => "line",
            Self::Polyline(_) => "polyline",
            Self::Mesh { .. } => "mesh",
            Self::Group(_) => "group",
        }
    }

    /// Aantal directe elementen; alleen groepen tellen hun kinderen.
    #[must_use]
    pub fn group_len(&self) -> usize {
        match self {
            Self::Group(items) => items.len(),
            _ => 1,
        }
    }

    /// `true` voor een groep zonder inhoud.
    #[must_use]
    pub fn is_empty_group(&self) -> bool {
        matches!(self, Self::Group(items) if items.is_empty())
    }

    /// Beeld ieder punt af; de structuur blijft staan.
    fn map_points(&self, f: &impl Fn(Point3) -> Point3) -> Self {
        match self {
            Self::Point(p) => Self::Point(f(*p)),
            Self::Line { p1, p2 } => Self::Line { p1: f(*p1), p2: f(*p2) },
            Self::Polyline(points) => Self::Polyline(points.iter().map(|&p| f(p)).collect()),
            Self::Mesh { vertices, faces } => Self::Mesh {
                vertices: vertices.iter().map(|&v| f(v)).collect(),
                faces: faces.clone(),
            },
            Self::Group(items) => Self::Group(items.iter().map(|g| g.map_points(f)).collect()),
        }
    }

    /// Pas een affiene transformatie toe op alle punten.
    #[must_use]
    pub fn transformed(&self, xform: &Transform) -> Self {
        self.map_points(&|p| xform.apply_point(p))
    }

    /// Pas een vrije-vorm morph toe op alle punten.
    #[must_use]
    pub fn morphed(&self, morph: &dyn SpaceMorph) -> Self {
        self.map_points(&|p| morph.morph_point(p))
    }

    /// Expliciet diepe kopie, het dupliceer-vermogen van de lading.
    /// Gelijk aan `clone`, maar onder de naam die het contract draagt.
    #[must_use]
    pub fn duplicated(&self) -> Self {
        self.clone()
    }

    /// Kleinste omsluitende doos, `None` voor lege inhoud.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BBox> {
        match self {
            Self::Point(p) => Some(BBox::new(*p, *p)),
            Self::Line { p1, p2 } => Some(BBox::new(*p1, *p1).expand_point(*p2)),
            Self::Polyline(points) => BBox::from_points(points),
            Self::Mesh { vertices, .. } => BBox::from_points(vertices),
            Self::Group(items) => {
                let mut boxes = items.iter().filter_map(Self::bounding_box);
                let first = boxes.next()?;
                Some(boxes.fold(first, BBox::union))
            }
        }
    }
}
