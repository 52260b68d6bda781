//! Preview-uitvoer voor de viewport van de gastheer.
//!
//! De gastheer tekent in twee passen: gearceerde vlakken en draadwerk. Uit
//! een geometriewaarde worden daarom twee lijsten getrokken; meshes voeden de
//! eerste pas, punten en lijnwerk de tweede.

use super::core::Point3;
use super::value::GeometryValue;

/// Driehoeksnet klaar voor de gearceerde tekenpas.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewMesh {
    pub vertices: Vec<Point3>,
    pub faces: Vec<[u32; 3]>,
}

/// Eén element draadwerk.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewWire {
    Point(Point3),
    Line { p1: Point3, p2: Point3 },
    Polyline(Vec<Point3>),
}

/// Verzamel alle meshes uit een geometrieboom, groepen inbegrepen.
pub fn collect_meshes(value: &GeometryValue, out: &mut Vec<PreviewMesh>) {
    match value {
        GeometryValue::Mesh { vertices, faces } => out.push(PreviewMesh {
            vertices: vertices.clone(),
            faces: faces.clone(),
        }),
        GeometryValue::Group(items) => {
            for item in items {
                collect_meshes(item, out);
            }
        }
        GeometryValue::Point(_) | GeometryValue::Line { .. } | GeometryValue::Polyline(_) => {}
    }
}

/// Verzamel al het draadwerk uit een geometrieboom, groepen inbegrepen.
pub fn collect_wires(value: &GeometryValue, out: &mut Vec<PreviewWire>) {
    match value {
        GeometryValue::Point(p) => out.push(PreviewWire::Point(*p)),
        GeometryValue::Line { p1, p2 } => out.push(PreviewWire::Line { p1: *p1, p2: *p2 }),
        GeometryValue::Polyline(points) => out.push(PreviewWire::Polyline(points.clone())),
        GeometryValue::Group(items) => {
            for item in items {
                collect_wires(item, out);
            }
        }
        GeometryValue::Mesh { .. } => {}
    }
}
