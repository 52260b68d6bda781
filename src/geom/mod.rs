mod core;
mod morph;
mod preview;
mod value;

pub use core::{BBox, Point3, Transform, Vec3};
pub use morph::{SpaceMorph, TaperMorph, TwistMorph};
pub use preview::{PreviewMesh, PreviewWire, collect_meshes, collect_wires};
pub use value::GeometryValue;
