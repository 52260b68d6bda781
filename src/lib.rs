//! Objectify: gelabelde leden bundelen tot één object, er weer leden uit
//! lezen en leden vervangen, met platte serialisatie voor het hostarchief.
//!
//! De crate valt uiteen in vier lagen:
//!
//! - [`geom`]: geometriewaarden, transformaties en voorvertoningsgroepen;
//! - [`object`]: het ledencontainer-datatype en de hostwrapper;
//! - [`archive`]: platte veldserialisatie en het chunkformaat;
//! - [`components`]: de drie componenten plus hun registry.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod components;
pub mod geom;
pub mod object;

pub use components::{ComponentKind, ComponentRegistry, SlotValue, SolveOutput, SolveState};
pub use object::GeomObject;
pub use object::goo::GeomObjGoo;
