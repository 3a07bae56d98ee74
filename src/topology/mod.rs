//! Mesh topology produced by imports.
//!
//! - [`face`]: triangle and quad records and their orientation helpers
//! - [`cell_type`]: element classification
//! - [`poly_mesh`]: the in-crate face-based grid model

pub mod cell_type;
pub mod face;
pub mod poly_mesh;

pub use cell_type::CellType;
pub use face::{AssembledFace, FaceArity, FaceKind, FaceRecord};
