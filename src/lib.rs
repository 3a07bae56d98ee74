//! # foam-sieve
//!
//! foam-sieve reads OpenFOAM polyMesh cases (`points`, `faces`, `owner`,
//! `neighbour`) and assembles them into a face-based grid model. It is meant
//! to sit under a host mesh application: the host supplies a vertex container
//! and a face assembler through the traits in [`io`], and the reader streams
//! points and correctly oriented faces into them.
//!
//! ## Features
//! - Streaming ASCII tokenizer with comment skipping and rewind support
//! - Typed readers for `vectorField`, `faceList` and `labelList` files
//! - Orientation conversion from OpenFOAM's owner/neighbour convention
//! - Progress reporting with cancellation at every point and face
//! - [`topology::poly_mesh::PolyMesh`], a reference grid model with optional
//!   closed-cell validation
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! foam-sieve = "0.3"
//! ```
//!
//! Errors are reported as [`mesh_error::FoamMeshError`]. Progress and
//! diagnostics go through the `log` facade; install any logger to see them.

pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::io::foam::{
        AssemblyState, CaseDir, CaseSource, FoamGridReader, FoamReadOptions, InMemoryCase,
        OPENFOAM_IMPORTER,
    };
    pub use crate::io::progress::{ImportProgress, NoProgress, Progress};
    pub use crate::io::{FaceAssembler, GridModel, VertexSink};
    pub use crate::mesh_error::FoamMeshError;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::face::{AssembledFace, FaceArity, FaceKind, FaceRecord};
    pub use crate::topology::poly_mesh::{PolyMesh, PolyMeshBuilder, PolyMeshOptions};
}
