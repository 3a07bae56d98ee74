//! OpenFOAM polyMesh reader.
//!
//! A polyMesh case is four ASCII files under `constant/polyMesh`:
//!
//! - `points` (`vectorField`): vertex coordinates `(x y z)`.
//! - `faces` (`faceList`): `n(v0 .. vn-1)` vertex loops, interior faces first.
//! - `owner` (`labelList`): one cell label per face.
//! - `neighbour` (`labelList`): one cell label per interior face.
//!
//! Each file starts with a `FoamFile { key value; ... }` header followed by
//! `count ( ... )`. C and C++ comments may appear anywhere between tokens.
//! Only triangles and quads are supported; binary files are rejected.
//!
//! ```no_run
//! use foam_sieve::io::foam::{CaseDir, FoamGridReader};
//! use foam_sieve::io::progress::NoProgress;
//! use foam_sieve::topology::poly_mesh::PolyMeshBuilder;
//!
//! let mut reader = FoamGridReader::new(CaseDir::new("cavity/constant/polyMesh"));
//! let mesh = reader.read(PolyMeshBuilder::new(), &mut NoProgress)?;
//! println!("{} cells", mesh.num_cells());
//! # Ok::<(), foam_sieve::mesh_error::FoamMeshError>(())
//! ```

pub mod case;
pub mod face_list;
pub mod file;
pub mod grid;
pub mod header;
pub mod importer;
pub mod label_list;
pub mod tokenizer;
pub mod vector_field;

pub use case::{CaseDir, CaseSource, InMemoryCase, PolyMeshFile};
pub use face_list::FaceListFile;
pub use file::{FoamFile, FoamFileKind};
pub use grid::{AssemblyState, FoamGridReader, FoamReadOptions, orient_interior};
pub use header::{FoamHeader, MeshNote};
pub use importer::{ImporterCapabilities, OPENFOAM_IMPORTER};
pub use label_list::LabelListFile;
pub use tokenizer::{FoamTokenizer, StreamMark};
pub use vector_field::VectorFieldFile;
