//! Importer descriptor advertised to a host application.

use crate::io::foam::case::PolyMeshFile;
use crate::topology::cell_type::CellType;
use itertools::Itertools;

/// What an importer can read and which files it expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImporterCapabilities {
    pub name: &'static str,
    pub elements: &'static [CellType],
    pub files: &'static [PolyMeshFile],
}

/// The OpenFOAM polyMesh importer.
pub const OPENFOAM_IMPORTER: ImporterCapabilities = ImporterCapabilities {
    name: "OpenFOAM",
    elements: &[
        CellType::Bar,
        CellType::Triangle,
        CellType::Quadrilateral,
        CellType::Tetrahedron,
        CellType::Pyramid,
        CellType::Prism,
        CellType::Hexahedron,
    ],
    files: &[
        PolyMeshFile::Faces,
        PolyMeshFile::Owner,
        PolyMeshFile::Neighbour,
        PolyMeshFile::Points,
    ],
};

impl ImporterCapabilities {
    /// Element names joined with `|`, e.g. `Bar|Tri|Quad`.
    pub fn valid_elements_enum(&self) -> String {
        self.elements.iter().map(|e| e.token()).join("|")
    }

    /// Space-separated file names the importer expects.
    pub fn file_filters(&self) -> String {
        self.files.iter().map(|f| f.file_name()).join(" ")
    }

    /// True when `file_name` (a bare name or a path) is one of the expected
    /// files.
    pub fn accepts(&self, file_name: &str) -> bool {
        let base = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name);
        self.files.iter().any(|f| f.file_name() == base)
    }
}
