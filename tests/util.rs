#![allow(dead_code)]
use foam_sieve::io::foam::InMemoryCase;
use foam_sieve::io::{FaceAssembler, GridModel, VertexSink};
use foam_sieve::mesh_error::FoamMeshError;
use foam_sieve::topology::face::AssembledFace;
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

/// Header, count and list body of one OpenFOAM file.
pub fn foam_file(class: &str, object: &str, note: Option<&str>, count: usize, body: &str) -> String {
    let mut text = String::from(
        "/*--------------------------------*- C++ -*----------------------------------*\\\n\
         | =========                 |                                                 |\n\
         \\*---------------------------------------------------------------------------*/\n\
         FoamFile\n{\n    version     2.0;\n    format      ascii;\n",
    );
    writeln!(text, "    class       {class};").unwrap();
    if let Some(note) = note {
        writeln!(text, "    note        \"{note}\";").unwrap();
    }
    writeln!(text, "    location    \"constant/polyMesh\";").unwrap();
    writeln!(text, "    object      {object};\n}}").unwrap();
    text.push_str("// * * * * * * * * * * * * * * * * * * * * * * * * * * //\n\n");
    writeln!(text, "{count}\n(\n{body})\n\n").unwrap();
    text.push_str("// ************************************************************************* //\n");
    text
}

pub fn points_file(points: &[[f64; 3]]) -> String {
    let body: String = points
        .iter()
        .map(|[x, y, z]| format!("({x} {y} {z})\n"))
        .collect();
    foam_file("vectorField", "points", None, points.len(), &body)
}

pub fn faces_file(faces: &[&[u32]]) -> String {
    let mut body = String::new();
    for face in faces {
        let list: Vec<String> = face.iter().map(u32::to_string).collect();
        writeln!(body, "{}({})", face.len(), list.join(" ")).unwrap();
    }
    foam_file("faceList", "faces", None, faces.len(), &body)
}

pub fn labels_file(object: &str, labels: &[u32], note: Option<&str>) -> String {
    let body: String = labels.iter().map(|l| format!("{l}\n")).collect();
    foam_file("labelList", object, note, labels.len(), &body)
}

/// The four files of a case as text.
#[derive(Clone, Debug)]
pub struct CaseText {
    pub points: String,
    pub faces: String,
    pub owner: String,
    pub neighbour: String,
}

impl CaseText {
    pub fn new(
        points: &[[f64; 3]],
        faces: &[&[u32]],
        owner: &[u32],
        neighbour: &[u32],
    ) -> Self {
        Self {
            points: points_file(points),
            faces: faces_file(faces),
            owner: labels_file("owner", owner, None),
            neighbour: labels_file("neighbour", neighbour, None),
        }
    }

    pub fn case(&self) -> InMemoryCase<'_> {
        InMemoryCase::new(&self.points, &self.faces, &self.owner, &self.neighbour)
    }
}

pub fn unit_cube_points() -> Vec<[f64; 3]> {
    vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ]
}

/// Cube faces with outward normals, as OpenFOAM writes them.
pub const CUBE_FACES: [&[u32]; 6] = [
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
];

/// A single hexahedron, all faces on the boundary.
pub fn unit_cube() -> CaseText {
    CaseText::new(&unit_cube_points(), &CUBE_FACES, &[0; 6], &[])
}

/// Two hexahedra side by side along x, sharing the face at x = 1.
pub fn two_hexes() -> CaseText {
    let mut points = unit_cube_points();
    points.extend([[2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [2.0, 1.0, 1.0], [2.0, 0.0, 1.0]]);
    let faces: [&[u32]; 11] = [
        &[1, 2, 6, 5],
        &[0, 3, 2, 1],
        &[4, 5, 6, 7],
        &[0, 1, 5, 4],
        &[3, 7, 6, 2],
        &[0, 4, 7, 3],
        &[1, 2, 9, 8],
        &[5, 11, 10, 6],
        &[1, 8, 11, 5],
        &[2, 6, 10, 9],
        &[8, 9, 10, 11],
    ];
    CaseText::new(
        &points,
        &faces,
        &[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
        &[1],
    )
}

/// Everything a [`RecordingModel`] saw.
#[derive(Debug, Default)]
pub struct Recording {
    pub allocated: Option<usize>,
    pub points: Vec<[f64; 3]>,
    pub faces: Vec<AssembledFace>,
    pub cell_hint: Option<usize>,
    pub finalized: usize,
}

/// A grid model that only records calls. The recording is shared so it
/// survives a failed import.
#[derive(Clone, Debug, Default)]
pub struct RecordingModel {
    pub log: Rc<RefCell<Recording>>,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VertexSink for RecordingModel {
    fn allocate(&mut self, count: usize) -> Result<(), FoamMeshError> {
        let mut log = self.log.borrow_mut();
        log.allocated = Some(count);
        log.points = Vec::with_capacity(count);
        Ok(())
    }

    fn set_xyz(&mut self, index: usize, xyz: [f64; 3]) -> Result<(), FoamMeshError> {
        let mut log = self.log.borrow_mut();
        assert_eq!(index, log.points.len(), "points must arrive in order");
        log.points.push(xyz);
        Ok(())
    }
}

impl GridModel for RecordingModel {
    type Assembler = RecordingModel;

    fn into_assembler(self) -> Result<Self, FoamMeshError> {
        Ok(self)
    }
}

impl FaceAssembler for RecordingModel {
    type Mesh = usize;

    fn push_face(&mut self, face: &AssembledFace) -> Result<(), FoamMeshError> {
        self.log.borrow_mut().faces.push(*face);
        Ok(())
    }

    fn reserve_cells(&mut self, num_cells: usize) {
        self.log.borrow_mut().cell_hint = Some(num_cells);
    }

    /// Returns the number of faces received.
    fn finalize(self) -> Result<usize, FoamMeshError> {
        let mut log = self.log.borrow_mut();
        log.finalized += 1;
        Ok(log.faces.len())
    }
}
