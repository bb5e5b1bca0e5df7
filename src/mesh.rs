//! Triangle meshes and the line-oriented text format they are loaded from.
//!
//! The format is a small subset of Wavefront OBJ:
//!
//! ```text
//! v 0.0 1.0 0.5
//! v 1.0 0.0 0.5
//! v 0.0 0.0 0.5
//! f 1 2 3
//! ```
//!
//! `v` lines carry three coordinates, `f` lines carry three 1-based indices
//! into the vertices read so far. Anything else is skipped.
//!
//! Parsing is permissive about numbers: a malformed coordinate or index is
//! logged and replaced with zero. It is strict about structure: a face that
//! references a vertex outside the pool fails with [`MeshError::IndexOutOfRange`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::math::Vec3;

const VERTEX_MARKER: &str = "v";
const FACE_MARKER: &str = "f";

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to read mesh file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: face index {index} is outside the vertex pool (1..={vertex_count})")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        vertex_count: usize,
    },
    #[error("line {line}: face needs three vertex indices")]
    MissingIndex { line: usize },
}

/// Three vertices held by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
}

impl Triangle {
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { points: [a, b, c] }
    }
}

/// Counters describing what the parser had to tolerate while loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Coordinate or index tokens that were malformed or missing and read as zero.
    pub substituted_tokens: usize,
    /// Vertex lines that followed the first face and were not added to the pool.
    pub late_vertices: usize,
    pub vertex_count: usize,
}

/// An ordered, read-only list of triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Reads and parses a mesh file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| MeshError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (mesh, report) = parse(&source)?;
        log::info!(
            "loaded {}: {} vertices, {} triangles",
            path.display(),
            report.vertex_count,
            mesh.len()
        );
        if report.substituted_tokens > 0 {
            log::warn!(
                "{}: {} malformed tokens were read as zero",
                path.display(),
                report.substituted_tokens
            );
        }
        Ok(mesh)
    }

    /// Parses mesh source text, discarding the [`LoadReport`].
    pub fn from_source(source: &str) -> Result<Self, MeshError> {
        parse(source).map(|(mesh, _)| mesh)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Parses mesh source text into triangles.
pub fn parse(source: &str) -> Result<(Mesh, LoadReport), MeshError> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut triangles = Vec::new();
    let mut report = LoadReport::default();

    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let mut tokens = line.split_whitespace();
        let marker = match tokens.next() {
            Some(marker) if !marker.starts_with('#') => marker,
            _ => continue,
        };

        match marker {
            VERTEX_MARKER => {
                if !triangles.is_empty() {
                    log::warn!("line {line_no}: vertex after the first face ignored");
                    report.late_vertices += 1;
                    continue;
                }
                let mut coord = || parse_coordinate(tokens.next(), line_no, &mut report);
                let x = coord();
                let y = coord();
                let z = coord();
                vertices.push(Vec3::new(x, y, z));
            }
            FACE_MARKER => {
                let mut corner = || -> Result<Vec3, MeshError> {
                    let token = tokens.next().ok_or(MeshError::MissingIndex { line: line_no })?;
                    let index = parse_index(token, line_no, &mut report);
                    resolve(&vertices, index, line_no)
                };
                let a = corner()?;
                let b = corner()?;
                let c = corner()?;
                triangles.push(Triangle::new(a, b, c));
            }
            other => log::debug!("line {line_no}: skipping unsupported marker {other:?}"),
        }
    }

    report.vertex_count = vertices.len();
    Ok((Mesh::new(triangles), report))
}

fn parse_coordinate(token: Option<&str>, line: usize, report: &mut LoadReport) -> f32 {
    match token.map(str::parse::<f32>) {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            log::warn!("line {line}: bad coordinate {:?} ({err}), using 0", token.unwrap_or_default());
            report.substituted_tokens += 1;
            0.0
        }
        None => {
            log::warn!("line {line}: missing coordinate, using 0");
            report.substituted_tokens += 1;
            0.0
        }
    }
}

fn parse_index(token: &str, line: usize, report: &mut LoadReport) -> i64 {
    // `i/j/k` style faces: only the position index matters.
    let position = token.split('/').next().unwrap_or(token);
    match position.parse::<i64>() {
        Ok(index) => index,
        Err(err) => {
            log::warn!("line {line}: bad face index {token:?} ({err}), using 0");
            report.substituted_tokens += 1;
            0
        }
    }
}

fn resolve(vertices: &[Vec3], index: i64, line: usize) -> Result<Vec3, MeshError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| vertices.get(i).copied())
        .ok_or(MeshError::IndexOutOfRange {
            line,
            index,
            vertex_count: vertices.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 3 4
";

    #[test]
    fn parses_vertices_and_faces_by_value() {
        let (mesh, report) = parse(QUAD).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(report.vertex_count, 4);
        assert_eq!(report.substituted_tokens, 0);
        assert_eq!(
            mesh.triangles()[1],
            Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
        );
    }

    #[test]
    fn malformed_coordinate_becomes_zero() {
        let (mesh, report) = parse("v 1.5 oops 2\nv 0 0 0\nv 1 1 1\nf 1 2 3\n").unwrap();
        assert_eq!(report.substituted_tokens, 1);
        let first = mesh.triangles()[0].points[0];
        assert_relative_eq!(first.x, 1.5);
        assert_relative_eq!(first.y, 0.0);
        assert_relative_eq!(first.z, 2.0);
    }

    #[test]
    fn missing_coordinate_becomes_zero() {
        let (mesh, report) = parse("v 1 2\nv 0 0 0\nv 1 1 1\nf 1 2 3\n").unwrap();
        assert_eq!(report.substituted_tokens, 1);
        assert_eq!(mesh.triangles()[0].points[0], Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn face_index_out_of_range_is_an_error() {
        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        match err {
            MeshError::IndexOutOfRange {
                line,
                index,
                vertex_count,
            } => {
                assert_eq!(line, 3);
                assert_eq!(index, 3);
                assert_eq!(vertex_count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_index_reads_as_zero_and_fails_integrity() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 x 3\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn short_face_line_is_an_error() {
        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::MissingIndex { line: 3 }));
    }

    #[test]
    fn slash_separated_indices_use_position() {
        let (mesh, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2/2/2 3//3\n").unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles()[0].points[2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn unsupported_markers_and_blank_lines_are_skipped() {
        let src = "\nvn 0 0 1\nvt 0 0\ng group\nv 0 0 0\nv 1 0 0\nv 0 1 0\n\nf 1 2 3\n";
        let (mesh, report) = parse(src).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(report.vertex_count, 3);
    }

    #[test]
    fn vertices_after_faces_are_ignored() {
        let (_, report) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nv 5 5 5\n").unwrap();
        assert_eq!(report.vertex_count, 3);
        assert_eq!(report.late_vertices, 1);
    }

    #[test]
    fn empty_source_gives_empty_mesh() {
        let mesh = Mesh::from_source("").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = Mesh::load("definitely/not/a/mesh.obj").unwrap_err();
        assert!(matches!(err, MeshError::Io { .. }));
    }
}
