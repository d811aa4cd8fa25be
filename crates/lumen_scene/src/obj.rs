//! Minimal line-oriented Wavefront OBJ loading.
//!
//! # Supported Syntax
//!
//! - `v x y z` - vertex position
//! - `f a b c` - triangular face, 1-based vertex indices
//! - `s n` - shading group (0 = flat, nonzero = smooth)
//!
//! Every other directive (`vt`, `vn`, `g`, comments, ...) is ignored.
//! Extended face syntax like `v/vt/vn` and non-triangular faces are not
//! supported; the latter are rejected rather than misread.

use std::io;
use std::str::FromStr;

use lumen_math::Vec3;
use thiserror::Error;

use crate::mesh::{Mesh, Shading};

/// Abstract file access, the loader's only side-effecting collaborator.
/// Hosts provide the implementation; [`DiskLoader`] covers the common
/// case of reading from the local filesystem.
pub trait FileLoader {
    fn read_file(&mut self, path: &str) -> io::Result<Vec<u8>>;
}

/// [`FileLoader`] over `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskLoader;

impl FileLoader for DiskLoader {
    fn read_file(&mut self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Errors surfaced while loading a mesh.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(#[from] io::Error),

    #[error("bad mesh input at line {line}: {message}")]
    BadMeshInput { line: usize, message: String },
}

impl LoadError {
    fn bad_input(line: usize, message: impl Into<String>) -> Self {
        LoadError::BadMeshInput {
            line,
            message: message.into(),
        }
    }
}

/// Read and parse an OBJ file into a mesh with its BVH built.
///
/// The mesh comes back with default placement (origin, unit scale); set
/// `position`/`scale`/angles afterwards.
pub fn load_mesh(io: &mut dyn FileLoader, path: &str) -> Result<Mesh, LoadError> {
    let data = io.read_file(path)?;
    let text = std::str::from_utf8(&data)
        .map_err(|e| LoadError::bad_input(0, format!("not valid UTF-8: {e}")))?;
    parse_obj(text)
}

/// Parse OBJ text into a mesh and build its BVH.
pub fn parse_obj(text: &str) -> Result<Mesh, LoadError> {
    let mut mesh = Mesh::default();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw_line.trim_end().split(' ');

        match tokens.next() {
            Some("v") => {
                let x = parse_float(tokens.next(), line)?;
                let y = parse_float(tokens.next(), line)?;
                let z = parse_float(tokens.next(), line)?;
                mesh.vertices.push(Vec3::new(x, y, z));
            }
            Some("f") => {
                let a = parse_index(tokens.next(), line, mesh.vertices.len())?;
                let b = parse_index(tokens.next(), line, mesh.vertices.len())?;
                let c = parse_index(tokens.next(), line, mesh.vertices.len())?;
                if let Some(extra) = tokens.find(|t| !t.is_empty()) {
                    return Err(LoadError::bad_input(
                        line,
                        format!("only triangular faces are supported, got extra index {extra:?}"),
                    ));
                }
                mesh.faces.push([a, b, c]);
            }
            Some("s") => {
                let group: u32 = parse_number(tokens.next(), line)?;
                mesh.shading = if group == 0 {
                    Shading::Flat
                } else {
                    Shading::Smooth
                };
            }
            _ => {}
        }
    }

    log::info!(
        "parsed OBJ mesh: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );

    mesh.compute_bvh();
    Ok(mesh)
}

fn parse_number<T: FromStr>(token: Option<&str>, line: usize) -> Result<T, LoadError>
where
    T::Err: std::fmt::Display,
{
    let token = token.ok_or_else(|| LoadError::bad_input(line, "missing field"))?;
    token
        .parse()
        .map_err(|e| LoadError::bad_input(line, format!("malformed field {token:?}: {e}")))
}

fn parse_float(token: Option<&str>, line: usize) -> Result<f32, LoadError> {
    parse_number(token, line)
}

/// Parse a 1-based vertex index into its 0-based form, checked against
/// the vertices seen so far.
fn parse_index(token: Option<&str>, line: usize, vertex_count: usize) -> Result<u32, LoadError> {
    let index: u32 = parse_number(token, line)?;
    if index == 0 {
        return Err(LoadError::bad_input(line, "face indices are 1-based"));
    }
    if index as usize > vertex_count {
        return Err(LoadError::bad_input(
            line,
            format!("face references vertex {index} of {vertex_count}"),
        ));
    }
    Ok(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRAHEDRON: &str = "\
# a tetrahedron
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
s 1
f 1 2 3
f 1 2 4
f 1 3 4
f 2 3 4
";

    #[test]
    fn test_parse_tetrahedron() {
        let mesh = parse_obj(TETRAHEDRON).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 4);
        assert_eq!(mesh.shading, Shading::Smooth);
        assert!(mesh.bvh.is_some());

        // Indices were converted to 0-based
        let mut seen: Vec<u32> = mesh.faces.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&3));
    }

    #[test]
    fn test_unknown_directives_ignored() {
        let mesh = parse_obj(
            "o thing\nvt 0.5 0.5\nvn 0 1 0\nv 0 0 0\nv 1 0 0\nv 0 1 0\ng group\nf 1 2 3\n",
        )
        .unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn test_empty_input_is_valid_empty_mesh() {
        let mesh = parse_obj("").unwrap();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());
        assert!(mesh.bvh.is_none());
    }

    #[test]
    fn test_crlf_lines() {
        let mesh = parse_obj("v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n").unwrap();
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn test_malformed_float_is_error() {
        let error = parse_obj("v 0 zero 0\n").unwrap_err();
        assert!(matches!(error, LoadError::BadMeshInput { line: 1, .. }));
    }

    #[test]
    fn test_short_vertex_line_is_error() {
        assert!(parse_obj("v 0 1\n").is_err());
    }

    #[test]
    fn test_face_with_too_few_indices_is_error() {
        let error = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2\n").unwrap_err();
        assert!(matches!(error, LoadError::BadMeshInput { line: 4, .. }));
    }

    #[test]
    fn test_quad_face_is_error() {
        let input = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        assert!(parse_obj(input).is_err());
    }

    #[test]
    fn test_zero_face_index_is_error() {
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").is_err());
    }

    #[test]
    fn test_out_of_range_face_index_is_error() {
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n").is_err());
    }

    #[test]
    fn test_load_mesh_wraps_io_failure() {
        struct FailingLoader;
        impl FileLoader for FailingLoader {
            fn read_file(&mut self, _path: &str) -> io::Result<Vec<u8>> {
                Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
            }
        }

        let error = load_mesh(&mut FailingLoader, "nope.obj").unwrap_err();
        assert!(matches!(error, LoadError::ResourceUnavailable(_)));
    }

    #[test]
    fn test_load_mesh_through_loader() {
        struct MemoryLoader(&'static str);
        impl FileLoader for MemoryLoader {
            fn read_file(&mut self, _path: &str) -> io::Result<Vec<u8>> {
                Ok(self.0.as_bytes().to_vec())
            }
        }

        let mesh = load_mesh(&mut MemoryLoader(TETRAHEDRON), "tetra.obj").unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.bvh.is_some());
    }
}
