use std::{fs, path::Path, str::FromStr};

use vek::*;

use super::normalized_or_zero;
use crate::{Error, VertexAttributes};

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3<f32>>,
    pub faces: Vec<[usize; 3]>,
}

/// Whitespace-separated tokens, remembering the line each came from.
struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self {
        let tokens = src
            .lines()
            .enumerate()
            .flat_map(|(i, line)| {
                let content = line.split('#').next().unwrap_or("");
                content.split_whitespace().map(move |tok| (i + 1, tok))
            })
            .collect();
        Self { tokens, cursor: 0 }
    }

    fn next_raw(&mut self, what: &str) -> Result<(usize, &'a str), Error> {
        match self.tokens.get(self.cursor) {
            Some(&tok) => {
                self.cursor += 1;
                Ok(tok)
            }
            None => Err(Error::Parse {
                line: self.tokens.last().map_or(1, |(line, _)| *line),
                reason: format!("unexpected end of file, expected {}", what),
            }),
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, Error> {
        let (line, tok) = self.next_raw(what)?;
        tok.parse().map_err(|_| Error::Parse {
            line,
            reason: format!("expected {}, found `{}`", what, tok),
        })
    }
}

impl Mesh {
    /// Load a mesh from an OFF file.
    pub fn load_off<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mesh = Self::parse_off(&fs::read_to_string(path)?)?;
        log::info!(
            "Loaded {}: {} vertices, {} faces",
            path.display(),
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Parse a mesh in the OFF format. Only triangular faces are accepted.
    pub fn parse_off(src: &str) -> Result<Self, Error> {
        let mut tokens = Tokens::new(src);

        let (line, header) = tokens.next_raw("the OFF header")?;
        if header != "OFF" {
            return Err(Error::Parse {
                line,
                reason: format!("expected the OFF header, found `{}`", header),
            });
        }
        let vertex_count: usize = tokens.next("the vertex count")?;
        let face_count: usize = tokens.next("the face count")?;
        let _edge_count: usize = tokens.next("the edge count")?;

        let vertices = (0..vertex_count)
            .map(|_| -> Result<Vec3<f32>, Error> {
                Ok(Vec3::new(
                    tokens.next("a coordinate")?,
                    tokens.next("a coordinate")?,
                    tokens.next("a coordinate")?,
                ))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let faces = (0..face_count)
            .map(|face| -> Result<[usize; 3], Error> {
                let sides: usize = tokens.next("a face size")?;
                if sides != 3 {
                    return Err(Error::NonTriangularFace { face, sides });
                }
                let mut indices = [0; 3];
                for index in &mut indices {
                    *index = tokens.next("a vertex index")?;
                    if *index >= vertex_count {
                        return Err(Error::VertexOutOfRange {
                            face,
                            index: *index,
                            count: vertex_count,
                        });
                    }
                }
                Ok(indices)
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self { vertices, faces })
    }

    fn corners(&self, [a, b, c]: [usize; 3]) -> [Vec3<f32>; 3] {
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// The unit normal of a face, following its winding. Degenerate faces yield zero.
    pub fn face_normal(&self, face: [usize; 3]) -> Vec3<f32> {
        let [a, b, c] = self.corners(face);
        normalized_or_zero((b - a).cross(c - a))
    }

    /// One vertex per face corner, in face order, ready for triangle rasterization.
    pub fn triangle_vertices(&self) -> Vec<VertexAttributes> {
        self.faces
            .iter()
            .flat_map(|&face| self.corners(face).to_vec())
            .map(VertexAttributes::from_point)
            .collect()
    }

    /// The three edges of every face as vertex pairs, ready for line rasterization.
    ///
    /// Edges shared between faces are emitted once per face.
    pub fn edge_vertices(&self) -> Vec<VertexAttributes> {
        self.faces
            .iter()
            .flat_map(|&face| {
                let [a, b, c] = self.corners(face);
                vec![a, b, b, c, c, a]
            })
            .map(VertexAttributes::from_point)
            .collect()
    }

    /// Triangle vertices carrying the normal of the face they belong to.
    pub fn flat_shaded_vertices(&self) -> Vec<VertexAttributes> {
        self.faces
            .iter()
            .flat_map(|&face| {
                let normal = self.face_normal(face);
                self.corners(face)
                    .iter()
                    .map(|&p| VertexAttributes::from_point(p).with_normal(normal))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Per-vertex normals: every face normal is added once to each of its three vertices and the
    /// sums are normalised.
    pub fn vertex_normals(&self) -> Vec<Vec3<f32>> {
        let mut normals = vec![Vec3::zero(); self.vertices.len()];
        for &face in &self.faces {
            let normal = self.face_normal(face);
            for &index in &face {
                normals[index] += normal;
            }
        }
        normals.into_iter().map(normalized_or_zero).collect()
    }

    /// Triangle vertices carrying the averaged normal of each vertex, for smooth shading.
    pub fn smooth_shaded_vertices(&self) -> Vec<VertexAttributes> {
        let normals = self.vertex_normals();
        self.faces
            .iter()
            .flat_map(|face| face.iter())
            .map(|&index| VertexAttributes::from_point(self.vertices[index]).with_normal(normals[index]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "OFF
# two triangles forming a unit square in the xy plane
4 2 0
0 0 0
1 0 0
1 1 0
0 1 0
3 0 1 2
3 0 2 3
";

    #[test]
    fn parses_vertices_and_faces() {
        let mesh = Mesh::parse_off(QUAD).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[2], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Mesh::parse_off("PLY\n0 0 0\n"),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            Mesh::parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n4 0 1 2 0\n"),
            Err(Error::NonTriangularFace { face: 0, sides: 4 })
        ));
        assert!(matches!(
            Mesh::parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 3\n"),
            Err(Error::VertexOutOfRange { face: 0, index: 3, count: 3 })
        ));
        assert!(matches!(
            Mesh::parse_off("OFF\n3 1 0\n0 0 0\n1 0 x\n"),
            Err(Error::Parse { line: 4, .. })
        ));
        assert!(matches!(
            Mesh::parse_off("OFF\n3 1 0\n0 0 0\n"),
            Err(Error::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn expands_triangles_and_edges() {
        let mesh = Mesh::parse_off(QUAD).unwrap();
        let tris = mesh.triangle_vertices();
        assert_eq!(tris.len(), 6);
        assert_eq!(tris[4].position, Vec4::new(1.0, 1.0, 0.0, 1.0));

        let edges = mesh.edge_vertices();
        assert_eq!(edges.len(), 12);
        // Second edge of the first face runs from vertex 1 to vertex 2
        assert_eq!(edges[2].position, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(edges[3].position, Vec4::new(1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn flat_normals_follow_the_winding() {
        let mesh = Mesh::parse_off(QUAD).unwrap();
        assert!(mesh
            .flat_shaded_vertices()
            .iter()
            .all(|v| v.normal == Vec3::unit_z()));
    }

    #[test]
    fn every_corner_receives_the_face_normal() {
        let mesh = Mesh::parse_off("OFF\n3 1 0\n0 0 0\n0 0 1\n0 1 0\n3 0 1 2\n").unwrap();
        let normals = mesh.vertex_normals();
        assert_eq!(normals, vec![-Vec3::unit_x(); 3]);
        assert!(mesh
            .smooth_shaded_vertices()
            .iter()
            .all(|v| v.normal == -Vec3::unit_x()));
    }

    #[test]
    fn smooth_normals_average_adjacent_faces() {
        // Two faces folded along the shared edge 0-1, one facing +z and one facing +y
        let mesh = Mesh::parse_off("OFF\n4 2 0\n0 0 0\n1 0 0\n0 1 0\n0 0 -1\n3 0 1 2\n3 0 1 3\n").unwrap();
        let normals = mesh.vertex_normals();
        let diagonal = Vec3::new(0.0, 1.0, 1.0).normalized();

        assert!((normals[0] - diagonal).magnitude() < 1e-6);
        assert!((normals[1] - diagonal).magnitude() < 1e-6);
        assert_eq!(normals[2], Vec3::unit_z());
        assert_eq!(normals[3], Vec3::unit_y());
    }
}
