//! Mesh data: Wavefront OBJ loading and procedural fallbacks

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use thiserror::Error;

use crate::gpu_types::MeshVertex;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("mesh has no faces")]
    Empty,
}

/// Indexed triangle list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Load an OBJ file
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let text = fs::read_to_string(path)?;
        Self::parse_obj(&text)
    }

    /// Load an OBJ file, or fall back to a unit cube if it cannot be read
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_obj(path) {
            Ok(mesh) => {
                tracing::info!(
                    "Loaded mesh {}: {} vertices, {} indices",
                    path.display(),
                    mesh.vertices.len(),
                    mesh.indices.len()
                );
                mesh
            }
            Err(e) => {
                tracing::warn!("Failed to load mesh {}: {e}; using fallback cube", path.display());
                Self::cube()
            }
        }
    }

    /// Parse OBJ text. Supports `v`, `vt`, `vn` and `f` records; everything else is skipped.
    pub fn parse_obj(text: &str) -> Result<Self, MeshError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<Vec2> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();

        let mut builder = MeshBuilder::default();

        for (line_no, raw) in text.lines().enumerate() {
            let line_no = line_no + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(kind) = parts.next() else { continue };

            match kind {
                "v" => positions.push(parse_vec3(&mut parts, line_no)?),
                "vt" => {
                    let u = parse_float(parts.next(), line_no)?;
                    // `v` is optional for 1D textures
                    let v = match parts.next() {
                        Some(token) => parse_float(Some(token), line_no)?,
                        None => 0.0,
                    };
                    tex_coords.push(Vec2::new(u, v));
                }
                "vn" => normals.push(parse_vec3(&mut parts, line_no)?.normalize_or_zero()),
                "f" => {
                    let mut face = Vec::new();
                    for token in parts {
                        let vertex = resolve_face_vertex(token, &positions, &tex_coords, &normals)
                            .map_err(|message| MeshError::Parse { line: line_no, message })?;
                        face.push(builder.insert(vertex));
                    }
                    if face.len() < 3 {
                        return Err(MeshError::Parse {
                            line: line_no,
                            message: format!("face has {} vertices", face.len()),
                        });
                    }
                    // Fan triangulation
                    for i in 1..face.len() - 1 {
                        builder.indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        if builder.indices.is_empty() {
            return Err(MeshError::Empty);
        }

        Ok(Self {
            vertices: builder.vertices,
            indices: builder.indices,
        })
    }

    /// Axis-aligned unit cube centered on the origin
    pub fn cube() -> Self {
        let v = |p: [f32; 3], uv: [f32; 2], n: [f32; 3]| MeshVertex {
            position: p,
            tex_coord: uv,
            normal: n,
        };
        let vertices = vec![
            // Front
            v([-0.5, -0.5, 0.5], [0.0, 0.0], [0.0, 0.0, 1.0]),
            v([0.5, -0.5, 0.5], [1.0, 0.0], [0.0, 0.0, 1.0]),
            v([0.5, 0.5, 0.5], [1.0, 1.0], [0.0, 0.0, 1.0]),
            v([-0.5, 0.5, 0.5], [0.0, 1.0], [0.0, 0.0, 1.0]),
            // Back
            v([-0.5, -0.5, -0.5], [1.0, 0.0], [0.0, 0.0, -1.0]),
            v([0.5, -0.5, -0.5], [0.0, 0.0], [0.0, 0.0, -1.0]),
            v([0.5, 0.5, -0.5], [0.0, 1.0], [0.0, 0.0, -1.0]),
            v([-0.5, 0.5, -0.5], [1.0, 1.0], [0.0, 0.0, -1.0]),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 0, 2, 3, // front
            4, 6, 5, 4, 7, 6, // back
            0, 4, 5, 0, 5, 1, // bottom
            2, 6, 7, 2, 7, 3, // top
            0, 3, 7, 0, 7, 4, // left
            1, 5, 6, 1, 6, 2, // right
        ];

        Self { vertices, indices }
    }

    /// Generate a UV sphere with normals and texture coordinates (CCW winding)
    pub fn uv_sphere(opts: SphereOptions) -> Self {
        let stacks = opts.stacks.max(2);
        let slices = opts.slices.max(3);

        let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);

        for stack in 0..=stacks {
            let v = stack as f32 / stacks as f32;
            let (sin_phi, cos_phi) = (v * std::f32::consts::PI).sin_cos();

            for slice in 0..=slices {
                let u = slice as f32 / slices as f32;
                let (sin_theta, cos_theta) = (u * std::f32::consts::TAU).sin_cos();

                let normal = Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta);
                vertices.push(MeshVertex {
                    position: (normal * opts.radius).to_array(),
                    tex_coord: [1.0 - u, v],
                    normal: normal.to_array(),
                });
            }
        }

        let ring = slices + 1;
        let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);

        for stack in 0..stacks {
            for slice in 0..slices {
                let i0 = stack * ring + slice;
                let i1 = i0 + 1;
                let i2 = (stack + 1) * ring + slice;
                let i3 = i2 + 1;

                indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
            }
        }

        Self { vertices, indices }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SphereOptions {
    pub radius: f32,
    pub stacks: u32,
    pub slices: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            stacks: 32,
            slices: 64,
        }
    }
}

/// Deduplicates identical (position, uv, normal) triples
#[derive(Default)]
struct MeshBuilder {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    lookup: HashMap<[u32; 8], u32>,
}

impl MeshBuilder {
    fn insert(&mut self, vertex: MeshVertex) -> u32 {
        // -0.0 + 0.0 == +0.0, so signed zeros share a key
        let canonical: [f32; 8] = bytemuck::cast::<_, [f32; 8]>(vertex).map(|c| c + 0.0);
        let key: [u32; 8] = bytemuck::cast(canonical);
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.lookup.insert(key, index);
        index
    }
}

fn parse_float(token: Option<&str>, line: usize) -> Result<f32, MeshError> {
    let token = token.ok_or_else(|| MeshError::Parse {
        line,
        message: "missing component".to_string(),
    })?;
    token.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("bad number {token:?}"),
    })
}

fn parse_vec3<'a>(parts: &mut impl Iterator<Item = &'a str>, line: usize) -> Result<Vec3, MeshError> {
    let x = parse_float(parts.next(), line)?;
    let y = parse_float(parts.next(), line)?;
    let z = parse_float(parts.next(), line)?;
    Ok(Vec3::new(x, y, z))
}

/// Resolve a 1-based (or negative, relative) OBJ index into `len` elements
fn resolve_index(token: &str, len: usize) -> Result<usize, String> {
    let raw: i64 = token.parse().map_err(|_| format!("bad index {token:?}"))?;
    let resolved = match raw {
        0 => return Err("index 0 is not valid".to_string()),
        r if r > 0 => r - 1,
        r => len as i64 + r,
    };
    if resolved < 0 || resolved as usize >= len {
        return Err(format!("index {raw} out of range (have {len})"));
    }
    Ok(resolved as usize)
}

/// Parse `v`, `v/vt`, `v//vn` or `v/vt/vn`
fn resolve_face_vertex(
    token: &str,
    positions: &[Vec3],
    tex_coords: &[Vec2],
    normals: &[Vec3],
) -> Result<MeshVertex, String> {
    let mut fields = token.split('/');

    let position = match fields.next() {
        Some(p) if !p.is_empty() => positions[resolve_index(p, positions.len())?],
        _ => return Err(format!("face vertex {token:?} has no position")),
    };
    let tex_coord = match fields.next() {
        Some(t) if !t.is_empty() => tex_coords[resolve_index(t, tex_coords.len())?],
        _ => Vec2::ZERO,
    };
    let normal = match fields.next() {
        Some(n) if !n.is_empty() => normals[resolve_index(n, normals.len())?],
        _ => Vec3::Y,
    };

    Ok(MeshVertex {
        position: position.to_array(),
        tex_coord: tex_coord.to_array(),
        normal: normal.to_array(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# a unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 2
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let mesh = MeshData::parse_obj(QUAD).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        // vn is normalized
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[2].tex_coord, [1.0, 1.0]);
    }

    #[test]
    fn test_shared_vertices_are_deduplicated() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";
        let mesh = MeshData::parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_face_forms_and_defaults() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\nvn 1 0 0\nf 1 2/1 3//1\n";
        let mesh = MeshData::parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices[0].tex_coord, [0.0, 0.0]);
        assert_eq!(mesh.vertices[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.vertices[1].tex_coord, [0.5, 0.5]);
        assert_eq!(mesh.vertices[2].normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_signed_zeros_share_a_vertex() {
        let obj = "v 0 0 0\nv -0 0 -0\nv 1 0 0\nv 0 1 0\nf 1 3 4\nf 2 3 4\n";
        let mesh = MeshData::parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_single_component_tex_coord() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.25\nf 1/1 2/1 3/1\n";
        let mesh = MeshData::parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices[0].tex_coord, [0.25, 0.0]);
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = MeshData::parse_obj(obj).unwrap();
        assert_eq!(mesh.vertices[2].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let err = MeshData::parse_obj("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_no_faces_is_empty() {
        assert!(matches!(MeshData::parse_obj("v 0 0 0\n"), Err(MeshError::Empty)));
    }

    #[test]
    fn test_missing_file_falls_back_to_cube() {
        let mesh = MeshData::load_or_fallback("/no/such/model.obj");
        assert_eq!(mesh, MeshData::cube());
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.index_count(), 36);
    }

    #[test]
    fn test_obj_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        std::fs::write(&path, QUAD).unwrap();
        assert_eq!(MeshData::load_or_fallback(&path).index_count(), 6);
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let mesh = MeshData::uv_sphere(SphereOptions {
            radius: 2.0,
            stacks: 8,
            slices: 12,
        });
        assert_eq!(mesh.vertices.len(), 9 * 13);
        assert_eq!(mesh.indices.len(), 8 * 12 * 6);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 2.0).abs() < 1e-4);
        }
    }
}
