// Copyright 2025 folio contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! UV-sphere mesh generation for the globe.

use folio_core::math::{PI, TAU};

/// One interleaved vertex of the sphere mesh.
///
/// `#[repr(C)]` + `Pod` so the whole vertex list casts straight into the
/// GPU buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    /// Position on the sphere surface.
    pub position: [f32; 3],
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Tangent along increasing longitude; `w` is the bitangent handedness.
    pub tangent: [f32; 4],
    /// Equirectangular texture coordinates.
    pub uv: [f32; 2],
}

impl SphereVertex {
    /// The vertex buffer layout matching [`SphereVertex`]'s field order.
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x4,
            3 => Float32x2,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SphereVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// A generated sphere mesh, ready for upload.
#[derive(Debug)]
pub struct SphereMesh {
    /// Interleaved vertices, `(segments + 1)^2` of them.
    pub vertices: Vec<SphereVertex>,
    /// Triangle-list indices, counter-clockwise seen from outside.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Triangle count of the mesh.
    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }
}

/// Generates a UV sphere of the given radius with `segments` subdivisions
/// along both latitude and longitude.
///
/// Rows run pole to pole (v from 0 at the top to 1 at the bottom); columns
/// wrap a full turn of longitude with a duplicated seam column so the
/// equirectangular texture closes cleanly.
pub fn generate(radius: f32, segments: u32) -> SphereMesh {
    let rows = segments + 1;
    let cols = segments + 1;
    let mut vertices = Vec::with_capacity((rows * cols) as usize);

    for row in 0..rows {
        let v = row as f32 / segments as f32;
        let theta = v * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for col in 0..cols {
            let u = col as f32 / segments as f32;
            let phi = u * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            // d(position)/d(phi), which degenerates at the poles; fall back
            // to a fixed tangent there so normal mapping stays defined.
            let tangent = if sin_theta.abs() < 1e-6 {
                [1.0, 0.0, 0.0, 1.0]
            } else {
                [-sin_phi, 0.0, cos_phi, 1.0]
            };

            vertices.push(SphereVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                tangent,
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for row in 0..segments {
        for col in 0..segments {
            let i0 = row * cols + col;
            let i1 = i0 + 1;
            let i2 = i0 + cols;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }

    SphereMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts_match_subdivision() {
        let mesh = generate(1.0, 64);
        assert_eq!(mesh.vertices.len(), 65 * 65);
        assert_eq!(mesh.indices.len(), 64 * 64 * 6);
        assert_eq!(mesh.triangle_count(), 64 * 64 * 2);
    }

    #[test]
    fn positions_lie_on_the_sphere() {
        let radius = 1.0;
        let mesh = generate(radius, 16);
        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.position;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - radius).abs() < 1e-4, "vertex off the sphere: {len}");
        }
    }

    #[test]
    fn normals_are_unit_length_and_outward() {
        let mesh = generate(2.0, 8);
        for vertex in &mesh.vertices {
            let [nx, ny, nz] = vertex.normal;
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
            // Outward: the normal points the same way as the position.
            let dot =
                nx * vertex.position[0] + ny * vertex.position[1] + nz * vertex.position[2];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn uvs_cover_the_unit_square() {
        let mesh = generate(1.0, 4);
        for vertex in &mesh.vertices {
            assert!((0.0..=1.0).contains(&vertex.uv[0]));
            assert!((0.0..=1.0).contains(&vertex.uv[1]));
        }
        // Seam columns exist at u = 0 and u = 1.
        assert!(mesh.vertices.iter().any(|v| v.uv[0] == 0.0));
        assert!(mesh.vertices.iter().any(|v| v.uv[0] == 1.0));
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = generate(1.0, 8);
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn tangents_are_orthogonal_to_normals() {
        let mesh = generate(1.0, 16);
        for vertex in &mesh.vertices {
            let n = vertex.normal;
            let t = vertex.tangent;
            let dot = n[0] * t[0] + n[1] * t[1] + n[2] * t[2];
            // Pole fallback tangents are exempt from exact orthogonality.
            if n[1].abs() < 0.999 {
                assert!(dot.abs() < 1e-4, "tangent not orthogonal: {dot}");
            }
        }
    }
}
