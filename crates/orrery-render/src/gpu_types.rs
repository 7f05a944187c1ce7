//! GPU-compatible data types

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

/// Mesh vertex: position, texture coordinate, normal
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2, 2 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-instance data for the instanced body draw
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    /// Model matrix, column major
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3x3, column major
    pub normal: [[f32; 3]; 3],
    /// 1.0 for self-lit bodies (the anchor), 0.0 for Phong-lit ones
    pub emissive: f32,
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4,
        7 => Float32x3, 8 => Float32x3, 9 => Float32x3,
        10 => Float32,
    ];

    pub fn new(model: Mat4, emissive: bool) -> Self {
        let upper = Mat3::from_mat4(model);
        // Zero scale collapses the basis; keep normals finite
        let normal = if upper.determinant().abs() > f32::EPSILON {
            upper.inverse().transpose()
        } else {
            Mat3::IDENTITY
        };
        Self {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            emissive: if emissive { 1.0 } else { 0.0 },
        }
    }

    /// Instance data for a transform list; index 0 is the self-lit anchor
    pub fn from_transforms(transforms: &[Mat4]) -> Vec<Self> {
        transforms
            .iter()
            .enumerate()
            .map(|(i, model)| Self::new(*model, i == 0))
            .collect()
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Orbit ring vertex with baked color
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Point light parameters for the Phong pass
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub ambient: f32,
    pub color: [f32; 3],
    pub specular: f32,
    pub shininess: f32,
    pub _pad0: [f32; 3],
}

impl LightUniform {
    pub const AMBIENT: f32 = 0.4;
    pub const SPECULAR: f32 = 0.5;
    pub const SHININESS: f32 = 32.0;

    /// White light at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            ambient: Self::AMBIENT,
            color: [1.0, 1.0, 1.0],
            specular: Self::SPECULAR,
            shininess: Self::SHININESS,
            _pad0: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 104);
        assert_eq!(std::mem::size_of::<LineVertex>(), 24);
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
    }

    #[test]
    fn test_only_first_instance_is_emissive() {
        let transforms = vec![Mat4::IDENTITY; 3];
        let flags: Vec<f32> = InstanceRaw::from_transforms(&transforms)
            .iter()
            .map(|i| i.emissive)
            .collect();
        assert_eq!(flags, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normal_matrix_undoes_uniform_scale() {
        let model = Mat4::from_scale(Vec3::splat(2.0));
        let raw = InstanceRaw::new(model, false);
        assert!((raw.normal[0][0] - 0.5).abs() < 1e-6);
        assert!((raw.normal[1][1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_scale_keeps_normals_finite() {
        let raw = InstanceRaw::new(Mat4::from_scale(Vec3::ZERO), false);
        assert!(raw.normal.iter().flatten().all(|v| v.is_finite()));
    }
}
