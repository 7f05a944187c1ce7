//! Orbit ring overlay

use std::ops::Range;

use orrery_sim::{orbit_rings, BodySystem, OrbitRing};
use wgpu::util::DeviceExt;

use crate::gpu_types::LineVertex;

/// Flatten rings into one vertex list plus the vertex range of each strip
pub fn ring_vertices(rings: &[OrbitRing]) -> (Vec<LineVertex>, Vec<Range<u32>>) {
    let mut vertices = Vec::new();
    let mut strips = Vec::with_capacity(rings.len());

    for ring in rings {
        let start = vertices.len() as u32;
        vertices.extend(ring.points.iter().map(|p| LineVertex {
            position: p.to_array(),
            color: ring.color,
        }));
        strips.push(start..vertices.len() as u32);
    }

    (vertices, strips)
}

/// Ring geometry on the GPU. Built once: radii and centers do not change after setup.
pub struct OrbitOverlay {
    vertex_buffer: Option<wgpu::Buffer>,
    strips: Vec<Range<u32>>,
    pub visible: bool,
}

impl OrbitOverlay {
    pub fn new(device: &wgpu::Device, system: &BodySystem, visible: bool) -> Self {
        let (vertices, strips) = ring_vertices(&orbit_rings(system));
        tracing::debug!("Orbit overlay: {} rings, {} vertices", strips.len(), vertices.len());

        let vertex_buffer = (!vertices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Orbit Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        Self {
            vertex_buffer,
            strips,
            visible,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Record one line-strip draw per ring. The orbit pipeline must already be set.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if !self.visible {
            return;
        }
        let Some(buffer) = &self.vertex_buffer else {
            return;
        };

        pass.set_vertex_buffer(0, buffer.slice(..));
        for strip in &self.strips {
            pass.draw(strip.clone(), 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_sim::{OrbitingBody, RING_SEGMENTS};

    #[test]
    fn test_strips_are_contiguous() {
        let mut system = BodySystem::new();
        system.add_body(OrbitingBody::new(0.0, 0.0, 0.0, 1.0));
        system.add_body(OrbitingBody::new(5.0, 1.0, 0.0, 1.0));
        system.add_body(OrbitingBody::new(8.0, 1.0, 0.0, 1.0));

        let (vertices, strips) = ring_vertices(&orbit_rings(&system));
        let per_ring = (RING_SEGMENTS + 1) as u32;

        assert_eq!(strips, vec![0..per_ring, per_ring..2 * per_ring]);
        assert_eq!(vertices.len() as u32, 2 * per_ring);
        assert_eq!(vertices[0].color, orrery_sim::PALETTE[0]);
        assert_eq!(vertices[per_ring as usize].color, orrery_sim::PALETTE[1]);
    }

    #[test]
    fn test_no_satellites_no_strips() {
        let mut system = BodySystem::new();
        system.add_body(OrbitingBody::new(0.0, 0.0, 0.0, 1.0));
        let (vertices, strips) = ring_vertices(&orbit_rings(&system));
        assert!(vertices.is_empty());
        assert!(strips.is_empty());
    }
}
