//! Procedural geometry for the demos

use gaka_engine::foundation::math::Vec3;
use gaka_engine::render::primitives::{Mesh, SkinnedVertex, Vertex};

/// Cylinder skinned to a three-bone chain
///
/// Rings near the start of the axis follow bone 0, rings near the end follow
/// bone 2 and bone 1 dominates the middle. Weights are squared then
/// normalised so each vertex sums to one.
///
/// # Arguments
/// * `base` - Center of the cylinder
/// * `axis` - Unit direction of the cylinder
/// * `radius` - Cylinder radius
/// * `length` - Length along `axis`
/// * `segments` - Vertices per ring (at least 3)
/// * `rings` - Rings along the axis (at least 2)
#[allow(clippy::cast_precision_loss)]
pub fn skinned_cylinder(
    base: Vec3,
    axis: Vec3,
    radius: f32,
    length: f32,
    segments: u32,
    rings: u32,
) -> Mesh<SkinnedVertex> {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let reference = if axis.y.abs() < 0.9 { Vec3::y() } else { Vec3::x() };
    let side = axis.cross(&reference).normalize();
    let other = axis.cross(&side);

    let mut vertices = Vec::with_capacity((segments * rings) as usize);
    for ring in 0..rings {
        let along = ring as f32 / (rings - 1) as f32;
        let center = base + axis * ((along - 0.5) * length);
        let weights = ring_weights(ring, rings);

        for segment in 0..segments {
            let angle = std::f32::consts::TAU * segment as f32 / segments as f32;
            let normal = (side * angle.cos() + other * angle.sin()).normalize();
            let position = center + normal * radius;

            let vertex = Vertex::new(
                position.into(),
                normal.into(),
                [segment as f32 / segments as f32, along],
            );
            vertices.push(SkinnedVertex::new(
                vertex,
                &[(0, weights[0]), (1, weights[1]), (2, weights[2])],
            ));
        }
    }

    let mut indices = Vec::with_capacity(((rings - 1) * segments * 6) as usize);
    for ring in 0..rings - 1 {
        for segment in 0..segments {
            let current = ring * segments + segment;
            let next = ring * segments + (segment + 1) % segments;
            indices.extend_from_slice(&[current, next, current + segments]);
            indices.extend_from_slice(&[next, current + segments, next + segments]);
        }
    }

    Mesh::new(vertices, indices)
}

#[allow(clippy::cast_precision_loss)]
fn ring_weights(ring: u32, rings: u32) -> [f32; 3] {
    let t = ring as f32 / rings as f32;
    let half = (rings / 2) as f32;
    let ring = ring as f32;

    let start = 1.0 - t;
    let middle = if ring <= half { ring / half } else { half / ring };
    let end = t;

    let squared = [start * start, middle * middle, end * end];
    let total: f32 = squared.iter().sum();
    squared.map(|w| w / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_counts() {
        let mesh = skinned_cylinder(Vec3::zeros(), Vec3::x(), 0.5, 3.0, 8, 4);
        assert_eq!(mesh.vertices.len(), 32);
        assert_eq!(mesh.indices.len(), 3 * 8 * 6);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn test_cylinder_spans_its_length() {
        let mesh = skinned_cylinder(Vec3::zeros(), Vec3::x(), 0.5, 3.0, 8, 4);
        let first = mesh.vertices.first().unwrap();
        let last = mesh.vertices.last().unwrap();
        assert_relative_eq!(first.position[0], -1.5, epsilon = 1e-5);
        assert_relative_eq!(last.position[0], 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_weights_are_normalised() {
        let mesh = skinned_cylinder(Vec3::zeros(), Vec3::x(), 0.5, 3.0, 6, 16);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.bone_count, 3);
            let total: f32 = vertex.bone_weights.iter().sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_first_ring_follows_root_bone() {
        let weights = ring_weights(0, 16);
        assert_relative_eq!(weights[0], 1.0);
        assert_relative_eq!(weights[1], 0.0);
        assert_relative_eq!(weights[2], 0.0);
    }
}
