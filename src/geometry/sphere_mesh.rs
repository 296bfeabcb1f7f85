//! UV-sphere vertex/index synthesis.
//!
//! Stacks run from the north pole (+Z) to the south pole (-Z), sectors sweep
//! the full turn around Z. The seam column is emitted twice so a textured
//! variant can wrap its UVs, and the two pole rings only emit one triangle
//! per sector since every vertex in those rows collapses onto the pole.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::error::{GeometryError, GeometryResult};

/// Number of vertices produced for the given tessellation.
pub fn vertex_count(stack_count: u32, sector_count: u32) -> usize {
    (stack_count as usize + 1) * (sector_count as usize + 1)
}

/// Number of indices produced for the given tessellation (3 per triangle).
pub fn index_count(stack_count: u32, sector_count: u32) -> usize {
    6 * sector_count as usize * (stack_count as usize).saturating_sub(1)
}

/// A generated sphere, ready for upload as a vertex + index buffer pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn generate(radius: f32, stack_count: u32, sector_count: u32) -> GeometryResult<Self> {
        validate_parameters(radius, stack_count, sector_count)?;

        let mut vertices = vec![[0.0f32; 3]; vertex_count(stack_count, sector_count)];
        let mut indices = vec![0u32; index_count(stack_count, sector_count)];
        generate_into(radius, stack_count, sector_count, &mut vertices, &mut indices)?;

        tracing::debug!(
            "Generated sphere mesh: radius={}, stacks={}, sectors={}, {} vertices, {} indices",
            radius,
            stack_count,
            sector_count,
            vertices.len(),
            indices.len()
        );

        Ok(Self { vertices, indices })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// Writes a sphere into caller-owned buffers.
///
/// Both buffers are checked before anything is written, so a failed call
/// leaves them untouched. Returns the number of vertices and indices written;
/// any trailing capacity is left as it was.
pub fn generate_into(
    radius: f32,
    stack_count: u32,
    sector_count: u32,
    vertices: &mut [[f32; 3]],
    indices: &mut [u32],
) -> GeometryResult<(usize, usize)> {
    validate_parameters(radius, stack_count, sector_count)?;

    let num_vertices = vertex_count(stack_count, sector_count);
    let num_indices = index_count(stack_count, sector_count);
    if vertices.len() < num_vertices {
        return Err(GeometryError::BufferTooSmall {
            buffer: "vertex",
            required: num_vertices,
            provided: vertices.len(),
        });
    }
    if indices.len() < num_indices {
        return Err(GeometryError::BufferTooSmall {
            buffer: "index",
            required: num_indices,
            provided: indices.len(),
        });
    }

    let stack_step = PI / stack_count as f32;
    let sector_step = TAU / sector_count as f32;

    let mut vertex_cursor = 0;
    for i in 0..=stack_count {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sector_count {
            let sector_angle = j as f32 * sector_step;
            vertices[vertex_cursor] = [xy * sector_angle.cos(), xy * sector_angle.sin(), z];
            vertex_cursor += 1;
        }
    }

    let mut index_cursor = 0;
    let mut push_triangle = |tri: [u32; 3]| {
        indices[index_cursor..index_cursor + 3].copy_from_slice(&tri);
        index_cursor += 3;
    };
    for i in 0..stack_count {
        for j in 0..sector_count {
            let k1 = i * (sector_count + 1) + j;
            let k2 = k1 + sector_count + 1;

            if i != 0 {
                push_triangle([k1, k2, k1 + 1]);
            }
            if i != stack_count - 1 {
                push_triangle([k1 + 1, k2, k2 + 1]);
            }
        }
    }

    debug_assert_eq!(vertex_cursor, num_vertices);
    debug_assert_eq!(index_cursor, num_indices);
    Ok((num_vertices, num_indices))
}

fn validate_parameters(radius: f32, stack_count: u32, sector_count: u32) -> GeometryResult<()> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(GeometryError::InvalidParameter(format!(
            "radius must be a positive finite number, got {}",
            radius
        )));
    }
    if stack_count == 0 {
        return Err(GeometryError::InvalidParameter(
            "stack count must be greater than zero".into(),
        ));
    }
    if sector_count == 0 {
        return Err(GeometryError::InvalidParameter(
            "sector count must be greater than zero".into(),
        ));
    }
    // Every vertex must be addressable by a u32 index.
    let num_vertices = (stack_count as u64 + 1).checked_mul(sector_count as u64 + 1);
    if num_vertices.map_or(true, |n| n > u32::MAX as u64) {
        return Err(GeometryError::InvalidParameter(format!(
            "{} stacks x {} sectors exceeds the u32 index range",
            stack_count, sector_count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_formulas() {
        let mesh = SphereMesh::generate(1.0, 30, 30).unwrap();
        assert_eq!(mesh.vertex_count(), 31 * 31);
        assert_eq!(mesh.index_count(), 6 * 30 * 29);
        assert!(mesh.index_count() < 30 * 30 * 6);
        assert_eq!(mesh.triangle_count(), mesh.index_count() / 3);
    }

    #[test]
    fn indices_stay_in_range() {
        let mesh = SphereMesh::generate(0.1, 7, 11).unwrap();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn poles_and_seam() {
        let radius = 2.0;
        let mesh = SphereMesh::generate(radius, 4, 8).unwrap();

        let north = mesh.vertices[0];
        assert!((north[2] - radius).abs() < 1e-6);
        let south = *mesh.vertices.last().unwrap();
        assert!((south[2] + radius).abs() < 1e-6);

        // First and last vertex of each ring coincide but are stored separately.
        for ring in mesh.vertices.chunks_exact(9) {
            let (first, last) = (ring[0], ring[8]);
            for axis in 0..3 {
                assert!((first[axis] - last[axis]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn north_ring_emits_only_lower_triangles() {
        let sectors = 6;
        let mesh = SphereMesh::generate(1.0, 5, sectors).unwrap();
        let first_ring: Vec<[u32; 3]> = mesh.triangles().take(sectors as usize).collect();
        for (j, tri) in first_ring.into_iter().enumerate() {
            let k1 = j as u32;
            let k2 = k1 + sectors + 1;
            assert_eq!(tri, [k1 + 1, k2, k2 + 1]);
        }
    }

    #[test]
    fn south_ring_emits_only_upper_triangles() {
        let (stacks, sectors) = (5u32, 6u32);
        let mesh = SphereMesh::generate(1.0, stacks, sectors).unwrap();
        let tris: Vec<[u32; 3]> = mesh.triangles().collect();
        let last_ring = &tris[tris.len() - sectors as usize..];
        for (j, tri) in last_ring.iter().enumerate() {
            let k1 = (stacks - 1) * (sectors + 1) + j as u32;
            let k2 = k1 + sectors + 1;
            assert_eq!(*tri, [k1, k2, k1 + 1]);
        }
    }

    #[test]
    fn single_stack_has_no_triangles() {
        let mesh = SphereMesh::generate(1.0, 1, 4).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * 5);
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn deterministic() {
        let a = SphereMesh::generate(0.5, 12, 9).unwrap();
        let b = SphereMesh::generate(0.5, 12, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        for (radius, stacks, sectors) in [
            (0.0, 30, 30),
            (-1.0, 30, 30),
            (f32::NAN, 30, 30),
            (f32::INFINITY, 30, 30),
            (1.0, 0, 30),
            (1.0, 30, 0),
        ] {
            assert!(matches!(
                SphereMesh::generate(radius, stacks, sectors),
                Err(GeometryError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn rejects_index_overflow() {
        assert!(matches!(
            SphereMesh::generate(1.0, u32::MAX, u32::MAX),
            Err(GeometryError::InvalidParameter(_))
        ));
    }

    #[test]
    fn invalid_parameters_leave_buffers_untouched() {
        let mut vertices = vec![[7.0f32; 3]; 16];
        let mut indices = vec![7u32; 64];
        let err = generate_into(0.0, 3, 3, &mut vertices, &mut indices).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidParameter(_)));
        assert!(vertices.iter().all(|v| *v == [7.0; 3]));
        assert!(indices.iter().all(|&i| i == 7));
    }

    #[test]
    fn undersized_buffers_fail_before_writing() {
        let mut vertices = vec![[7.0f32; 3]; vertex_count(3, 3) - 1];
        let mut indices = vec![7u32; index_count(3, 3)];
        let err = generate_into(1.0, 3, 3, &mut vertices, &mut indices).unwrap_err();
        assert_eq!(
            err,
            GeometryError::BufferTooSmall {
                buffer: "vertex",
                required: 16,
                provided: 15,
            }
        );
        assert!(vertices.iter().all(|v| *v == [7.0; 3]));

        let mut vertices = vec![[7.0f32; 3]; vertex_count(3, 3)];
        let mut indices = vec![7u32; index_count(3, 3) - 3];
        let err = generate_into(1.0, 3, 3, &mut vertices, &mut indices).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::BufferTooSmall { buffer: "index", .. }
        ));
        assert!(indices.iter().all(|&i| i == 7));
    }

    #[test]
    fn oversized_buffers_keep_their_tail() {
        let mut vertices = vec![[7.0f32; 3]; vertex_count(2, 3) + 2];
        let mut indices = vec![7u32; index_count(2, 3) + 3];
        let written = generate_into(1.0, 2, 3, &mut vertices, &mut indices).unwrap();
        assert_eq!(written, (vertex_count(2, 3), index_count(2, 3)));
        assert_eq!(vertices[written.0..], [[7.0; 3]; 2]);
        assert_eq!(indices[written.1..], [7; 3]);

        let mesh = SphereMesh::generate(1.0, 2, 3).unwrap();
        assert_eq!(vertices[..written.0], mesh.vertices[..]);
        assert_eq!(indices[..written.1], mesh.indices[..]);
    }
}
