/// Interleaved mesh vertex shared by both scenes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Subdivided XY plane facing +Z, centered on the origin.
#[derive(Clone, Debug)]
pub struct PlaneGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    /// Rows run top to bottom and `v` grows downward, matching texture row order.
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        let gx = segments_x.max(1);
        let gy = segments_y.max(1);
        let seg_w = width / gx as f32;
        let seg_h = height / gy as f32;

        let mut vertices = Vec::with_capacity(((gx + 1) * (gy + 1)) as usize);
        for iy in 0..=gy {
            let y = height * 0.5 - iy as f32 * seg_h;
            for ix in 0..=gx {
                let x = -width * 0.5 + ix as f32 * seg_w;
                vertices.push(MeshVertex {
                    position: [x, y, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [ix as f32 / gx as f32, iy as f32 / gy as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity((gx * gy * 6) as usize);
        let row = gx + 1;
        for iy in 0..gy {
            for ix in 0..gx {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = ix + 1 + row * (iy + 1);
                let d = ix + 1 + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_counts_match_segments() {
        let g = PlaneGeometry::new(1.0, 2.0, 60, 60);
        assert_eq!(g.vertices.len(), 61 * 61);
        assert_eq!(g.indices.len(), 60 * 60 * 6);
        assert!(g.indices.iter().all(|&i| (i as usize) < g.vertices.len()));
    }

    #[test]
    fn plane_spans_requested_extent() {
        let g = PlaneGeometry::new(2.0, 2.0, 1, 1);
        assert_eq!(g.vertices[0].position, [-1.0, 1.0, 0.0]);
        assert_eq!(g.vertices[3].position, [1.0, -1.0, 0.0]);
        assert_eq!(g.vertices[3].uv, [1.0, 1.0]);
    }

    #[test]
    fn triangles_wind_counter_clockwise_toward_viewer() {
        let g = PlaneGeometry::new(2.0, 2.0, 1, 1);
        let p = |i: u32| glam::Vec3::from(g.vertices[i as usize].position);
        let (a, b, c) = (p(g.indices[0]), p(g.indices[1]), p(g.indices[2]));
        assert!((b - a).cross(c - a).z > 0.0);
    }
}
