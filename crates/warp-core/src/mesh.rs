use glam::{Vec2, Vec3};

use crate::error::MeshError;
use crate::vertex::Vertex;

pub const MIN_GRID_SIDE: usize = 2;
const MAX_U16_VERTICES: usize = u16::MAX as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Grid nodes along x. Rows are derived from the viewport aspect.
    pub columns: usize,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { columns: 60 }
    }
}

/// A `columns × rows` grid of textured vertices covering the unit square,
/// plus the triangle list that stitches it together.
#[derive(Debug, Clone)]
pub struct GridMesh {
    columns: usize,
    rows: usize,
    /// Rest distance between neighbouring nodes.
    spacing: Vec2,
    vertices: Vec<Vertex>,
    rest: Vec<Vec3>,
    indices: Vec<u16>,
}

impl GridMesh {
    /// `aspect` is viewport height / width. Rows follow it so cells stay square on screen.
    pub fn new(config: &MeshConfig, aspect: f32) -> Result<Self, MeshError> {
        let columns = clamp_side("columns", config.columns);
        let rows = clamp_side("rows", (columns as f32 * aspect).floor() as usize);

        // saturate so a runaway aspect or column count reports instead of overflowing
        let count = columns.saturating_mul(rows);
        if count > MAX_U16_VERTICES {
            return Err(MeshError::TooManyVertices {
                columns,
                rows,
                count,
            });
        }

        let mut vertices = Vec::with_capacity(count);
        let mut rest = Vec::with_capacity(count);
        for y in 0..rows {
            for x in 0..columns {
                let (fx, fy) = (x as f32, y as f32);
                let tex = Vec2::new(fx / columns as f32, 1.0 - fy / rows as f32);
                let pos = Vec3::new(
                    fx / (columns - 1) as f32,
                    fy / (rows - 1) as f32,
                    0.0,
                );
                vertices.push(Vertex::new(pos, tex));
                rest.push(pos);
            }
        }

        let indices = grid_indices(columns, rows);
        log::debug!(
            "grid mesh {}x{}: {} vertices, {} indices",
            columns,
            rows,
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            columns,
            rows,
            spacing: Vec2::new(1.0 / (columns - 1) as f32, 1.0 / (rows - 1) as f32),
            vertices,
            rest,
            indices,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn spacing(&self) -> Vec2 {
        self.spacing
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Flat index of node `(x, y)`, or `None` outside the grid.
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.columns as i64 || y >= self.rows as i64 {
            return None;
        }
        Some(y as usize * self.columns + x as usize)
    }

    /// Move every vertex back to its rest position.
    pub fn reset_positions(&mut self) {
        for (v, &p) in self.vertices.iter_mut().zip(&self.rest) {
            v.set_position(p);
        }
    }
}

fn clamp_side(what: &str, n: usize) -> usize {
    if n < MIN_GRID_SIDE {
        log::warn!("grid {what} {n} below minimum, using {MIN_GRID_SIDE}");
        MIN_GRID_SIDE
    } else {
        n
    }
}

/// Two triangles per cell: `(p1, p3, p2)` and `(p2, p3, p4)`, where p1/p2 are the
/// top edge and p3/p4 the next row down.
fn grid_indices(columns: usize, rows: usize) -> Vec<u16> {
    let mut indices = Vec::with_capacity((columns - 1) * (rows - 1) * 6);
    for y in 0..rows - 1 {
        for x in 0..columns - 1 {
            let p1 = (x + y * columns) as u16;
            let p2 = p1 + 1;
            let p3 = (x + (y + 1) * columns) as u16;
            let p4 = p3 + 1;
            indices.extend_from_slice(&[p1, p3, p2, p2, p3, p4]);
        }
    }
    indices
}

/// A single unit quad on z = 0: four corners and six indices.
pub fn quad() -> ([Vertex; 4], [u16; 6]) {
    let vertices = [
        Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec2::new(0.0, 1.0)),
        Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(0.0, 1.0, 0.0), Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 0.0)),
    ];
    (vertices, [0, 2, 1, 1, 2, 3])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: usize, aspect: f32) -> GridMesh {
        GridMesh::new(&MeshConfig { columns }, aspect).unwrap()
    }

    #[test]
    fn rows_follow_aspect() {
        let m = grid(60, 1.5);
        assert_eq!(m.columns(), 60);
        assert_eq!(m.rows(), 90);
        assert_eq!(m.vertices().len(), 60 * 90);
    }

    #[test]
    fn index_count_is_six_per_cell() {
        let m = grid(4, 0.75);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.indices().len(), 3 * 2 * 6);
    }

    #[test]
    fn first_cell_winding() {
        let m = grid(3, 1.0);
        assert_eq!(&m.indices()[..6], &[0, 3, 1, 1, 3, 4]);
    }

    #[test]
    fn rest_positions_span_unit_square() {
        let m = grid(5, 1.0);
        let rest = m.rest_positions();
        assert_eq!(rest[0], Vec3::ZERO);
        assert_eq!(*rest.last().unwrap(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(m.vertices()[0].position(), Vec3::ZERO);
    }

    #[test]
    fn tex_coords_flip_v() {
        let m = grid(4, 1.0);
        assert_eq!(m.vertices()[0].tex_coord(), Vec2::new(0.0, 1.0));
        let idx = m.index_of(2, 1).unwrap();
        assert_eq!(m.vertices()[idx].tex_coord(), Vec2::new(0.5, 0.75));
    }

    #[test]
    fn spacing_matches_rest_layout() {
        let m = grid(5, 0.5);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.spacing(), Vec2::new(0.25, 1.0));
        let right = m.rest_positions()[1] - m.rest_positions()[0];
        assert!((right.x - m.spacing().x).abs() < 1e-6);
    }

    #[test]
    fn index_of_rejects_outside() {
        let m = grid(4, 1.0);
        assert_eq!(m.index_of(0, 0), Some(0));
        assert_eq!(m.index_of(3, 3), Some(15));
        assert_eq!(m.index_of(-1, 0), None);
        assert_eq!(m.index_of(4, 0), None);
        assert_eq!(m.index_of(0, 4), None);
    }

    #[test]
    fn degenerate_sizes_clamp_to_minimum() {
        let m = grid(0, 0.0);
        assert_eq!((m.columns(), m.rows()), (2, 2));
        assert_eq!(m.indices().len(), 6);
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let err = GridMesh::new(&MeshConfig { columns: 300 }, 1.0).unwrap_err();
        assert_eq!(
            err,
            MeshError::TooManyVertices {
                columns: 300,
                rows: 300,
                count: 90_000,
            }
        );
    }

    #[test]
    fn infinite_aspect_is_rejected_not_overflowed() {
        let err = GridMesh::new(&MeshConfig::default(), f32::INFINITY).unwrap_err();
        match err {
            MeshError::TooManyVertices { columns, rows, count } => {
                assert_eq!(columns, 60);
                assert_eq!(rows, usize::MAX);
                assert_eq!(count, usize::MAX);
            }
        }
    }

    #[test]
    fn huge_column_count_is_rejected_not_overflowed() {
        let err = GridMesh::new(&MeshConfig { columns: usize::MAX / 2 }, 1.0).unwrap_err();
        assert!(matches!(err, MeshError::TooManyVertices { count: usize::MAX, .. }));
    }

    #[test]
    fn nan_aspect_falls_back_to_minimum_rows() {
        let m = grid(4, f32::NAN);
        assert_eq!(m.rows(), MIN_GRID_SIDE);
    }

    #[test]
    fn largest_u16_grid_fits() {
        let m = grid(256, 1.0);
        assert_eq!(m.vertices().len(), 65_536);
        assert_eq!(*m.indices().iter().max().unwrap(), u16::MAX);
    }

    #[test]
    fn reset_positions_restores_rest() {
        let mut m = grid(3, 1.0);
        m.vertices_mut()[4].set_position(Vec3::splat(9.0));
        m.reset_positions();
        assert_eq!(m.vertices()[4].position(), m.rest_positions()[4]);
    }

    #[test]
    fn quad_has_two_triangles() {
        let (v, i) = quad();
        assert_eq!(v.len(), 4);
        assert_eq!(i, [0, 2, 1, 1, 2, 3]);
        assert!(i.iter().all(|&n| (n as usize) < v.len()));
    }
}
