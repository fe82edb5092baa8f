//! Spring-mesh deformation driven by touches.
//!
//! Each step: active touches drag nearby nodes toward the touch point, every
//! node's velocity is pulled toward its rest position, links between
//! neighbours push toward their rest spacing, then velocity is integrated
//! and damped.

use glam::{Vec2, Vec3};

use crate::mesh::GridMesh;

pub const MAX_TOUCHES: usize = 5;

/// Gain applied to link-length error each step.
const LINK_GAIN: f32 = 0.005;
/// Numerator of the touch falloff `k / d²`. Larger widens the dragged region.
const TOUCH_REACH: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub home_speed_range: (f32, f32),
    pub damping_range: (f32, f32),
    /// Initial slider position for both ranges.
    pub default_slider: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            home_speed_range: (0.00001, 0.026),
            damping_range: (0.79, 0.995),
            default_slider: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Touch {
    point: Vec2,
    active: bool,
    node: (i64, i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Down,
    Right,
}

pub struct MeshSim {
    mesh: GridMesh,
    config: SimConfig,
    velocity: Vec<Vec3>,
    /// `[down, right]` neighbour of each node.
    links: Vec<[Option<usize>; 2]>,
    touches: [Touch; MAX_TOUCHES],
    home_speed: f32,
    damping: f32,
    pub frozen: bool,
}

impl MeshSim {
    pub fn new(mesh: GridMesh, config: SimConfig) -> Self {
        let links = (0..mesh.rows() as i64)
            .flat_map(|y| (0..mesh.columns() as i64).map(move |x| (x, y)))
            .map(|(x, y)| [mesh.index_of(x, y + 1), mesh.index_of(x + 1, y)])
            .collect();
        let velocity = vec![Vec3::ZERO; mesh.vertices().len()];
        let mut sim = Self {
            mesh,
            config,
            velocity,
            links,
            touches: [Touch::default(); MAX_TOUCHES],
            home_speed: 0.0,
            damping: 0.0,
            frozen: false,
        };
        sim.reset();
        sim
    }

    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    pub fn home_speed(&self) -> f32 {
        self.home_speed
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Map a `[0, 1]` slider onto the home-pull speed.
    pub fn set_home_speed(&mut self, slider: f32) {
        let (lo, hi) = self.config.home_speed_range;
        self.home_speed = lo + (hi - lo) * slider.clamp(0.0, 1.0);
    }

    /// Map a `[0, 1]` slider onto the per-step velocity damping factor.
    pub fn set_damping(&mut self, slider: f32) {
        let (lo, hi) = self.config.damping_range;
        self.damping = lo + (hi - lo) * slider.clamp(0.0, 1.0);
    }

    /// Update touch `slot` to `point` (mesh space). A touch that was not active
    /// binds to the nearest node; returns `true` when that happens. Non-finite
    /// points are ignored.
    pub fn touch_move(&mut self, slot: usize, point: Vec2) -> bool {
        if slot >= MAX_TOUCHES {
            return false;
        }
        if !point.is_finite() {
            log::warn!("touch {slot} ignored: non-finite point {point:?}");
            return false;
        }
        let newly_active = !self.touches[slot].active;
        self.touches[slot].point = point;
        if newly_active {
            let node = self.nearest_node(point);
            self.touches[slot].active = true;
            self.touches[slot].node = node;
            log::debug!("touch {slot} bound to node {node:?}");
        }
        newly_active
    }

    pub fn touch_end(&mut self) {
        for t in &mut self.touches {
            t.active = false;
        }
    }

    pub fn active_touches(&self) -> usize {
        self.touches.iter().filter(|t| t.active).count()
    }

    fn nearest_node(&self, point: Vec2) -> (i64, i64) {
        let columns = self.mesh.columns();
        let mut best = (0, 0);
        let mut best_dist = f32::MAX;
        for (i, v) in self.mesh.vertices().iter().enumerate() {
            let d = v.position().truncate().distance(point);
            if d < best_dist {
                best_dist = d;
                best = ((i % columns) as i64, (i / columns) as i64);
            }
        }
        best
    }

    /// Advance the simulation one step. No-op while frozen.
    pub fn step(&mut self) {
        if self.frozen {
            return;
        }
        self.drag_toward_touches();
        self.pull_home();
        self.apply_links();
        self.integrate();
    }

    fn drag_toward_touches(&mut self) {
        let columns = self.mesh.columns() as i64;
        let rows = self.mesh.rows() as i64;
        let spacing = self.mesh.spacing();

        for touch in self.touches.iter().filter(|t| t.active) {
            let (nx, ny) = touch.node;
            for dy in -rows..=rows {
                for dx in -columns..=columns {
                    let Some(idx) = self.mesh.index_of(nx + dx, ny + dy) else {
                        continue;
                    };
                    let ratio = if dx == 0 && dy == 0 {
                        1.0
                    } else {
                        (TOUCH_REACH / (dx * dx + dy * dy) as f32).min(1.0)
                    };
                    let target = touch.point + Vec2::new(dx as f32, dy as f32) * spacing;
                    let v = &mut self.mesh.vertices_mut()[idx];
                    let mut p = v.position();
                    p.x += (target.x - p.x) * ratio;
                    p.y += (target.y - p.y) * ratio;
                    v.set_position(p);
                }
            }
        }
    }

    fn pull_home(&mut self) {
        let rest = self.mesh.rest_positions();
        for ((vel, v), r) in self.velocity.iter_mut().zip(self.mesh.vertices()).zip(rest) {
            let p = v.position();
            vel.x -= self.home_speed * (p.x - r.x);
            vel.y -= self.home_speed * (p.y - r.y);
        }
    }

    fn apply_links(&mut self) {
        let spacing = self.mesh.spacing();
        let vertices = self.mesh.vertices();
        for (a, links) in self.links.iter().enumerate() {
            for (kind, b) in [(Link::Down, links[0]), (Link::Right, links[1])] {
                let Some(b) = b else { continue };
                let delta = vertices[a].position() - vertices[b].position();
                let actual = delta.length();
                if actual == 0.0 {
                    continue;
                }
                let desired = match kind {
                    Link::Right => spacing.x,
                    Link::Down => spacing.y,
                };
                let push = delta * (LINK_GAIN * (desired - actual) / actual);
                self.velocity[a] += push;
                self.velocity[b] -= push;
            }
        }
    }

    fn integrate(&mut self) {
        let damping = self.damping;
        for (v, vel) in self.mesh.vertices_mut().iter_mut().zip(&mut self.velocity) {
            v.set_position(v.position() + *vel);
            *vel *= damping;
        }
    }

    /// Back to rest: positions, velocities, touches, speeds and freeze all reset.
    pub fn reset(&mut self) {
        self.frozen = false;
        self.set_home_speed(self.config.default_slider);
        self.set_damping(self.config.default_slider);
        self.mesh.reset_positions();
        self.velocity.fill(Vec3::ZERO);
        self.touch_end();
    }
}

/// Map a window-space point (pixels, y down) to mesh space (`[0, 1]`, y up).
/// Viewport sides below one pixel are treated as one.
pub fn normalize_touch(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(x / width.max(1.0), 1.0 - y / height.max(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshConfig;

    fn sim(columns: usize) -> MeshSim {
        let mesh = GridMesh::new(&MeshConfig { columns }, 1.0).unwrap();
        MeshSim::new(mesh, SimConfig::default())
    }

    fn max_offset(s: &MeshSim) -> f32 {
        s.mesh()
            .vertices()
            .iter()
            .zip(s.mesh().rest_positions())
            .map(|(v, r)| v.position().distance(*r))
            .fold(0.0, f32::max)
    }

    #[test]
    fn defaults_are_slider_midpoints() {
        let s = sim(4);
        assert!((s.home_speed() - (0.00001 + 0.026) / 2.0).abs() < 1e-7);
        assert!((s.damping() - (0.79 + 0.995) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn sliders_clamp() {
        let mut s = sim(4);
        s.set_home_speed(2.0);
        s.set_damping(-1.0);
        assert_eq!(s.home_speed(), 0.026);
        assert_eq!(s.damping(), 0.79);
    }

    #[test]
    fn at_rest_stays_at_rest() {
        let mut s = sim(6);
        for _ in 0..10 {
            s.step();
        }
        assert!(max_offset(&s) < 1e-5, "drifted {}", max_offset(&s));
    }

    #[test]
    fn touch_binds_nearest_node_and_drags_it() {
        let mut s = sim(5);
        assert!(s.touch_move(0, Vec2::new(0.26, 0.74)));
        assert!(!s.touch_move(0, Vec2::new(0.3, 0.7)));
        assert_eq!(s.active_touches(), 1);
        s.step();
        let idx = s.mesh().index_of(1, 3).unwrap();
        let p = s.mesh().vertices()[idx].position();
        // node (1,3) rests at (0.25, 0.75); pulled onto the touch then nudged by springs
        assert!((p.x - 0.3).abs() < 0.01, "{p:?}");
        assert!((p.y - 0.7).abs() < 0.01, "{p:?}");
    }

    #[test]
    fn touch_slot_out_of_range_is_ignored() {
        let mut s = sim(4);
        assert!(!s.touch_move(MAX_TOUCHES, Vec2::ZERO));
        assert_eq!(s.active_touches(), 0);
    }

    #[test]
    fn released_mesh_returns_home() {
        let mut s = sim(6);
        s.set_home_speed(1.0);
        s.set_damping(0.0);
        s.touch_move(0, Vec2::new(0.5, 0.5));
        s.touch_move(0, Vec2::new(0.9, 0.1));
        s.step();
        let displaced = max_offset(&s);
        assert!(displaced > 0.1);
        s.touch_end();
        for _ in 0..2000 {
            s.step();
        }
        assert!(max_offset(&s) < displaced * 0.1, "still {}", max_offset(&s));
    }

    #[test]
    fn frozen_mesh_does_not_move() {
        let mut s = sim(5);
        s.touch_move(0, Vec2::new(0.9, 0.9));
        s.frozen = true;
        s.step();
        assert_eq!(max_offset(&s), 0.0);
    }

    #[test]
    fn reset_restores_everything() {
        let mut s = sim(5);
        s.touch_move(0, Vec2::new(0.9, 0.1));
        s.set_damping(1.0);
        s.step();
        s.frozen = true;
        s.reset();
        assert!(!s.frozen);
        assert_eq!(s.active_touches(), 0);
        assert_eq!(max_offset(&s), 0.0);
        assert!((s.damping() - (0.79 + 0.995) / 2.0).abs() < 1e-6);
    }

    fn all_finite(s: &MeshSim) -> bool {
        s.mesh().vertices().iter().all(|v| v.position().is_finite())
    }

    #[test]
    fn zero_sized_viewport_touch_keeps_mesh_finite() {
        let mut s = sim(4);
        let p = normalize_touch(10.0, 10.0, 0.0, 0.0);
        assert!(p.is_finite(), "{p:?}");
        s.touch_move(0, p);
        s.step();
        assert!(all_finite(&s));
    }

    #[test]
    fn non_finite_touch_is_ignored() {
        let mut s = sim(4);
        assert!(!s.touch_move(0, Vec2::new(f32::NAN, 0.5)));
        assert!(!s.touch_move(1, Vec2::new(f32::INFINITY, 0.5)));
        assert_eq!(s.active_touches(), 0);
        s.step();
        assert!(all_finite(&s));
        assert!(max_offset(&s) < 1e-5);
    }

    #[test]
    fn two_touches_drag_both_regions() {
        let mut s = sim(12);
        // opposite corners, far enough apart that each touch's full-weight zone
        // (d² <= 10) stays on its own side
        assert!(s.touch_move(0, Vec2::ZERO));
        assert!(s.touch_move(1, Vec2::ONE));
        assert_eq!(s.active_touches(), 2);
        s.touch_move(0, Vec2::new(0.05, 0.0));
        s.touch_move(1, Vec2::new(0.95, 1.0));
        s.step();

        let near_a = s.mesh().index_of(0, 0).unwrap();
        let near_b = s.mesh().index_of(11, 11).unwrap();
        let pa = s.mesh().vertices()[near_a].position();
        let pb = s.mesh().vertices()[near_b].position();
        let rest = s.mesh().rest_positions();
        assert!((pa.x - 0.05).abs() < 0.01, "{pa:?}");
        assert!((pb.x - 0.95).abs() < 0.01, "{pb:?}");
        assert!(pa.distance(rest[near_a]) > 0.03);
        assert!(pb.distance(rest[near_b]) > 0.03);
    }

    #[test]
    fn normalize_touch_flips_y() {
        assert_eq!(normalize_touch(0.0, 0.0, 200.0, 100.0), Vec2::new(0.0, 1.0));
        assert_eq!(normalize_touch(100.0, 100.0, 200.0, 100.0), Vec2::new(0.5, 0.0));
    }
}
