use rand::seq::SliceRandom;
use rand::Rng;

use crate::scheduler::Millis;

/// Side length of the square a target occupies, in play-area units
pub const TARGET_SIZE: f64 = 80.0;

/// Maximum center-to-click distance that still counts as a hit (exclusive)
pub const HIT_TOLERANCE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Play-area size in units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TargetKind {
    Deer,
    Rabbit,
    Fox,
    Eagle,
}

impl TargetKind {
    pub const ALL: [TargetKind; 4] = [
        TargetKind::Deer,
        TargetKind::Rabbit,
        TargetKind::Fox,
        TargetKind::Eagle,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            TargetKind::Deer => "🦌",
            TargetKind::Rabbit => "🐇",
            TargetKind::Fox => "🦊",
            TargetKind::Eagle => "🦅",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// A single spawned target; lives until it is hit, despawns, or is replaced
#[derive(Debug, Clone, PartialEq)]
pub struct TargetInstance {
    pub id: TargetId,
    pub kind: TargetKind,
    /// Top-left corner of the target square
    pub position: Point,
    pub spawned_at: Millis,
    pub hit: bool,
}

impl TargetInstance {
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + TARGET_SIZE / 2.0,
            self.position.y + TARGET_SIZE / 2.0,
        )
    }

    /// Marks the target as hit. Returns false if it was already consumed.
    pub fn consume(&mut self) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Hit,
    Miss,
}

/// Places a new target uniformly inside `bounds`.
///
/// An axis narrower than [`TARGET_SIZE`] collapses to 0 rather than going negative.
pub fn spawn_target<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    id: TargetId,
    now: Millis,
) -> TargetInstance {
    let kind = *TargetKind::ALL
        .choose(rng)
        .unwrap_or(&TargetKind::Deer);

    let max_x = (bounds.width - TARGET_SIZE).max(0.0);
    let max_y = (bounds.height - TARGET_SIZE).max(0.0);

    TargetInstance {
        id,
        kind,
        position: Point::new(rng.gen::<f64>() * max_x, rng.gen::<f64>() * max_y),
        spawned_at: now,
        hit: false,
    }
}

pub fn resolve_interaction(point: Point, target: &TargetInstance) -> Interaction {
    if point.distance_to(target.center()) < HIT_TOLERANCE {
        Interaction::Hit
    } else {
        Interaction::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn centered_at(x: f64, y: f64) -> TargetInstance {
        TargetInstance {
            id: TargetId(1),
            kind: TargetKind::Fox,
            position: Point::new(x - TARGET_SIZE / 2.0, y - TARGET_SIZE / 2.0),
            spawned_at: 0,
            hit: false,
        }
    }

    #[test]
    fn test_hit_near_center() {
        let target = centered_at(100.0, 100.0);
        assert_eq!(
            resolve_interaction(Point::new(110.0, 110.0), &target),
            Interaction::Hit
        );
    }

    #[test]
    fn test_miss_far_from_center() {
        let target = centered_at(100.0, 100.0);
        assert_eq!(
            resolve_interaction(Point::new(150.0, 150.0), &target),
            Interaction::Miss
        );
    }

    #[test]
    fn test_tolerance_boundary_is_exclusive() {
        let target = centered_at(100.0, 100.0);
        assert_eq!(
            resolve_interaction(Point::new(140.0, 100.0), &target),
            Interaction::Miss
        );
        assert_eq!(
            resolve_interaction(Point::new(139.999, 100.0), &target),
            Interaction::Hit
        );
        assert_eq!(
            resolve_interaction(Point::new(100.0, 60.0), &target),
            Interaction::Miss
        );
    }

    #[test]
    fn test_consume_only_once() {
        let mut target = centered_at(0.0, 0.0);
        assert!(target.consume());
        assert!(target.hit);
        assert!(!target.consume());
    }

    #[test]
    fn test_spawn_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(400.0, 300.0);

        for i in 0..500 {
            let t = spawn_target(&mut rng, bounds, TargetId(i), i * 10);
            assert!(t.position.x >= 0.0 && t.position.x <= bounds.width - TARGET_SIZE);
            assert!(t.position.y >= 0.0 && t.position.y <= bounds.height - TARGET_SIZE);
            assert_eq!(t.id, TargetId(i));
            assert_eq!(t.spawned_at, i * 10);
            assert!(!t.hit);
        }
    }

    #[test]
    fn test_spawn_uses_every_kind() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = Bounds::new(400.0, 300.0);
        let kinds: HashSet<TargetKind> = (0..200)
            .map(|i| spawn_target(&mut rng, bounds, TargetId(i), 0).kind)
            .collect();
        assert_eq!(kinds.len(), TargetKind::ALL.len());
    }

    #[test]
    fn test_spawn_in_tiny_bounds_pins_to_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = spawn_target(&mut rng, Bounds::new(50.0, 80.0), TargetId(0), 0);
        assert_eq!(t.position, Point::new(0.0, 0.0));
        assert_eq!(t.center(), Point::new(40.0, 40.0));
    }

    #[test]
    fn test_spawn_is_deterministic_for_seed() {
        let bounds = Bounds::new(800.0, 600.0);
        let a = spawn_target(&mut StdRng::seed_from_u64(9), bounds, TargetId(3), 5);
        let b = spawn_target(&mut StdRng::seed_from_u64(9), bounds, TargetId(3), 5);
        assert_eq!(a, b);
    }
}
