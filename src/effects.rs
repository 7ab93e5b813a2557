use rand::seq::SliceRandom;
use rand::Rng;

use crate::scheduler::Millis;
use crate::target::Point;

/// How long a hit burst stays on screen
pub const BURST_MS: Millis = 300;

const SPARKS_PER_BURST: usize = 8;
const GRAVITY: f64 = 600.0; // units/s²

/// One flying spark of a hit burst
#[derive(Debug, Clone)]
pub struct Spark {
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
}

impl Spark {
    fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            vel_x: rng.gen_range(-220.0..220.0),
            vel_y: rng.gen_range(-260.0..-60.0),
            symbol: *['*', '+', '·', '✦', '✧'].choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..6),
        }
    }
}

/// Feedback drawn where a target was hit
#[derive(Debug, Clone)]
pub struct HitBurst {
    pub origin: Point,
    pub label: String,
    pub started_at: Millis,
    pub sparks: Vec<Spark>,
}

impl HitBurst {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, origin: Point, reward: u32, now: Millis) -> Self {
        Self {
            origin,
            label: format!("+{reward}"),
            started_at: now,
            sparks: (0..SPARKS_PER_BURST).map(|_| Spark::new(rng)).collect(),
        }
    }

    pub fn is_alive(&self, now: Millis) -> bool {
        now.saturating_sub(self.started_at) < BURST_MS
    }

    /// Spark positions `now` ms into the burst, ballistic from the origin
    pub fn spark_positions(&self, now: Millis) -> Vec<(Point, &Spark)> {
        let t = now.saturating_sub(self.started_at) as f64 / 1000.0;
        self.sparks
            .iter()
            .map(|s| {
                let p = Point::new(
                    self.origin.x + s.vel_x * t,
                    self.origin.y + s.vel_y * t + 0.5 * GRAVITY * t * t,
                );
                (p, s)
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct Effects {
    bursts: Vec<HitBurst>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&mut self, origin: Point, reward: u32, now: Millis) {
        let mut rng = rand::thread_rng();
        self.bursts.push(HitBurst::new(&mut rng, origin, reward, now));
    }

    /// Drops bursts that have played out
    pub fn update(&mut self, now: Millis) {
        self.bursts.retain(|b| b.is_alive(now));
    }

    pub fn bursts(&self) -> &[HitBurst] {
        &self.bursts
    }

    pub fn is_active(&self) -> bool {
        !self.bursts.is_empty()
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
    }
}
