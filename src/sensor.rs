use glam::Vec2;

use crate::config;
use crate::geometry::{lerp, segment_intersection, Intersection, Polygon};

/// Ray-fan proximity sensor.
///
/// Casts a fixed fan of rays from a pose and keeps the nearest intersection
/// per ray against the supplied road borders and obstacle polygons. Ray data
/// is retained so a renderer can draw the fan.
#[derive(Clone, Debug)]
pub struct Sensor {
    pub ray_count: usize,
    pub ray_length: f32,
    pub ray_spread: f32,
    /// (start, end) per ray, recomputed each update.
    pub rays: Vec<(Vec2, Vec2)>,
    pub readings: Vec<Option<Intersection>>,
}

impl Default for Sensor {
    fn default() -> Self {
        Self::new(
            config::SENSOR_RAY_COUNT,
            config::SENSOR_RAY_LENGTH,
            config::SENSOR_RAY_SPREAD,
        )
    }
}

impl Sensor {
    pub fn new(ray_count: usize, ray_length: f32, ray_spread: f32) -> Self {
        Self {
            ray_count,
            ray_length,
            ray_spread,
            rays: Vec::new(),
            readings: Vec::new(),
        }
    }

    /// Recast the fan from the given pose, then record the nearest hit per
    /// ray against every border chain and every obstacle polygon.
    ///
    /// When two edges produce the same minimum offset the first one found
    /// wins (borders before obstacles, each in input order). That tie-break
    /// is not guaranteed behavior.
    pub fn update(
        &mut self,
        position: Vec2,
        angle: f32,
        borders: &[Vec<Vec2>],
        obstacles: &[Polygon],
    ) {
        self.cast_rays(position, angle);
        self.readings.clear();
        for ray_i in 0..self.rays.len() {
            let (start, end) = self.rays[ray_i];
            self.readings
                .push(nearest_hit(start, end, borders, obstacles));
        }
    }

    /// Network inputs in [0, 1]: `1 - offset` per reading, so a close
    /// obstacle reads near 1 and a clear ray reads 0.
    pub fn inputs(&self) -> Vec<f32> {
        self.readings
            .iter()
            .map(|reading| match reading {
                Some(hit) => 1.0 - hit.offset,
                None => 0.0,
            })
            .collect()
    }

    /// Fan the rays symmetrically across `ray_spread`, centered on `angle`.
    /// Screen-space convention: y grows downward, angle 0 points up.
    fn cast_rays(&mut self, position: Vec2, angle: f32) {
        self.rays.clear();
        for ray_i in 0..self.ray_count {
            let t = if self.ray_count == 1 {
                0.5
            } else {
                ray_i as f32 / (self.ray_count - 1) as f32
            };
            let ray_angle = lerp(self.ray_spread / 2.0, -self.ray_spread / 2.0, t) + angle;

            let end = Vec2::new(
                position.x - ray_angle.sin() * self.ray_length,
                position.y - ray_angle.cos() * self.ray_length,
            );
            self.rays.push((position, end));
        }
    }
}

/// Minimum-offset intersection of one ray against borders and obstacles.
fn nearest_hit(
    start: Vec2,
    end: Vec2,
    borders: &[Vec<Vec2>],
    obstacles: &[Polygon],
) -> Option<Intersection> {
    let mut nearest: Option<Intersection> = None;

    let mut consider = |hit: Intersection| {
        // Strict comparison keeps the first-found hit on exact ties.
        match nearest {
            Some(best) if hit.offset >= best.offset => {}
            _ => nearest = Some(hit),
        }
    };

    for border in borders {
        for window in border.windows(2) {
            if let Some(hit) = segment_intersection(start, end, window[0], window[1]) {
                consider(hit);
            }
        }
    }

    for obstacle in obstacles {
        for (a, b) in obstacle.edges() {
            if let Some(hit) = segment_intersection(start, end, a, b) {
                consider(hit);
            }
        }
    }

    nearest
}
