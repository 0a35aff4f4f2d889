use glam::Vec2;

use crate::config;
use crate::geometry::lerp;

/// A vertical corridor of lanes. The corridor extends toward -y ("up" in the
/// screen-space convention); only the two side borders are collidable.
#[derive(Clone, Debug)]
pub struct Road {
    pub x: f32,
    pub width: f32,
    pub lane_count: usize,
    pub left: f32,
    pub right: f32,
    /// Border polylines, left then right. Open chains, not closed shapes.
    pub borders: Vec<Vec<Vec2>>,
}

impl Road {
    /// Straight corridor centered on `x`.
    pub fn new(x: f32, width: f32, lane_count: usize) -> Self {
        let left = x - width / 2.0;
        let right = x + width / 2.0;
        let span = config::ROAD_SPAN;

        let borders = vec![
            vec![Vec2::new(left, -span), Vec2::new(left, span)],
            vec![Vec2::new(right, -span), Vec2::new(right, span)],
        ];

        Self {
            x,
            width,
            lane_count,
            left,
            right,
            borders,
        }
    }

    /// S-curve corridor: the borders weave sideways on a sine along the
    /// upper kilometer of the span, then run straight to the far corners.
    pub fn winding(x: f32, width: f32, lane_count: usize) -> Self {
        let mut road = Self::new(x, width, lane_count);

        let mut left_border = vec![Vec2::new(road.left, -config::ROAD_SPAN)];
        let mut right_border = vec![Vec2::new(road.right, -config::ROAD_SPAN)];
        let mut y = -1000.0f32;
        while y <= 0.0 {
            let x_off = (y * config::WINDING_CURVE_FREQUENCY).sin() * config::WINDING_CURVE_AMPLITUDE;
            left_border.push(Vec2::new(road.left + x_off, y));
            right_border.push(Vec2::new(road.right + x_off, y));
            y += 1.0;
        }
        left_border.push(Vec2::new(road.left, config::ROAD_SPAN));
        right_border.push(Vec2::new(road.right, config::ROAD_SPAN));

        road.borders = vec![left_border, right_border];
        road
    }

    /// Center x of a lane; out-of-range indices clamp to the last lane.
    pub fn lane_center(&self, lane: usize) -> f32 {
        let lane_width = self.width / self.lane_count as f32;
        self.left + lane_width / 2.0 + lane.min(self.lane_count - 1) as f32 * lane_width
    }

    /// Divider x positions between lanes, for rendering callers.
    pub fn lane_dividers(&self) -> Vec<f32> {
        (1..self.lane_count)
            .map(|i| lerp(self.left, self.right, i as f32 / self.lane_count as f32))
            .collect()
    }
}
