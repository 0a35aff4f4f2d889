// All tunable simulation constants in one place.

use std::f32::consts::PI;

// Sensor
pub const SENSOR_RAY_COUNT: usize = 5;
pub const SENSOR_RAY_LENGTH: f32 = 150.0;
pub const SENSOR_RAY_SPREAD: f32 = PI / 4.0;

// Car body
pub const CAR_WIDTH: f32 = 30.0;
pub const CAR_HEIGHT: f32 = 50.0;

// Car kinematics
pub const CAR_ACCELERATION: f32 = 0.2;
pub const CAR_FRICTION: f32 = 0.05;
pub const CAR_MAX_SPEED: f32 = 3.0;
pub const CAR_STEER_RATE: f32 = 0.03;
pub const TRAFFIC_MAX_SPEED: f32 = 2.0;

// Network: one level from the ray readings straight to the four
// control channels (forward, left, right, reverse).
pub const CONTROL_CHANNELS: usize = 4;

// Road
pub const ROAD_LANE_COUNT: usize = 3;
pub const ROAD_SPAN: f32 = 1_000_000.0;
pub const WINDING_CURVE_FREQUENCY: f32 = 0.01;
pub const WINDING_CURVE_AMPLITUDE: f32 = 50.0;

// Simulation
pub const DEFAULT_CAR_COUNT: usize = 100;
pub const DEFAULT_MUTATION_AMOUNT: f32 = 0.1;
pub const SPAWN_Y: f32 = 100.0;
pub const SPAWN_LANE: usize = 1;
