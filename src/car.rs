use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use crate::config;
use crate::controls::{ControlMode, Controls};
use crate::geometry::{polygon_hits_polyline, polygons_intersect, Polygon};
use crate::network::{Network, NetworkError};
use crate::sensor::Sensor;

/// One car: kinematics, oriented bounding polygon, sticky damage state, and
/// the bridge between sensor readings and network outputs.
#[derive(Clone, Debug)]
pub struct Car {
    pub position: Vec2,
    /// Heading in radians, screen-space convention: 0 points up (-y),
    /// positive turns left.
    pub angle: f32,
    pub width: f32,
    pub height: f32,

    pub speed: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    pub friction: f32,

    /// Terminal once true: kinematics freeze, perception continues.
    pub damaged: bool,

    pub mode: ControlMode,
    pub controls: Controls,
    pub sensor: Option<Sensor>,
    pub network: Option<Network>,
    /// Raw outputs of the last forward pass, for external consumers
    /// (network diagram rendering lives outside this crate).
    pub last_outputs: Vec<f32>,

    polygon: Polygon,
}

impl Car {
    /// Dummy cars get neither sensor nor network; everything else gets both,
    /// sized so the sensor's ray count matches the network's input layer.
    pub fn new(position: Vec2, mode: ControlMode, max_speed: f32, rng: &mut impl Rng) -> Self {
        let (sensor, network) = match mode {
            ControlMode::Dummy => (None, None),
            _ => {
                let sensor = Sensor::default();
                let network = Network::random_driver(sensor.ray_count, rng);
                (Some(sensor), Some(network))
            }
        };

        let mut car = Self {
            position,
            angle: 0.0,
            width: config::CAR_WIDTH,
            height: config::CAR_HEIGHT,
            speed: 0.0,
            acceleration: config::CAR_ACCELERATION,
            max_speed,
            friction: config::CAR_FRICTION,
            damaged: false,
            mode,
            controls: Controls::new(mode),
            sensor,
            network,
            last_outputs: Vec::new(),
            polygon: Polygon::from([Vec2::ZERO; 4]),
        };
        car.polygon = car.bounding_polygon();
        car
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// One simulation tick.
    ///
    /// While alive: integrate the controls into the pose, recompute the
    /// bounding polygon, and check it against borders and obstacles. Damage
    /// is permanent. The sensor and network always run regardless of damage;
    /// only a self-driving car lets the outputs overwrite its controls.
    pub fn update(
        &mut self,
        borders: &[Vec<Vec2>],
        obstacles: &[Polygon],
    ) -> Result<(), NetworkError> {
        if !self.damaged {
            self.integrate();
            self.polygon = self.bounding_polygon();
            self.damaged = self.assess_damage(borders, obstacles);
        }

        if let Some(sensor) = &mut self.sensor {
            sensor.update(self.position, self.angle, borders, obstacles);
            if let Some(network) = &self.network {
                let outputs = network.forward(&sensor.inputs())?;
                if self.mode == ControlMode::SelfDriving {
                    self.controls = Controls::from_outputs(&outputs);
                }
                self.last_outputs = outputs;
            }
        }

        Ok(())
    }

    fn integrate(&mut self) {
        if self.controls.forward {
            self.speed += self.acceleration;
        }
        if self.controls.reverse {
            self.speed -= self.acceleration;
        }

        // Steering flips with travel direction, like real wheel steering.
        if self.speed != 0.0 {
            let flip = if self.speed > 0.0 { 1.0 } else { -1.0 };
            if self.controls.left {
                self.angle += config::CAR_STEER_RATE * flip;
            }
            if self.controls.right {
                self.angle -= config::CAR_STEER_RATE * flip;
            }
        }

        // Reverse is capped at half the forward max.
        self.speed = self.speed.clamp(-self.max_speed / 2.0, self.max_speed);

        if self.speed > 0.0 {
            self.speed -= self.friction;
        } else if self.speed < 0.0 {
            self.speed += self.friction;
        }
        // Snap to rest below the friction threshold, no perpetual creep.
        if self.speed.abs() < self.friction {
            self.speed = 0.0;
        }

        self.position.x -= self.angle.sin() * self.speed;
        self.position.y -= self.angle.cos() * self.speed;
    }

    /// Four corners of the oriented bounding box around the pose.
    fn bounding_polygon(&self) -> Polygon {
        let rad = self.width.hypot(self.height) / 2.0;
        let alpha = self.width.atan2(self.height);
        let corner = |theta: f32| {
            Vec2::new(
                self.position.x - theta.sin() * rad,
                self.position.y - theta.cos() * rad,
            )
        };

        Polygon::from([
            corner(self.angle - alpha),
            corner(self.angle + alpha),
            corner(PI + self.angle - alpha),
            corner(PI + self.angle + alpha),
        ])
    }

    fn assess_damage(&self, borders: &[Vec<Vec2>], obstacles: &[Polygon]) -> bool {
        if borders
            .iter()
            .any(|border| polygon_hits_polyline(&self.polygon, border))
        {
            return true;
        }
        obstacles
            .iter()
            .any(|obstacle| polygons_intersect(&self.polygon, obstacle))
    }
}
