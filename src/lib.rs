//! Corridor: autonomous cars in a lane-constrained corridor.
//!
//! Each car is steered by a minimal feed-forward perceptron whose binary
//! outputs map straight onto its control channels. There is no gradient
//! learning anywhere: networks improve only through random perturbation
//! ([`Network::mutate`](network::Network::mutate)) and fitness-based
//! retention of the car that travels furthest.
//!
//! The crate is headless. Rendering, keyboard input, and the frame loop are
//! the caller's concern; every tick exposes poses, polygons, sensor rays,
//! readings, and raw network outputs for them to draw.

pub mod car;
pub mod config;
pub mod controls;
pub mod geometry;
pub mod network;
pub mod road;
pub mod sensor;
pub mod simulation;
pub mod snapshot;

pub use car::Car;
pub use controls::{ControlMode, Controls};
pub use geometry::{Intersection, Polygon};
pub use network::{Network, NetworkError};
pub use road::Road;
pub use sensor::Sensor;
pub use simulation::Simulation;
pub use snapshot::{NetworkSnapshot, SnapshotError};
