use glam::Vec2;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::car::Car;
use crate::config;
use crate::controls::ControlMode;
use crate::geometry::Polygon;
use crate::network::NetworkError;
use crate::road::Road;
use crate::snapshot::NetworkSnapshot;

/// Traffic layout: (lane, y) pairs staggered up the corridor.
const TRAFFIC_SPAWNS: [(usize, f32); 7] = [
    (1, -100.0),
    (0, -300.0),
    (2, -300.0),
    (0, -500.0),
    (1, -500.0),
    (1, -700.0),
    (2, -700.0),
];

/// The whole corridor world: one road, a population of self-driving cars,
/// and scripted dummy traffic.
///
/// Stepping is single-threaded and cooperative: traffic first, then every
/// car in array order. Cars only ever read each other's polygons; no car
/// mutates another.
pub struct Simulation {
    pub road: Road,
    pub cars: Vec<Car>,
    pub traffic: Vec<Car>,
    pub rng: ChaCha8Rng,
    pub tick_count: u64,
}

impl Simulation {
    /// `car_count` self-driving cars on the spawn lane, with the stock
    /// traffic layout. The seed fixes every random draw (initial networks
    /// and later mutations), so equal seeds give equal runs.
    pub fn new(car_count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let road = Road::new(100.0, 180.0, config::ROAD_LANE_COUNT);

        let spawn = Vec2::new(road.lane_center(config::SPAWN_LANE), config::SPAWN_Y);
        let cars = (0..car_count)
            .map(|_| {
                Car::new(
                    spawn,
                    ControlMode::SelfDriving,
                    config::CAR_MAX_SPEED,
                    &mut rng,
                )
            })
            .collect();

        let traffic = TRAFFIC_SPAWNS
            .iter()
            .map(|&(lane, y)| {
                Car::new(
                    Vec2::new(road.lane_center(lane), y),
                    ControlMode::Dummy,
                    config::TRAFFIC_MAX_SPEED,
                    &mut rng,
                )
            })
            .collect();

        Self {
            road,
            cars,
            traffic,
            rng,
            tick_count: 0,
        }
    }

    /// Fresh generation grown from a champion snapshot: new cars at the
    /// spawn, the first an exact copy, the rest mutated by the default
    /// amount.
    pub fn from_snapshot(
        snapshot: &NetworkSnapshot,
        car_count: usize,
        seed: u64,
    ) -> Result<Self, NetworkError> {
        let mut sim = Self::new(car_count, seed);
        sim.seed_from(snapshot, config::DEFAULT_MUTATION_AMOUNT)?;
        Ok(sim)
    }

    /// One tick: traffic advances unobstructed, then every car updates
    /// against the road borders and the traffic polygons.
    pub fn tick(&mut self) -> Result<(), NetworkError> {
        for dummy in &mut self.traffic {
            dummy.update(&[], &[])?;
        }

        let obstacles: Vec<Polygon> = self
            .traffic
            .iter()
            .map(|dummy| dummy.polygon().clone())
            .collect();

        for car in &mut self.cars {
            car.update(&self.road.borders, &obstacles)?;
        }

        self.tick_count += 1;
        Ok(())
    }

    /// The fittest car: furthest traveled up the corridor (minimum y).
    pub fn best_car(&self) -> Option<&Car> {
        self.cars
            .iter()
            .min_by(|a, b| a.position.y.total_cmp(&b.position.y))
    }

    /// Snapshot of the fittest car's network, if any car has one.
    pub fn best_snapshot(&self) -> Option<NetworkSnapshot> {
        self.best_car()
            .and_then(|car| car.network.as_ref())
            .map(NetworkSnapshot::from_network)
    }

    /// Hill-climbing generation step: install the snapshot in every car,
    /// mutating all but the first by `amount`. The unmutated first car keeps
    /// the champion alive while the rest explore around it.
    pub fn seed_from(
        &mut self,
        snapshot: &NetworkSnapshot,
        amount: f32,
    ) -> Result<(), NetworkError> {
        for (i, car) in self.cars.iter_mut().enumerate() {
            let mut network = snapshot.to_network()?;
            if i > 0 {
                network.mutate(amount, &mut self.rng);
            }
            car.network = Some(network);
        }
        info!(
            "seeded {} cars from snapshot, mutation amount {}",
            self.cars.len(),
            amount
        );
        Ok(())
    }

    pub fn alive_count(&self) -> usize {
        self.cars.iter().filter(|car| !car.damaged).count()
    }
}
