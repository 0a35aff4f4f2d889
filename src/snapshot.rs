use std::fs;
use std::io;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::{Level, Network, NetworkError};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Serialized parameters of one level: weight rows indexed by input unit,
/// then the bias vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub weights: Vec<Vec<f32>>,
    pub biases: Vec<f32>,
}

/// Plain nested-array snapshot of a network: `{ levels: [{weights, biases}] }`.
///
/// This is the only persistence surface of the crate. Which cars receive a
/// loaded snapshot, and with what mutation amount, is the caller's policy —
/// see [`Simulation::seed_from`](crate::simulation::Simulation::seed_from).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub levels: Vec<LevelSnapshot>,
}

impl NetworkSnapshot {
    pub fn from_network(network: &Network) -> Self {
        let levels = network
            .levels()
            .iter()
            .map(|level| LevelSnapshot {
                weights: level.weights.clone(),
                biases: level.biases.clone(),
            })
            .collect();
        Self { levels }
    }

    /// Rebuild a network, re-deriving level sizes from the parameter shapes.
    /// Malformed snapshots (empty, ragged, or non-chaining levels) fail with
    /// the corresponding [`NetworkError`].
    pub fn to_network(&self) -> Result<Network, NetworkError> {
        let levels = self
            .levels
            .iter()
            .map(|level| Level {
                input_size: level.weights.len(),
                output_size: level.biases.len(),
                weights: level.weights.clone(),
                biases: level.biases.clone(),
            })
            .collect();
        Network::from_levels(levels)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        info!("saved network snapshot to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path.as_ref())?;
        let snapshot = serde_json::from_str(&json)?;
        info!("loaded network snapshot from {}", path.as_ref().display());
        Ok(snapshot)
    }
}
