use rand::Rng;
use thiserror::Error;

use crate::config;
use crate::geometry::lerp;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A network needs an input size and an output size at minimum.
    #[error("network topology needs at least 2 layer sizes, got {0}")]
    InvalidTopology(usize),
    /// Adjacent levels must chain: one level's outputs feed the next's inputs.
    #[error("level {index} output size {output} does not feed next level input size {input}")]
    BrokenChain {
        index: usize,
        output: usize,
        input: usize,
    },
    /// Every weight row must have exactly `output_size` entries.
    #[error("ragged weight matrix in level {0}")]
    RaggedLevel(usize),
    #[error("input length {got} does not match first level input size {expected}")]
    InvalidInput { expected: usize, got: usize },
}

/// One affine-plus-threshold stage of the network.
///
/// `weights[j][i]` connects input unit `j` to output unit `i`. Dimensions are
/// fixed at construction; only the values change, via [`Network::mutate`] or a
/// snapshot load.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub input_size: usize,
    pub output_size: usize,
    pub weights: Vec<Vec<f32>>,
    pub biases: Vec<f32>,
}

impl Level {
    /// New level with every weight and bias drawn uniformly from [-1, 1].
    pub fn random(input_size: usize, output_size: usize, rng: &mut impl Rng) -> Self {
        let weights = (0..input_size)
            .map(|_| (0..output_size).map(|_| rng.gen_range(-1.0..1.0)).collect())
            .collect();
        let biases = (0..output_size).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Self {
            input_size,
            output_size,
            weights,
            biases,
        }
    }

    /// Per output unit: weighted input sum, then a hard threshold against the
    /// unit's bias. Outputs are binary control signals, not probabilities.
    fn feed_forward(&self, inputs: &[f32]) -> Vec<f32> {
        let mut outputs = vec![0.0; self.output_size];
        for i in 0..self.output_size {
            let mut sum = 0.0;
            for (j, input) in inputs.iter().enumerate() {
                sum += input * self.weights[j][i];
            }
            outputs[i] = if sum > self.biases[i] { 1.0 } else { 0.0 };
        }
        outputs
    }
}

/// Feed-forward perceptron network: an ordered chain of [`Level`]s.
///
/// The shape is immutable after construction. The only "learning" operator is
/// [`mutate`](Network::mutate) — hill-climbing by copy, perturb, and
/// fitness-based retention, with retention policy left to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    levels: Vec<Level>,
}

impl Network {
    /// Build `layer_sizes.len() - 1` randomly initialized levels.
    pub fn new(layer_sizes: &[usize], rng: &mut impl Rng) -> Result<Self, NetworkError> {
        if layer_sizes.len() < 2 {
            return Err(NetworkError::InvalidTopology(layer_sizes.len()));
        }
        let levels = layer_sizes
            .windows(2)
            .map(|pair| Level::random(pair[0], pair[1], rng))
            .collect();
        Ok(Self { levels })
    }

    /// Standard driving topology: one level from `ray_count` sensor readings
    /// straight to the four control channels.
    pub fn random_driver(ray_count: usize, rng: &mut impl Rng) -> Self {
        Self {
            levels: vec![Level::random(ray_count, config::CONTROL_CHANNELS, rng)],
        }
    }

    /// Assemble a network from pre-built levels, validating that dimensions
    /// are rectangular and adjacent levels chain. Used by snapshot loading.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self, NetworkError> {
        if levels.is_empty() {
            return Err(NetworkError::InvalidTopology(levels.len()));
        }
        for (index, level) in levels.iter().enumerate() {
            if level.weights.len() != level.input_size
                || level.biases.len() != level.output_size
                || level.weights.iter().any(|row| row.len() != level.output_size)
            {
                return Err(NetworkError::RaggedLevel(index));
            }
        }
        for (index, pair) in levels.windows(2).enumerate() {
            if pair[0].output_size != pair[1].input_size {
                return Err(NetworkError::BrokenChain {
                    index,
                    output: pair[0].output_size,
                    input: pair[1].input_size,
                });
            }
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn input_size(&self) -> usize {
        self.levels[0].input_size
    }

    pub fn output_size(&self) -> usize {
        self.levels[self.levels.len() - 1].output_size
    }

    /// Feed `inputs` through every level in order and return the final
    /// level's outputs. Pure: identical state and inputs give identical
    /// outputs.
    pub fn forward(&self, inputs: &[f32]) -> Result<Vec<f32>, NetworkError> {
        let expected = self.input_size();
        if inputs.len() != expected {
            return Err(NetworkError::InvalidInput {
                expected,
                got: inputs.len(),
            });
        }

        let mut outputs = self.levels[0].feed_forward(inputs);
        for level in &self.levels[1..] {
            outputs = level.feed_forward(&outputs);
        }
        Ok(outputs)
    }

    /// Pull every weight and bias toward a fresh uniform [-1, 1] draw by
    /// `amount`. `amount = 0` leaves the network bit-identical; `amount = 1`
    /// discards the current parameters entirely.
    pub fn mutate(&mut self, amount: f32, rng: &mut impl Rng) {
        for level in &mut self.levels {
            for bias in &mut level.biases {
                *bias = lerp(*bias, rng.gen_range(-1.0..1.0), amount);
            }
            for row in &mut level.weights {
                for weight in row {
                    *weight = lerp(*weight, rng.gen_range(-1.0..1.0), amount);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn new_rejects_fewer_than_two_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            Network::new(&[5], &mut rng).unwrap_err(),
            NetworkError::InvalidTopology(1)
        );
        assert_eq!(
            Network::new(&[], &mut rng).unwrap_err(),
            NetworkError::InvalidTopology(0)
        );
    }

    #[test]
    fn new_builds_chained_levels_with_bounded_params() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let net = Network::new(&[5, 6, 4], &mut rng).unwrap();

        assert_eq!(net.levels().len(), 2);
        assert_eq!(net.input_size(), 5);
        assert_eq!(net.output_size(), 4);
        for level in net.levels() {
            assert!(level.biases.iter().all(|b| (-1.0..1.0).contains(b)));
            assert!(level
                .weights
                .iter()
                .all(|row| row.iter().all(|w| (-1.0..1.0).contains(w))));
        }
    }

    #[test]
    fn forward_applies_hard_threshold() {
        let level = Level {
            input_size: 2,
            output_size: 1,
            weights: vec![vec![1.0], vec![1.0]],
            biases: vec![0.5],
        };
        let net = Network::from_levels(vec![level]).unwrap();

        assert_eq!(net.forward(&[1.0, 1.0]).unwrap(), vec![1.0]); // 2 > 0.5
        assert_eq!(net.forward(&[0.0, 0.0]).unwrap(), vec![0.0]); // 0 <= 0.5
    }

    #[test]
    fn forward_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let net = Network::new(&[5, 4], &mut rng).unwrap();
        let inputs = [0.1, 0.9, 0.0, 0.5, 0.3];
        assert_eq!(net.forward(&inputs).unwrap(), net.forward(&inputs).unwrap());
    }

    #[test]
    fn forward_rejects_wrong_input_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let net = Network::new(&[5, 4], &mut rng).unwrap();
        assert_eq!(
            net.forward(&[0.0; 3]).unwrap_err(),
            NetworkError::InvalidInput {
                expected: 5,
                got: 3
            }
        );
    }

    #[test]
    fn mutate_zero_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut net = Network::new(&[5, 6, 4], &mut rng).unwrap();
        let before = net.clone();

        net.mutate(0.0, &mut rng);
        assert_eq!(net, before);
    }

    #[test]
    fn mutate_one_replaces_but_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut net = Network::new(&[5, 4], &mut rng).unwrap();
        let before = net.clone();

        net.mutate(1.0, &mut rng);
        assert_ne!(net, before);
        for level in net.levels() {
            assert!(level.biases.iter().all(|b| (-1.0..1.0).contains(b)));
            assert!(level
                .weights
                .iter()
                .all(|row| row.iter().all(|w| (-1.0..1.0).contains(w))));
        }
    }

    #[test]
    fn from_levels_rejects_broken_chain() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = Level::random(5, 6, &mut rng);
        let b = Level::random(4, 2, &mut rng);
        assert_eq!(
            Network::from_levels(vec![a, b]).unwrap_err(),
            NetworkError::BrokenChain {
                index: 0,
                output: 6,
                input: 4
            }
        );
    }

    #[test]
    fn from_levels_rejects_ragged_weights() {
        let level = Level {
            input_size: 2,
            output_size: 2,
            weights: vec![vec![0.0, 0.0], vec![0.0]],
            biases: vec![0.0, 0.0],
        };
        assert_eq!(
            Network::from_levels(vec![level]).unwrap_err(),
            NetworkError::RaggedLevel(0)
        );
    }
}
