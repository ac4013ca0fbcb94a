//! Dense feed-forward network used as a bird's brain.
//!
//! The topology is declared one layer at a time and frozen by
//! [`Brain::build`]; it never changes afterwards. Evolution works on built
//! networks only: clone a parent, then perturb the clone in place.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand::{Rng, thread_rng};
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing, evaluating, or mutating a [`Brain`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BrainError {
    /// A layer was declared after the network was built.
    #[error("layers cannot be added to a built network")]
    TopologyFrozen,
    /// A layer was declared with zero nodes.
    #[error("layer {index} has zero nodes")]
    EmptyLayer {
        /// Position of the offending layer in declaration order.
        index: usize,
    },
    /// The network was built with fewer than two layers.
    #[error("a network needs at least two layers, got {0}")]
    TooFewLayers(usize),
    /// The network was evaluated before being built.
    #[error("the network has not been built")]
    NotBuilt,
    /// An input vector disagreed with the input layer's width.
    #[error("input has {actual} values but the input layer has {expected} nodes")]
    DimensionMismatch {
        /// Node count of the input layer.
        expected: usize,
        /// Length of the rejected input vector.
        actual: usize,
    },
    /// A mutation rate outside [0, 1] was requested.
    #[error("mutation rate {0} is outside [0, 1]")]
    InvalidMutationRate(f32),
}

/// A single fully-connected layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Dense {
    /// Creates a layer with independent weights and biases uniform in [-1, 1].
    fn new_random(input_size: usize, output_size: usize) -> Self {
        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-1.0, 1.0)),
            biases: Array1::random(output_size, Uniform::new(-1.0, 1.0)),
        }
    }

    /// Forward pass with logistic sigmoid activation.
    #[inline]
    fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(|z| 1.0 / (1.0 + (-z).exp()));
        output
    }

    /// Perturbs each scalar independently with probability `rate` by adding a
    /// standard-normal draw.
    fn mutate(&mut self, rate: f32, rng: &mut impl Rng) {
        for weight in &mut self.weights {
            if rng.gen_range(0.0..1.0f32) < rate {
                *weight += rng.sample::<f32, _>(StandardNormal);
            }
        }
        for bias in &mut self.biases {
            if rng.gen_range(0.0..1.0f32) < rate {
                *bias += rng.sample::<f32, _>(StandardNormal);
            }
        }
    }
}

/// Fixed-topology feed-forward network.
///
/// `Clone` is a deep copy: the clone shares no storage with its source, so
/// mutating one never touches the other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Brain {
    sizes: Vec<usize>,
    layers: Vec<Dense>,
}

impl Brain {
    /// Creates an empty network with no layers declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the next layer's node count.
    ///
    /// Fails once the network is built, or for a layer with zero nodes.
    pub fn add_layer(&mut self, nodes: usize) -> Result<&mut Self, BrainError> {
        if self.is_built() {
            return Err(BrainError::TopologyFrozen);
        }
        if nodes == 0 {
            return Err(BrainError::EmptyLayer {
                index: self.sizes.len(),
            });
        }
        self.sizes.push(nodes);
        Ok(self)
    }

    /// Freezes the topology and randomizes every weight and bias.
    ///
    /// At least two layers must have been declared. Building twice
    /// re-randomizes all parameters.
    pub fn build(&mut self) -> Result<(), BrainError> {
        if self.sizes.len() < 2 {
            return Err(BrainError::TooFewLayers(self.sizes.len()));
        }
        self.layers = self
            .sizes
            .windows(2)
            .map(|pair| Dense::new_random(pair[0], pair[1]))
            .collect();
        Ok(())
    }

    /// Builds a network directly from an ordered list of layer sizes.
    pub fn from_sizes(sizes: &[usize]) -> Result<Self, BrainError> {
        let mut brain = Self::new();
        for &nodes in sizes {
            brain.add_layer(nodes)?;
        }
        brain.build()?;
        Ok(brain)
    }

    /// Whether [`Brain::build`] has been called.
    pub fn is_built(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Node count of the input layer.
    pub fn input_size(&self) -> Option<usize> {
        self.sizes.first().copied()
    }

    /// Node count of the output layer.
    pub fn output_size(&self) -> Option<usize> {
        self.sizes.last().copied()
    }

    /// The built layers in input-to-output order.
    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    /// Evaluates the network on `inputs`.
    ///
    /// Pure: identical network state and input always produce identical
    /// output. The input length must match the input layer's node count.
    pub fn forward(&self, inputs: &Array1<f32>) -> Result<Array1<f32>, BrainError> {
        if !self.is_built() {
            return Err(BrainError::NotBuilt);
        }
        if inputs.len() != self.sizes[0] {
            return Err(BrainError::DimensionMismatch {
                expected: self.sizes[0],
                actual: inputs.len(),
            });
        }
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        Ok(output)
    }

    /// Mutates the network in place.
    ///
    /// Every individual weight and bias is perturbed independently with
    /// probability `rate` by adding a draw from a standard normal
    /// distribution; all other scalars are left untouched.
    pub fn mutate(&mut self, rate: f32) -> Result<(), BrainError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(BrainError::InvalidMutationRate(rate));
        }
        let mut rng = thread_rng();
        for layer in &mut self.layers {
            layer.mutate(rate, &mut rng);
        }
        Ok(())
    }
}
