use serde::{Deserialize, Serialize};

use crate::{ActFn, LossFn, MlErr, Result};

/// The shape and activation of a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub node_count: usize,
    pub activation: ActFn,
}

impl LayerConfig {
    /// Creates a new `LayerConfig`.
    ///
    /// # Arguments
    /// * `node_count` - The amount of nodes in the layer.
    /// * `activation` - The activation applied to the layer's outputs.
    pub fn new(node_count: usize, activation: ActFn) -> Self {
        Self {
            node_count,
            activation,
        }
    }
}

/// The architecture of a feed-forward network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_count: usize,
    pub loss: LossFn,
    pub layers: Vec<LayerConfig>,
}

impl NetworkConfig {
    /// Creates a new `NetworkConfig`.
    ///
    /// # Arguments
    /// * `input_count` - The width of every input row.
    /// * `loss` - The loss used to score the network.
    /// * `layers` - The layers in evaluation order, the last one sets the output width.
    pub fn new(input_count: usize, loss: LossFn, layers: Vec<LayerConfig>) -> Self {
        Self {
            input_count,
            loss,
            layers,
        }
    }

    /// Checks that the architecture can be built.
    ///
    /// # Returns
    /// `ConfigInvalid` if there are no inputs, no layers or an empty layer.
    pub fn validate(&self) -> Result<()> {
        if self.input_count == 0 {
            return Err(MlErr::ConfigInvalid(
                "the input count must be positive".to_string(),
            ));
        }

        if self.layers.is_empty() {
            return Err(MlErr::ConfigInvalid("the layer list is empty".to_string()));
        }

        if let Some(i) = self.layers.iter().position(|l| l.node_count == 0) {
            return Err(MlErr::ConfigInvalid(format!("layer {i} has no nodes")));
        }

        Ok(())
    }

    /// The width of the network's output, zero if there are no layers.
    pub fn output_count(&self) -> usize {
        self.layers.last().map_or(0, |l| l.node_count)
    }

    /// The total amount of weights and biases of the described network.
    pub fn param_count(&self) -> usize {
        self.layers
            .iter()
            .scan(self.input_count, |inputs, layer| {
                let size = (*inputs + 1) * layer.node_count;
                *inputs = layer.node_count;
                Some(size)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_net() -> NetworkConfig {
        NetworkConfig::new(
            2,
            LossFn::Cross,
            vec![
                LayerConfig::new(3, ActFn::Relu),
                LayerConfig::new(2, ActFn::Softmax),
            ],
        )
    }

    #[test]
    fn param_count() {
        let config = xor_net();
        assert_eq!(config.param_count(), 3 * 3 + 4 * 2);
        assert_eq!(config.output_count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid() {
        let mut config = xor_net();
        config.layers.clear();
        assert!(matches!(config.validate(), Err(MlErr::ConfigInvalid(_))));

        let mut config = xor_net();
        config.input_count = 0;
        assert!(matches!(config.validate(), Err(MlErr::ConfigInvalid(_))));

        let mut config = xor_net();
        config.layers[1].node_count = 0;
        assert!(matches!(config.validate(), Err(MlErr::ConfigInvalid(_))));
    }

    #[test]
    fn deserialize() {
        let json = r#"{
            "input_count": 4,
            "loss": "squared",
            "layers": [
                { "node_count": 10, "activation": "relu" },
                { "node_count": 3, "activation": "softmax" }
            ]
        }"#;

        let config: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.input_count, 4);
        assert_eq!(config.loss, LossFn::Squared);
        assert_eq!(config.layers[1], LayerConfig::new(3, ActFn::Softmax));

        let unknown = json.replace("\"squared\"", "\"quadratic\"");
        assert!(serde_json::from_str::<NetworkConfig>(&unknown).is_err());
    }
}
