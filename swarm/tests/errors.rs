use machine_learning::{ActFn, Dataset, Example, LayerConfig, LossFn, Network, NetworkConfig};
use swarm::{MultiSwarmConfig, SwarmErr, TrainingConfig, new_multi_swarm};

fn mk_network() -> NetworkConfig {
    NetworkConfig::new(
        2,
        LossFn::Cross,
        vec![
            LayerConfig::new(2, ActFn::Relu),
            LayerConfig::new(2, ActFn::Softmax),
        ],
    )
}

fn is_config_invalid<T>(result: Result<T, SwarmErr>) -> bool {
    matches!(result, Err(SwarmErr::ConfigInvalid(_)))
}

#[test]
fn zero_counts_are_rejected() {
    let training = TrainingConfig::default();

    assert!(is_config_invalid(new_multi_swarm(
        MultiSwarmConfig::new(0, 10, mk_network()),
        training
    )));
    assert!(is_config_invalid(new_multi_swarm(
        MultiSwarmConfig::new(5, 0, mk_network()),
        training
    )));
    assert!(is_config_invalid(new_multi_swarm(
        MultiSwarmConfig::new(5, 10, mk_network()),
        TrainingConfig {
            max_iterations: 0,
            ..training
        }
    )));
}

#[test]
fn empty_layers_are_rejected() {
    let network = NetworkConfig::new(2, LossFn::Squared, Vec::new());
    assert!(is_config_invalid(new_multi_swarm(
        MultiSwarmConfig::new(5, 10, network),
        TrainingConfig::default()
    )));
}

#[test]
fn predict_before_train() {
    let multi_swarm = new_multi_swarm(
        MultiSwarmConfig::new(1, 2, mk_network()).with_seed(0),
        TrainingConfig::default(),
    )
    .unwrap();

    let data = Dataset::new(&[Example::new([0., 1.], [1., 0.])]).unwrap();

    assert_eq!(multi_swarm.predict(&[0., 1.]), Err(SwarmErr::NoData));
    assert_eq!(
        multi_swarm.classification_accuracy(&data),
        Err(SwarmErr::NoData)
    );
}

#[test]
fn mismatched_dataset() {
    let mut multi_swarm = new_multi_swarm(
        MultiSwarmConfig::new(1, 2, mk_network()).with_seed(0),
        TrainingConfig::default(),
    )
    .unwrap();

    let wide_inputs = Dataset::new(&[Example::new([0., 1., 1.], [1., 0.])]).unwrap();
    assert_eq!(
        multi_swarm.train(&wide_inputs).unwrap_err(),
        SwarmErr::DimensionMismatch {
            what: "dataset inputs",
            got: 3,
            expected: 2
        }
    );

    let narrow_outputs = Dataset::new(&[Example::new([0., 1.], [1.])]).unwrap();
    assert!(matches!(
        multi_swarm.train(&narrow_outputs),
        Err(SwarmErr::DimensionMismatch {
            what: "dataset outputs",
            ..
        })
    ));

    // Nothing was trained, so there's still no predictor.
    assert_eq!(multi_swarm.predict(&[0., 1.]), Err(SwarmErr::NoData));
}

#[test]
fn velocity_round_trip() {
    let mut rng = rand::rng();
    let init = machine_learning::initialization::UniformInit::new(10.).unwrap();
    let mut network = Network::new(&mk_network(), &init, &mut rng).unwrap();

    let v = vec![
        0.8810181760900249,
        -0.12457162562603963,
        0.37364614573421884,
        -0.6869614905344175,
        -0.39817627882942586,
        0.6272799219801937,
        -0.238685621400628,
        -0.062220310195153616,
        -0.4137962853263685,
        -0.5628938948144715,
        -0.278257166286188,
        0.7249828748957727,
    ];

    network.set_velocities(&v).unwrap();
    assert_eq!(network.velocities(), v);

    let w = network.weights();
    network.set_weights(&w).unwrap();
    assert_eq!(network.weights(), w);
}
