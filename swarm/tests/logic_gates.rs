use machine_learning::{ActFn, Dataset, Example, LayerConfig, LossFn, NetworkConfig};
use swarm::{MultiSwarmConfig, TrainingConfig, new_multi_swarm};

const T: [f64; 2] = [1., 0.];
const F: [f64; 2] = [0., 1.];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mk_config(seed: u64) -> MultiSwarmConfig {
    let network = NetworkConfig::new(
        2,
        LossFn::Cross,
        vec![
            LayerConfig::new(3, ActFn::Relu),
            LayerConfig::new(2, ActFn::Softmax),
        ],
    );

    MultiSwarmConfig::new(5, 10, network).with_seed(seed)
}

fn mk_gate(truth: [[f64; 2]; 4]) -> Dataset {
    let inputs = [[0., 0.], [0., 1.], [1., 0.], [1., 1.]];
    let examples: Vec<_> = inputs
        .into_iter()
        .zip(truth)
        .map(|(x, y)| Example::new(x, y))
        .collect();

    Dataset::new(&examples).unwrap()
}

fn assert_learns(truth: [[f64; 2]; 4], seed: u64) {
    init_logger();
    let data = mk_gate(truth);

    let mut multi_swarm = new_multi_swarm(mk_config(seed), TrainingConfig::default()).unwrap();
    let report = multi_swarm.train(&data).unwrap();

    assert!(report.best_loss.is_finite());
    assert_eq!(multi_swarm.classification_accuracy(&data).unwrap(), 1.);

    for (inputs, outputs) in data.rows() {
        let predicted = multi_swarm.predict(inputs.as_slice().unwrap()).unwrap();
        let winner = if predicted[0] >= predicted[1] { T } else { F };
        assert_eq!(winner.as_slice(), outputs.as_slice().unwrap());
    }
}

#[test]
fn xor() {
    assert_learns([F, T, T, F], 1);
}

#[test]
fn and() {
    assert_learns([F, F, F, T], 2);
}

#[test]
fn or() {
    assert_learns([F, T, T, T], 3);
}

#[test]
fn not() {
    // Negation of the first input, the second one is ignored.
    assert_learns([T, T, F, F], 4);
}

#[test]
fn nand() {
    assert_learns([T, T, T, F], 5);
}

#[test]
fn nor() {
    assert_learns([T, F, F, F], 6);
}

#[test]
fn xnor() {
    assert_learns([T, F, F, T], 7);
}
