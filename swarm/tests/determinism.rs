use machine_learning::{ActFn, Dataset, Example, LayerConfig, LossFn, NetworkConfig};
use swarm::{ExecutionMode, MultiSwarm, MultiSwarmConfig, TrainingConfig, XorShift128};

fn mk_config(seed: u64) -> MultiSwarmConfig {
    let network = NetworkConfig::new(
        2,
        LossFn::Cross,
        vec![
            LayerConfig::new(3, ActFn::Relu),
            LayerConfig::new(2, ActFn::Softmax),
        ],
    );

    MultiSwarmConfig::new(3, 5, network)
        .with_seed(seed)
        .with_execution(ExecutionMode::Sequential)
}

fn mk_training() -> TrainingConfig {
    TrainingConfig {
        max_iterations: 100,
        probability_of_death: 0.05,
        ..Default::default()
    }
}

fn xor() -> Dataset {
    Dataset::new(&[
        Example::new([0., 0.], [0., 1.]),
        Example::new([0., 1.], [1., 0.]),
        Example::new([1., 0.], [1., 0.]),
        Example::new([1., 1.], [0., 1.]),
    ])
    .unwrap()
}

#[test]
fn seeded_sequential_runs_match() {
    let data = xor();

    let mut a = MultiSwarm::new(mk_config(42), mk_training()).unwrap();
    let mut b = MultiSwarm::new(mk_config(42), mk_training()).unwrap();

    let report_a = a.train(&data).unwrap();
    let report_b = b.train(&data).unwrap();

    assert_eq!(report_a, report_b);
    assert_eq!(
        a.best_global().weights_and_biases,
        b.best_global().weights_and_biases
    );
    assert_eq!(a.predict(&[1., 0.]).unwrap(), b.predict(&[1., 0.]).unwrap());
}

#[test]
fn seeded_sequential_runs_match_with_xorshift() {
    let data = xor();

    let mut a = MultiSwarm::<XorShift128>::with_rng(mk_config(7), mk_training()).unwrap();
    let mut b = MultiSwarm::<XorShift128>::with_rng(mk_config(7), mk_training()).unwrap();

    a.train(&data).unwrap();
    b.train(&data).unwrap();

    assert_eq!(a.best_global(), b.best_global());
}

#[test]
fn different_seeds_diverge() {
    let a = MultiSwarm::new(mk_config(1), mk_training()).unwrap();
    let b = MultiSwarm::new(mk_config(2), mk_training()).unwrap();

    assert_ne!(
        a.particles()[0].network().weights(),
        b.particles()[0].network().weights()
    );
}

#[test]
fn training_resumes_from_previous_run() {
    let data = xor();
    let mut multi_swarm = MultiSwarm::new(mk_config(3), mk_training()).unwrap();

    let first = multi_swarm.train(&data).unwrap();
    let second = multi_swarm.train(&data).unwrap();

    assert!(second.best_loss <= first.best_loss);
}

#[test]
fn parallel_bests_stay_consistent() {
    let data = xor();
    let config = mk_config(5).with_execution(ExecutionMode::Parallel);
    let mut multi_swarm = MultiSwarm::new(config, mk_training()).unwrap();
    multi_swarm.train(&data).unwrap();

    let global = multi_swarm.best_global();
    for particle in multi_swarm.particles() {
        let swarm = multi_swarm.best_swarm(particle.swarm_id()).unwrap();
        assert!(swarm.loss <= particle.personal_best().loss);
        assert!(global.loss <= swarm.loss);
    }
}
