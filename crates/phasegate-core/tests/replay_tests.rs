//! Replay must reproduce a direct run exactly: the units carry no state
//! beyond their windows and last outputs.

mod helpers;

use phasegate_core::{SimulationConfig, StepDriver, StimulusConfig};

use helpers::{sequential_driver, wave_inputs};

#[test]
fn test_replay_equals_direct_prefix() {
    let inputs = wave_inputs(20, 9);

    for n in 1..=inputs.len() {
        let mut direct = sequential_driver(3, 4, inputs.clone());
        let mut last = None;
        for _ in 0..n {
            last = direct.step();
        }

        let mut replayed = sequential_driver(3, 4, inputs.clone());
        let record = replayed.replay_to(n).unwrap();

        assert_eq!(Some(record), last, "step {}", n);
        assert_eq!(replayed.units(), direct.units(), "step {}", n);
    }
}

#[test]
fn test_replay_is_idempotent() {
    let mut driver = sequential_driver(3, 5, wave_inputs(15, 4));
    let first = driver.replay_to(11).unwrap();
    let units_after_first = driver.units().to_vec();

    let second = driver.replay_to(11).unwrap();
    assert_eq!(first, second);
    assert_eq!(driver.units(), units_after_first.as_slice());
}

#[test]
fn test_n_minus_one_then_one_more_step() {
    let inputs = wave_inputs(12, 6);
    let mut full = sequential_driver(3, 3, inputs.clone());
    full.replay_to(12).unwrap();

    let mut split = sequential_driver(3, 3, inputs);
    split.replay_to(11).unwrap();
    split.step().unwrap();

    for (a, b) in full.units().iter().zip(split.units()) {
        assert_eq!(a.history(), b.history());
        assert_eq!(a.last_output().to_bits(), b.last_output().to_bits());
    }
}

#[test]
fn test_replay_backwards_after_full_run() {
    let config = SimulationConfig::default();
    let inputs = config.stimulus.generate().unwrap();
    let mut driver = StepDriver::from_config(&config, inputs.clone()).unwrap();
    let report = driver.run();

    let record = driver.replay_to(7).unwrap();
    assert_eq!(record, report.records[6]);
    assert_eq!(driver.current_step(), 7);
    assert!(!driver.is_finished());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let config = SimulationConfig {
        stimulus: StimulusConfig {
            seed: 7,
            length: 30,
            ..Default::default()
        },
        ..Default::default()
    };

    let run = || {
        let inputs = config.stimulus.generate().unwrap();
        StepDriver::from_config(&config, inputs).unwrap().run()
    };
    let a = run();
    let b = run();

    assert_eq!(a.inputs, b.inputs);
    assert_eq!(a.records, b.records);
    assert_ne!(a.run_id, b.run_id);
}
