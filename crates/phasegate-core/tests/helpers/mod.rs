//! Helper Functions: Deterministic Data Generation

#![allow(dead_code)]

use phasegate_core::{GatedUnit, PhaseCycle, StepDriver, UnitId};

/// Deterministic integer-valued stream in `[1, 10)` built from a sine wave.
pub fn wave_inputs(len: usize, seed: u64) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let x = (i as f64 + seed as f64) * 0.7;
            ((x.sin() + 1.0) * 4.0).floor() + 1.0
        })
        .collect()
}

/// `count` units with uniform weights, ids and phases `0..count`.
pub fn uniform_population(count: usize, capacity: usize) -> Vec<GatedUnit> {
    (0..count)
        .map(|i| GatedUnit::new(UnitId(i as u32), capacity, i as i64).unwrap())
        .collect()
}

pub fn sequential_driver(count: usize, capacity: usize, inputs: Vec<f64>) -> StepDriver {
    StepDriver::new(
        uniform_population(count, capacity),
        PhaseCycle::sequential(count).unwrap(),
        inputs,
    )
    .unwrap()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
