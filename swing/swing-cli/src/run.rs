//! Trace loading, suite execution and report output.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use swing_types::{EngineType, SimulationTrace};
use swing_validate::synthetic::{golf_swing_trace, offset_joint_positions};
use swing_validate::{render_markdown, PhysicsValidator, ValidationParams};
use tracing::{info, warn};

use crate::OutputArgs;

const RESULTS_FILE: &str = "physics_validation_results.json";
const REPORT_FILE: &str = "physics_validation_report.md";

/// Read a JSON array of traces.
pub fn load_traces(path: &Path) -> Result<Vec<SimulationTrace>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let traces: Vec<SimulationTrace> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse traces from {}", path.display()))?;

    for trace in &traces {
        if let Err(err) = trace.check_shape() {
            warn!(engine = %trace.engine, error = %err, "trace is malformed, checks may be skipped");
        }
    }
    info!(path = %path.display(), traces = traces.len(), "traces loaded");
    Ok(traces)
}

/// Synthetic swings for `MuJoCo`, Drake and Pinocchio, with seeded Gaussian
/// noise of standard deviation `noise` on Drake's shoulder positions.
pub fn demo_traces(noise: f64, seed: u64, samples: usize, duration: f64) -> Result<Vec<SimulationTrace>> {
    ensure!(noise.is_finite() && noise >= 0.0, "noise must be a non-negative number, got {noise}");
    ensure!(samples > 0, "samples must be positive");
    ensure!(duration > 0.0, "duration must be positive, got {duration}");

    let mut traces: Vec<SimulationTrace> = [EngineType::Mujoco, EngineType::Drake, EngineType::Pinocchio]
        .into_iter()
        .map(|engine| golf_swing_trace(engine.id(), samples, duration))
        .collect();

    let normal = Normal::new(0.0, noise).context("invalid noise level")?;
    let rng = StdRng::seed_from_u64(seed);
    let offsets: Vec<f64> = rng.sample_iter(normal).take(samples).collect();
    offset_joint_positions(&mut traces[1], 0, offsets);

    info!(samples, noise, seed, "synthetic swings generated");
    Ok(traces)
}

/// Run the suite, print the markdown report and write both report files.
///
/// Returns whether every check passed.
pub fn validate(traces: &[SimulationTrace], params: &ValidationParams, output: &OutputArgs) -> Result<bool> {
    ensure!(!traces.is_empty(), "no traces to validate");
    let validator = PhysicsValidator::new(params.clone()).context("invalid tolerances")?;
    let report = validator.run_suite(traces);

    let markdown = render_markdown(&report);
    println!("{markdown}");

    fs::create_dir_all(&output.output_dir)
        .with_context(|| format!("failed to create {}", output.output_dir.display()))?;

    let results_path = output.output_dir.join(RESULTS_FILE);
    let json = report.to_json().context("failed to serialize results")?;
    fs::write(&results_path, json)
        .with_context(|| format!("failed to write {}", results_path.display()))?;

    let report_path = output.output_dir.join(REPORT_FILE);
    fs::write(&report_path, &markdown)
        .with_context(|| format!("failed to write {}", report_path.display()))?;

    info!(
        results = %results_path.display(),
        report = %report_path.display(),
        "{}",
        report.summary()
    );

    Ok(report.all_passed())
}
