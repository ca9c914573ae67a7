//! Built-in end-to-end check.
//!
//! Generates three fixtures, runs a fixed table of relative and absolute cases
//! through the [`Scaler`], and verifies every output size by decoding the
//! written file. Each step prints a `PASS`/`FAIL` line; the first failure
//! aborts the run.

pub mod fixtures;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{RescaleError, Result, SelfTestError};
use crate::pipeline::{Dimensions, Scaler};
use crate::request::{ScaleMode, ScaleRequest};

/// One row of the self-test table.
#[derive(Debug, Clone, Copy)]
pub struct SelfTestCase {
    pub mode: ScaleMode,
    pub input: &'static str,
    pub output: &'static str,
    pub a: f64,
    pub b: f64,
    pub expected: Dimensions,
}

const fn case(
    mode: ScaleMode,
    input: &'static str,
    output: &'static str,
    a: f64,
    b: f64,
    width: u32,
    height: u32,
) -> SelfTestCase {
    SelfTestCase {
        mode,
        input,
        output,
        a,
        b,
        expected: Dimensions { width, height },
    }
}

/// The fixed case table.
pub const CASES: [SelfTestCase; 6] = [
    case(ScaleMode::Relative, "test1.png", "out1_rel.png", 0.5, 2.0, 25, 100),
    case(ScaleMode::Relative, "test2.png", "out2_rel.png", 2.0, 2.0, 74, 182),
    case(ScaleMode::Relative, "test3.png", "out3_rel.png", 0.4, 1.6, 60, 160),
    case(ScaleMode::Absolute, "test1.png", "out1_abs.png", 200.0, 200.0, 200, 200),
    case(ScaleMode::Absolute, "test2.png", "out2_abs.png", 75.0, 50.0, 75, 50),
    case(ScaleMode::Absolute, "test3.png", "out3_abs.png", 200.0, 150.0, 200, 150),
];

const DRY_RUN_OUTPUT: &str = "dry_run.png";

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct SelfTestReport {
    pub dir: PathBuf,
    pub steps_passed: usize,
}

/// Run every self-test step in `dir`, reporting progress to `out`.
pub fn run<W: Write>(scaler: &Scaler, dir: &Path, out: &mut W) -> Result<SelfTestReport> {
    writeln!(out, "Running self-tests in {}", dir.display())?;
    let mut passed = 0;

    let generated = match fixtures::generate(dir) {
        Ok(generated) => generated,
        Err(e) => {
            writeln!(out, "FAIL generate fixtures: {}", e)?;
            return Err(e.into());
        }
    };
    for fixture in &generated {
        writeln!(out, "PASS generate {} ({})", fixture.name, fixture.dimensions)?;
        passed += 1;
    }

    for case in &CASES {
        run_case(scaler, dir, case, out)?;
        passed += 1;
    }

    check_dry_run(scaler, dir, out)?;
    passed += 1;

    writeln!(out, "All {} self-test steps passed.", passed)?;
    Ok(SelfTestReport {
        dir: dir.to_path_buf(),
        steps_passed: passed,
    })
}

fn run_case<W: Write>(scaler: &Scaler, dir: &Path, case: &SelfTestCase, out: &mut W) -> Result<()> {
    let input = dir.join(case.input);
    let output = dir.join(case.output);
    let label = format!("{} {} -> {}", case.mode, case.input, case.output);
    tracing::debug!("Self-test case: {}", label);

    let scaled = ScaleRequest::new(case.mode, &input, &output, case.a, case.b, false)
        .map_err(RescaleError::from)
        .and_then(|request| scaler.scale(&request));
    if let Err(e) = scaled {
        writeln!(out, "FAIL {}: {}", label, e)?;
        return Err(SelfTestError::Scale {
            input: case.input.to_string(),
            source: Box::new(e),
        }
        .into());
    }

    let actual = match image::image_dimensions(&output) {
        Ok((width, height)) => Dimensions::new(width, height),
        Err(e) => {
            writeln!(out, "FAIL {}: cannot read output: {}", label, e)?;
            return Err(SelfTestError::SizeMismatch {
                output: case.output.to_string(),
                expected: case.expected.to_string(),
                actual: format!("unreadable ({})", e),
            }
            .into());
        }
    };
    if actual != case.expected {
        writeln!(out, "FAIL {}: expected {}, got {}", label, case.expected, actual)?;
        return Err(SelfTestError::SizeMismatch {
            output: case.output.to_string(),
            expected: case.expected.to_string(),
            actual: actual.to_string(),
        }
        .into());
    }

    writeln!(out, "PASS {} ({})", label, actual)?;
    Ok(())
}

fn check_dry_run<W: Write>(scaler: &Scaler, dir: &Path, out: &mut W) -> Result<()> {
    let input = dir.join("test1.png");
    let output = dir.join(DRY_RUN_OUTPUT);
    match std::fs::remove_file(&output) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    let request = ScaleRequest::new(ScaleMode::Relative, &input, &output, 0.5, 0.5, true)?;
    if let Err(e) = scaler.scale(&request) {
        writeln!(out, "FAIL dry run test1.png: {}", e)?;
        return Err(SelfTestError::Scale {
            input: "test1.png".to_string(),
            source: Box::new(e),
        }
        .into());
    }
    if output.exists() {
        writeln!(out, "FAIL dry run test1.png: {} was created", DRY_RUN_OUTPUT)?;
        return Err(SelfTestError::DryRunWroteOutput(output).into());
    }

    writeln!(out, "PASS dry run test1.png (no output written)")?;
    Ok(())
}
