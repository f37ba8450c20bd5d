// Purpose: Build argument lists for and dispatch the GHDL steps used by check and simulate.
// Inputs/Outputs: Turns source paths and unit names into fixed-order argv vectors, then runs them.
// Invariants: Every step carries the working-library argument; run keeps unit/vcd/stop-time order.
// Gotchas: Analyze is batched over all files in one invocation; the other steps are per-target.

use std::path::{Path, PathBuf};

use crate::runner::{ToolRunner, run_step};
use crate::toolchain::Toolchain;

pub fn syntax_args(tc: &Toolchain, file: &Path) -> Vec<String> {
    vec![
        "-s".to_string(),
        tc.work_arg(),
        file.display().to_string(),
    ]
}

pub fn analyze_args(tc: &Toolchain, files: &[PathBuf]) -> Vec<String> {
    let mut args = vec!["-a".to_string(), tc.work_arg()];
    args.extend(files.iter().map(|f| f.display().to_string()));
    args
}

pub fn elaborate_args(tc: &Toolchain, unit: &str) -> Vec<String> {
    vec!["-e".to_string(), tc.work_arg(), unit.to_string()]
}

pub fn run_args(tc: &Toolchain, unit: &str, vcd: Option<&Path>, stop_time: &str) -> Vec<String> {
    let mut args = vec!["-r".to_string(), tc.work_arg(), unit.to_string()];
    if let Some(vcd) = vcd {
        args.push(format!("--vcd={}", vcd.display()));
    }
    args.push(format!("--stop-time={}", stop_time));
    args
}

/// Syntax-only pass over a single file; does not write the working library.
pub fn syntax_check(runner: &dyn ToolRunner, tc: &Toolchain, file: &Path) -> anyhow::Result<()> {
    run_step(
        runner,
        &tc.ghdl,
        &syntax_args(tc, file),
        &format!("syntax check of {}", file.display()),
    )
}

/// Analyzes all given files into the working library in one batched call.
pub fn analyze(runner: &dyn ToolRunner, tc: &Toolchain, files: &[PathBuf]) -> anyhow::Result<()> {
    run_step(runner, &tc.ghdl, &analyze_args(tc, files), "analysis")
}

pub fn elaborate(runner: &dyn ToolRunner, tc: &Toolchain, unit: &str) -> anyhow::Result<()> {
    run_step(
        runner,
        &tc.ghdl,
        &elaborate_args(tc, unit),
        &format!("elaboration of {}", unit),
    )
}

pub fn run(
    runner: &dyn ToolRunner,
    tc: &Toolchain,
    unit: &str,
    vcd: Option<&Path>,
    stop_time: &str,
) -> anyhow::Result<()> {
    run_step(
        runner,
        &tc.ghdl,
        &run_args(tc, unit, vcd, stop_time),
        &format!("run of {}", unit),
    )
}
