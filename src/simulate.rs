use std::fs;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use fs2::FileExt;

use crate::ghdl;
use crate::runner::{ToolRunner, run_step};
use crate::sources::{unit_name, validate_source_arg};
use crate::toolchain::{Toolchain, require_tool};

const STOP_TIME_UNITS: [&str; 8] = ["fs", "ps", "ns", "us", "ms", "sec", "min", "hr"];

/// Knobs for one simulate invocation, fixed before any external process runs.
pub struct SimulateOpts {
    pub wave: bool,
    pub stop_time: String,
    pub keep_going: bool,
}

/// Stop times are passed straight to the simulator, so they are validated here
/// before anything is spawned: decimal digits followed by one of the
/// simulator's time units.
pub fn validate_stop_time(s: &str) -> anyhow::Result<()> {
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    if digits.is_empty() || !STOP_TIME_UNITS.contains(&unit) {
        bail!(
            "invalid stop time {:?}: expected <digits><unit> with unit one of {}",
            s,
            STOP_TIME_UNITS.join(" ")
        );
    }
    Ok(())
}

/// Guards the on-disk working library. The compiler's library format does not
/// tolerate concurrent writers, so every simulate run holds this lock for its
/// whole duration; syntax checks never write the library and never take it.
pub struct WorkLock {
    _file: File,
}

impl WorkLock {
    // Precondition: `root` is the invocation root; it may not exist yet.
    // Postcondition: Returns a guard holding the exclusive lock until drop.
    // Side effects: Creates `.vhdrun.lock` under `root`; blocks while another holder runs.
    pub fn acquire(root: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(root)?;
        let lock_path = root.join(".vhdrun.lock");
        let f = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("open lock file {}", lock_path.display()))?;
        f.lock_exclusive()?;
        Ok(Self { _file: f })
    }
}

/// Simulates the given testbenches in command-line order: one batched analyze
/// over all of them, then elaborate and run per testbench, opening the waveform
/// viewer after each run when capture is enabled.
pub fn cmd_simulate(
    runner: &dyn ToolRunner,
    tc: &Toolchain,
    testbenches: &[PathBuf],
    opts: &SimulateOpts,
    root: &Path,
) -> anyhow::Result<()> {
    if testbenches.is_empty() {
        bail!("no testbenches given");
    }
    validate_stop_time(&opts.stop_time)?;
    let mut units = Vec::with_capacity(testbenches.len());
    for tb in testbenches {
        validate_source_arg(tb)?;
        units.push(unit_name(tb)?);
    }

    require_tool(runner, &tc.ghdl, "--ghdl or VHDRUN_GHDL")?;
    if opts.wave {
        require_tool(runner, &tc.viewer, "--viewer or VHDRUN_VIEWER")?;
    }

    let _lock = WorkLock::acquire(root)?;

    let wave_dir = root.join("waveforms");
    if opts.wave {
        fs::create_dir_all(&wave_dir)
            .with_context(|| format!("create waveform directory {}", wave_dir.display()))?;
    }

    ghdl::analyze(runner, tc, testbenches)?;

    let mut failed = 0usize;
    for (tb, unit) in testbenches.iter().zip(&units) {
        if let Err(err) = simulate_one(runner, tc, unit, opts, &wave_dir) {
            if !opts.keep_going {
                return Err(err.context(format!("testbench {} failed", tb.display())));
            }
            eprintln!("error: {:#}", err);
            failed += 1;
        }
    }
    if failed > 0 {
        bail!(
            "simulation failed for {} of {} testbenches",
            failed,
            testbenches.len()
        );
    }
    Ok(())
}

fn simulate_one(
    runner: &dyn ToolRunner,
    tc: &Toolchain,
    unit: &str,
    opts: &SimulateOpts,
    wave_dir: &Path,
) -> anyhow::Result<()> {
    eprintln!("elaborating {}", unit);
    ghdl::elaborate(runner, tc, unit)?;

    let vcd = opts.wave.then(|| wave_dir.join(format!("{}.vcd", unit)));
    eprintln!("running {}", unit);
    ghdl::run(runner, tc, unit, vcd.as_deref(), &opts.stop_time)?;

    if let Some(vcd) = vcd {
        eprintln!("opening {}", vcd.display());
        run_step(
            runner,
            &tc.viewer,
            &[vcd.display().to_string()],
            "waveform viewer",
        )?;
    }
    Ok(())
}
