use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::check::cmd_check;
use crate::runner::SystemRunner;
use crate::simulate::{SimulateOpts, cmd_simulate};
use crate::toolchain::Toolchain;

#[derive(Parser)]
#[command(
    name = "vhdrun",
    version,
    long_version = long_version(),
    about = "Convenience wrapper around the GHDL simulator and a waveform viewer"
)]
struct Cli {
    /// GHDL binary to invoke (falls back to $VHDRUN_GHDL, then `ghdl`).
    #[clap(long, global = true)]
    ghdl: Option<String>,

    /// Waveform viewer binary (falls back to $VHDRUN_VIEWER, then `gtkwave`).
    #[clap(long, global = true)]
    viewer: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Syntax-check VHDL sources without touching the work library.
    ///
    /// Without --file, every .vhd/.vhdl file under the current directory is
    /// checked recursively. All files are checked even when some fail; the
    /// command then exits non-zero.
    Check(CheckArgs),

    /// Analyze, elaborate and run one or more testbenches.
    ///
    /// Waveforms land in ./waveforms/<unit>.vcd and open in the viewer
    /// unless --no-wave is given.
    Simulate(SimulateArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// Check only this file instead of discovering sources.
    #[clap(short, long)]
    file: Option<PathBuf>,
}

#[derive(Parser)]
struct SimulateArgs {
    /// Testbench source files, simulated in the given order.
    #[clap(required = true)]
    testbenches: Vec<PathBuf>,

    /// Skip waveform capture and the viewer launch.
    #[clap(short = 'n', long)]
    no_wave: bool,

    /// Simulated-time budget passed to the run step, e.g. 100us or 2ms.
    #[clap(long, default_value = "100us")]
    stop_time: String,

    /// Report a failing testbench and continue with the remaining ones.
    #[clap(long)]
    keep_going: bool,
}

/// Parses arguments (argv[0] included) and dispatches; returns the process
/// exit code instead of exiting so the binary stays a one-line shim.
pub fn run_cli<I>(args: I) -> i32
where
    I: IntoIterator<Item = String>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let tc = Toolchain::resolve(cli.ghdl, cli.viewer);
    let runner = SystemRunner;
    // Resolved here, per invocation, never captured earlier.
    let root = Path::new(".");

    let result = match cli.command {
        Commands::Check(args) => cmd_check(&runner, &tc, args.file.as_deref(), root),
        Commands::Simulate(args) => {
            let opts = SimulateOpts {
                wave: !args.no_wave,
                stop_time: args.stop_time,
                keep_going: args.keep_going,
            };
            cmd_simulate(&runner, &tc, &args.testbenches, &opts, root)
        }
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {:#}", err);
            1
        }
    }
}

fn long_version() -> String {
    let mut out = env!("CARGO_PKG_VERSION").to_string();
    if let Some(commit) = option_env!("VHDRUN_GIT_COMMIT") {
        let commit = commit.trim();
        if !commit.is_empty() {
            out.push('#');
            out.push_str(commit);
        }
    }
    out
}
