use std::path::Path;

use anyhow::bail;

use crate::ghdl;
use crate::runner::ToolRunner;
use crate::sources::{collect_vhdl_sources, validate_source_arg};
use crate::toolchain::{Toolchain, require_tool};

/// Syntax-checks one explicitly named file, or every VHDL source found under
/// `root`. Files are checked independently: a failing file is reported and the
/// rest still run, with a single summary error at the end.
pub fn cmd_check(
    runner: &dyn ToolRunner,
    tc: &Toolchain,
    file: Option<&Path>,
    root: &Path,
) -> anyhow::Result<()> {
    let files = match file {
        Some(f) => {
            validate_source_arg(f)?;
            vec![f.to_path_buf()]
        }
        None => collect_vhdl_sources(root),
    };
    if files.is_empty() {
        bail!("no VHDL sources found under {}", root.display());
    }

    require_tool(runner, &tc.ghdl, "--ghdl or VHDRUN_GHDL")?;

    let mut failed = 0usize;
    for f in &files {
        eprintln!("analyzing {}", f.display());
        if let Err(err) = ghdl::syntax_check(runner, tc, f) {
            eprintln!("error: {:#}", err);
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("syntax check failed for {} of {} files", failed, files.len());
    }
    Ok(())
}
