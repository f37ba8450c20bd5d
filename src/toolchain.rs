// Purpose: Resolve which external binaries to drive and the shared working-library name.
// Inputs/Outputs: Combines CLI overrides, environment variables, and defaults into a Toolchain.
// Invariants: Resolution order is override, then environment, then default, per tool.
// Gotchas: A probe spawns `<tool> --version`; callers must probe before dispatching real work.

use anyhow::bail;

use crate::runner::ToolRunner;

pub const DEFAULT_GHDL: &str = "ghdl";
pub const DEFAULT_VIEWER: &str = "gtkwave";
pub const DEFAULT_WORK_LIB: &str = "work";

pub const GHDL_ENV: &str = "VHDRUN_GHDL";
pub const VIEWER_ENV: &str = "VHDRUN_VIEWER";

/// External tools one invocation drives. No hidden globals: the CLI builds one
/// of these per run and passes it down explicitly.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Analyzer/elaborator/simulator binary, `ghdl` unless overridden.
    pub ghdl: String,
    /// Waveform viewer binary, `gtkwave` unless overridden.
    pub viewer: String,
    /// Name of the working library shared by all compiler steps.
    pub work_lib: String,
}

impl Toolchain {
    pub fn resolve(ghdl_override: Option<String>, viewer_override: Option<String>) -> Self {
        Toolchain {
            ghdl: choose(ghdl_override, env_tool(GHDL_ENV), DEFAULT_GHDL),
            viewer: choose(viewer_override, env_tool(VIEWER_ENV), DEFAULT_VIEWER),
            work_lib: DEFAULT_WORK_LIB.to_string(),
        }
    }

    pub fn work_arg(&self) -> String {
        format!("--work={}", self.work_lib)
    }
}

fn choose(override_value: Option<String>, env_value: Option<String>, default: &str) -> String {
    override_value
        .or(env_value)
        .unwrap_or_else(|| default.to_string())
}

fn env_tool(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// A tool counts as available when spawning `<tool> --version` succeeds.
pub fn tool_available(runner: &dyn ToolRunner, tool: &str) -> bool {
    runner.run(tool, &["--version".to_string()]).is_ok()
}

/// Aborts with a tool-named message when the binary cannot be spawned. `hint`
/// names the override flag and environment variable for that tool.
pub fn require_tool(runner: &dyn ToolRunner, tool: &str, hint: &str) -> anyhow::Result<()> {
    if !tool_available(runner, tool) {
        bail!("{} not found; install it or set {}", tool, hint);
    }
    Ok(())
}
