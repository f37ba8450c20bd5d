// Purpose: Provide the process-runner seam used for every external tool invocation.
// Inputs/Outputs: Takes program + argument vectors, returns exit status and captured output.
// Invariants: Invocations block until completion; spawn failure and non-zero exit stay distinct.
// Gotchas: Captured output must be forwarded to the user or diagnostics lose the tool's message.

use anyhow::{Context, bail};
use std::process::Command;

/// Result of one external tool invocation: exit status plus captured output.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external tools. `Err` means the process could not be spawned at all
/// (typically a missing binary); a non-zero exit comes back as `Ok` with the
/// status so callers decide how to report it.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<ToolOutput>;
}

/// Real runner over `std::process::Command`, inheriting the working directory.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<ToolOutput> {
        let out = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute {}", program))?;
        Ok(ToolOutput {
            status: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        })
    }
}

/// Invokes one tool step and checks its exit status. Whatever the tool printed
/// is forwarded first so its own diagnostics reach the user even when the step
/// fails; the returned error names the step, the status, and the full command.
pub fn run_step(
    runner: &dyn ToolRunner,
    program: &str,
    args: &[String],
    what: &str,
) -> anyhow::Result<()> {
    let out = runner.run(program, args)?;
    if !out.stdout.is_empty() {
        print!("{}", out.stdout);
    }
    if !out.stderr.is_empty() {
        eprint!("{}", out.stderr);
    }
    if !out.success() {
        bail!(
            "{} failed ({}): {} {}",
            what,
            out.status_label(),
            program,
            args.join(" ")
        );
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedRunner;
    use super::{ToolOutput, ToolRunner, run_step};

    #[test]
    fn run_step_passes_on_zero_exit() {
        let runner = ScriptedRunner::ok();
        run_step(&runner, "ghdl", &["-s".to_string(), "a.vhd".to_string()], "syntax check")
            .expect("zero exit should pass");
        assert_eq!(runner.calls(), vec!["ghdl -s a.vhd".to_string()]);
    }

    #[test]
    fn run_step_reports_step_status_and_command_on_failure() {
        let runner = ScriptedRunner::ok().fail_when("-e", 2, "bad unit\n");
        let err = run_step(
            &runner,
            "ghdl",
            &["-e".to_string(), "tb1".to_string()],
            "elaboration of tb1",
        )
        .expect_err("non-zero exit must fail");
        let msg = format!("{:#}", err);
        assert!(msg.contains("elaboration of tb1"), "step name missing: {}", msg);
        assert!(msg.contains("exit status 2"), "status missing: {}", msg);
        assert!(msg.contains("ghdl -e tb1"), "command missing: {}", msg);
    }

    #[test]
    fn run_step_propagates_spawn_failure() {
        let runner = ScriptedRunner::ok().missing("ghdl");
        let err = run_step(&runner, "ghdl", &["-a".to_string()], "analysis")
            .expect_err("missing binary must fail");
        assert!(format!("{:#}", err).contains("failed to execute ghdl"));
    }

    #[test]
    fn status_label_distinguishes_signals_from_exit_codes() {
        let exited = ToolOutput {
            status: Some(1),
            stdout: String::new(),
            stderr: String::new(),
        };
        let killed = ToolOutput {
            status: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(exited.status_label(), "exit status 1");
        assert_eq!(killed.status_label(), "terminated by signal");
        assert!(!killed.success());
    }

    #[test]
    fn scripted_runner_filters_probe_calls() {
        let runner = ScriptedRunner::ok();
        let _ = runner.run("ghdl", &["--version".to_string()]);
        let _ = runner.run("ghdl", &["-a".to_string(), "tb.vhd".to_string()]);
        assert_eq!(runner.calls().len(), 2);
        assert_eq!(runner.tool_calls(), vec!["ghdl -a tb.vhd".to_string()]);
    }
}
