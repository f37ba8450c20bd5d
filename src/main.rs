// Purpose: Provide the binary entry point for the vhdrun CLI.
// Inputs/Outputs: Reads process args and returns the process exit code from the CLI dispatcher.
// Invariants: Main must not bypass centralized CLI argument/diagnostic handling.
// Gotchas: The dispatcher expects argv[0] included; do not skip it here.

fn main() {
    let code = vhdrun::cli::run_cli(std::env::args());
    std::process::exit(code);
}
