// Purpose: Define the crate-level module surface for the tool-driving components.
// Inputs/Outputs: Exposes discovery, toolchain, and command modules to the binary and tests.
// Invariants: Commands depend on runner/toolchain/sources, never the other way around.
// Gotchas: Keep module wiring consistent with the src/main.rs entry path.

pub mod check;
pub mod cli;
pub mod ghdl;
pub mod runner;
pub mod simulate;
pub mod sources;
pub mod toolchain;
