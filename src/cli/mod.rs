//! Command Line Interface (CLI) layer for spritecut.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that layers defaults, an optional
//! JSON config and flag overrides before handing off to `spritecut::api`.
//!
//! If you are embedding spritecut into another application, prefer using
//! the high-level `spritecut::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
