// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Entangle - compiler front-end for the Entangle interface definition
//! language.
//!
//! The binary dispatches the `version`, `validate` and `generate`
//! subcommands; see [`entangle::cli`] for the command surface and the
//! library crate for the parsing core.

use std::process::ExitCode;

use entangle::cli::Cli;

fn main() -> ExitCode {
    Cli::run()
}
