// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Entangle - compiler front-end for the Entangle interface definition
//! language.
//!
//! The crate parses text schemas describing structs, enumerations,
//! exceptions and RPC services into a validated, in-memory
//! [`Interface`](declarations::Interface) declaration suitable for
//! downstream code generation. Data flows through the front-end as
//! bytes → [`source::Source`] → [`lexer::Lexer`] → tokens →
//! [`parser::parse`] → interface declaration; failures at any stage are
//! reported as [`diagnostics::Diagnostic`] values with precise source
//! spans.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

/// The version of Entangle, reported by the version subcommand.
/// This must match the version in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit the binary was built from, if the build environment
/// provided one.
pub const GIT_COMMIT: Option<&'static str> = option_env!("ENTANGLE_GIT_COMMIT");

/// Command-line interface.
pub mod cli;

/// Declaration model produced by the parser.
pub mod declarations;

/// Diagnostic records and pretty printing.
pub mod diagnostics;

/// Code generators consuming parsed interfaces.
pub mod generators;

/// Lexical analysis.
pub mod lexer;

/// Recursive-descent parsing.
pub mod parser;

/// Source buffers.
pub mod source;

/// Text wrapping and tab expansion utilities.
pub mod text;

/// Token model interchanged between lexer and parser.
pub mod token;
