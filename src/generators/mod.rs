// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Code generators consuming a parsed [`Interface`].
//!
//! Generators are plug-ins: each target language registers an identifier
//! and a synopsis, and the CLI dispatches to it after parsing. The core
//! only hands generators a read-only interface declaration and an output
//! directory.

use std::path::Path;

use thiserror::Error;

use crate::declarations::Interface;

mod docs;

pub use docs::DocsGenerator;

/// Errors that can occur while generating output.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Writing generated output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A code generator for one target language.
pub trait Generator {
    /// Generates output for `interface` into the `output_path` directory.
    fn generate(&self, interface: &Interface, output_path: &Path) -> Result<(), GenerateError>;
}

/// A registered target language.
pub struct TargetLanguage {
    /// Identifier used on the command line.
    pub identifier: &'static str,

    /// Human readable synopsis.
    pub synopsis: &'static str,
}

const TARGET_LANGUAGES: &[TargetLanguage] = &[TargetLanguage {
    identifier: "docs",
    synopsis: "Markdown reference documentation",
}];

/// The registered target languages.
pub fn target_languages() -> &'static [TargetLanguage] {
    TARGET_LANGUAGES
}

/// Looks up the generator for a target language identifier.
pub fn lookup(identifier: &str) -> Option<Box<dyn Generator>> {
    match identifier {
        "docs" => Some(Box::new(DocsGenerator)),
        _ => None,
    }
}
