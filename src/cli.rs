//! Command-line interface for the Entangle compiler.
//!
//! Three subcommands are exposed: `version`, `validate` and `generate`.
//! A `-v` or `--version` flag at any argument position is rewritten to
//! the `version` subcommand. All failures exit with code 1.

use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::generators;
use crate::parser;
use crate::source::Source;
use crate::text::TextWrapper;
use crate::{GIT_COMMIT, VERSION};

/// The parsed command line.
#[derive(Debug, Clone)]
pub struct Cli {
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone)]
enum Command {
    /// Print the version string.
    Version,

    /// Parse a definition file and report diagnostics.
    Validate { path: String },

    /// Parse a definition file and run a code generator on it.
    Generate {
        language: String,
        definition_path: String,
        output_path: String,
    },
}

/// Errors that can occur during argument parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid command line arguments.
    #[error("{0}")]
    InvalidArguments(String),
}

impl Cli {
    /// Parses the process arguments and executes the selected command.
    pub fn run() -> ExitCode {
        match Self::from_args(env::args().skip(1).collect()) {
            Ok(cli) => cli.execute(),
            Err(error) => {
                eprintln!("Error: {error}");
                eprintln!();
                eprintln!("{}", usage());
                ExitCode::FAILURE
            }
        }
    }

    /// Parses command line arguments into a CLI structure.
    pub fn from_args(args: Vec<String>) -> Result<Self, Error> {
        // Fast path to the version subcommand, as the version flag is
        // accepted at any argument position.
        if args.iter().any(|arg| arg == "-v" || arg == "--version") {
            return Ok(Self {
                command: Command::Version,
            });
        }

        let Some(subcommand) = args.first() else {
            return Err(Error::InvalidArguments("A subcommand is required.".into()));
        };

        let command = match subcommand.as_str() {
            "version" => Command::Version,

            "validate" => match args.len() {
                1 => {
                    return Err(Error::InvalidArguments(
                        "A definition file path is required.".into(),
                    ));
                }
                2 => Command::Validate {
                    path: args[1].clone(),
                },
                _ => {
                    return Err(Error::InvalidArguments(
                        "Only one definition file path may be supplied.".into(),
                    ));
                }
            },

            "generate" => {
                let rest = &args[1..];

                if let Some(option) = rest.iter().find(|arg| arg.starts_with('-')) {
                    return Err(Error::InvalidArguments(format!("Invalid option: {option}")));
                }

                match rest.len() {
                    0 => {
                        return Err(Error::InvalidArguments(
                            "A target language and definition and output paths must be supplied."
                                .into(),
                        ));
                    }
                    1 => {
                        return Err(Error::InvalidArguments(
                            "A definition file path is required.".into(),
                        ));
                    }
                    2 => {
                        return Err(Error::InvalidArguments("An output path is required.".into()));
                    }
                    3 => Command::Generate {
                        language: rest[0].clone(),
                        definition_path: rest[1].clone(),
                        output_path: rest[2].clone(),
                    },
                    _ => {
                        return Err(Error::InvalidArguments(
                            "Too many arguments. Only a definition file and output path may be supplied."
                                .into(),
                        ));
                    }
                }
            }

            unknown => {
                return Err(Error::InvalidArguments(format!(
                    "Unknown subcommand: {unknown}"
                )));
            }
        };

        Ok(Self { command })
    }

    /// Executes the selected command.
    pub fn execute(self) -> ExitCode {
        match self.command {
            Command::Version => {
                println!("{}", version_string());
                ExitCode::SUCCESS
            }
            Command::Validate { path } => validate(&path),
            Command::Generate {
                language,
                definition_path,
                output_path,
            } => generate(&language, &definition_path, &output_path),
        }
    }
}

/// Assembles the version string reported by the version subcommand.
fn version_string() -> String {
    let (number, suffix) = match VERSION.split_once('-') {
        Some((number, suffix)) => (number, Some(suffix)),
        None => (VERSION, None),
    };

    let mut version = format!("Entangle v{number}");

    if let Some(suffix) = suffix {
        version.push_str(&format!("-{suffix}"));

        if let Some(commit) = GIT_COMMIT {
            version.push_str(&format!(" ({commit})"));
        }
    }

    version
}

/// Reads and decodes a definition file.
fn load_source(path: &str) -> Result<Source, String> {
    let data = fs::read(path).map_err(|error| format!("Failed to open {path}: {error}"))?;
    Source::from_bytes(&data, path).map_err(|error| format!("Failed to read {path}: {error}"))
}

/// Validates a definition file by parsing it and printing any diagnostic.
fn validate(path: &str) -> ExitCode {
    let src = match load_source(path) {
        Ok(src) => src,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };

    match parser::parse(&src) {
        Ok(_) => ExitCode::SUCCESS,
        Err(diagnostic) => {
            let _ = diagnostic.print();
            ExitCode::FAILURE
        }
    }
}

/// Generates an implementation from a definition file.
fn generate(language: &str, definition_path: &str, output_path: &str) -> ExitCode {
    let Some(generator) = generators::lookup(language) else {
        eprintln!("Error: Invalid target language: {language}");
        return ExitCode::FAILURE;
    };

    let src = match load_source(definition_path) {
        Ok(src) => src,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let interface = match parser::parse(&src) {
        Ok(interface) => interface,
        Err(diagnostic) => {
            let _ = diagnostic.print();
            return ExitCode::FAILURE;
        }
    };

    // Make sure the output directory exists.
    let output = Path::new(output_path);

    if output.exists() {
        if !output.is_dir() {
            eprintln!("Error: Output path is not a directory: {output_path}");
            return ExitCode::FAILURE;
        }
    } else if let Err(error) = fs::create_dir_all(output) {
        eprintln!("Error: Failed to create output directory '{output_path}': {error}");
        return ExitCode::FAILURE;
    }

    match generator.generate(&interface, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: Failed to generate implementation: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Renders an aligned, wrapped name/synopsis list for usage output.
fn usage_list(elements: &[(&str, &str)]) -> String {
    let max_name_length = elements
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    let indentation = ((2 + max_name_length + 5) / 4) * 4;
    let wrapper = TextWrapper::simple(79 - indentation);
    let prefix = " ".repeat(indentation);
    let mut result = Vec::new();

    for (name, synopsis) in elements {
        for (i, line) in wrapper.wrap(synopsis).iter().enumerate() {
            if i == 0 {
                let padding = " ".repeat(indentation - 2 - name.len());
                result.push(format!("  {name}{padding}{line}"));
            } else {
                result.push(format!("{prefix}{line}"));
            }
        }
    }

    result.join("\n")
}

/// The top-level usage text.
fn usage() -> String {
    let subcommands = usage_list(&[
        ("version", "Show Entangle version."),
        ("validate", "Validate a definition file."),
        ("generate", "Generate a target from a definition file."),
    ]);

    let languages: Vec<(&str, &str)> = generators::target_languages()
        .iter()
        .map(|language| (language.identifier, language.synopsis))
        .collect();

    format!(
        "Usage: entangle <subcommand> [arguments]\n\n\
         Subcommands:\n\n{subcommands}\n\n\
         Target languages for generate:\n\n{}",
        usage_list(&languages)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn version_flag_is_rewritten_at_any_position() {
        for fixture in [
            vec!["-v"],
            vec!["--version"],
            vec!["validate", "-v"],
            vec!["generate", "docs", "--version", "in.etg", "out"],
        ] {
            let cli = Cli::from_args(args(&fixture)).unwrap();
            assert!(matches!(cli.command, Command::Version), "for {fixture:?}");
        }
    }

    #[test]
    fn validate_requires_exactly_one_path() {
        assert!(Cli::from_args(args(&["validate"])).is_err());
        assert!(Cli::from_args(args(&["validate", "a.etg", "b.etg"])).is_err());

        let cli = Cli::from_args(args(&["validate", "a.etg"])).unwrap();
        assert!(matches!(cli.command, Command::Validate { .. }));
    }

    #[test]
    fn generate_requires_language_and_paths() {
        assert!(Cli::from_args(args(&["generate"])).is_err());
        assert!(Cli::from_args(args(&["generate", "docs"])).is_err());
        assert!(Cli::from_args(args(&["generate", "docs", "a.etg"])).is_err());
        assert!(Cli::from_args(args(&["generate", "docs", "a.etg", "out", "extra"])).is_err());

        let cli = Cli::from_args(args(&["generate", "docs", "a.etg", "out"])).unwrap();
        assert!(matches!(cli.command, Command::Generate { .. }));
    }

    #[test]
    fn unknown_subcommands_are_rejected() {
        assert!(Cli::from_args(args(&["frobnicate"])).is_err());
        assert!(Cli::from_args(args(&[])).is_err());
    }

    #[test]
    fn version_string_starts_with_the_product_name() {
        let version = version_string();
        assert!(version.starts_with("Entangle v"));
    }

    #[test]
    fn usage_lists_align_synopses() {
        let rendered = usage_list(&[("one", "First."), ("longer", "Second.")]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  one"));
        assert!(lines[1].starts_with("  longer"));

        // Both synopses start in the same column.
        assert_eq!(
            lines[0].find("First.").unwrap(),
            lines[1].find("Second.").unwrap()
        );
    }
}
