// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Markdown reference documentation generator.

use std::fs;
use std::path::Path;

use crate::declarations::{Function, Interface};
use crate::text::TextWrapper;

use super::{GenerateError, Generator};

const DOC_WIDTH: usize = 79;

/// Generates a Markdown reference for an interface declaration.
pub struct DocsGenerator;

impl Generator for DocsGenerator {
    fn generate(&self, interface: &Interface, output_path: &Path) -> Result<(), GenerateError> {
        let name = interface.name().unwrap_or("interface");
        let mut out = String::new();

        out.push_str(&format!("# {name}\n"));
        write_paragraphs(&mut out, interface.documentation());

        let enums = interface.enums_sorted_by_name();
        if !enums.is_empty() {
            out.push_str("\n## Enumerations\n");

            for decl in enums {
                out.push_str(&format!("\n### {}\n", decl.name()));
                write_paragraphs(&mut out, decl.documentation());
                out.push('\n');

                for value in decl.values_sorted_by_value() {
                    out.push_str(&format!("- `{}`: `{}`\n", value.value, value.name));
                }
            }
        }

        let structs = interface.structs_sorted_by_name();
        if !structs.is_empty() {
            out.push_str("\n## Structs\n");

            for decl in structs {
                match decl.parent_name() {
                    Some(parent) => {
                        out.push_str(&format!("\n### {} : {}\n", decl.name(), parent));
                    }
                    None => out.push_str(&format!("\n### {}\n", decl.name())),
                }
                write_paragraphs(&mut out, decl.documentation());
                out.push('\n');

                for field in decl.fields_sorted_by_index() {
                    out.push_str(&format!(
                        "- `{}: {} {}`\n",
                        field.index, field.name, field.field_type
                    ));
                }
            }
        }

        let exceptions = interface.exceptions_sorted_by_name();
        if !exceptions.is_empty() {
            out.push_str("\n## Exceptions\n");

            for decl in exceptions {
                out.push_str(&format!("\n### {}\n", decl.name()));
                write_paragraphs(&mut out, decl.documentation());
            }
        }

        let services = interface.services_sorted_by_name();
        if !services.is_empty() {
            out.push_str("\n## Services\n");

            for decl in services {
                match decl.parent_name() {
                    Some(parent) => {
                        out.push_str(&format!("\n### {} : {}\n", decl.name(), parent));
                    }
                    None => out.push_str(&format!("\n### {}\n", decl.name())),
                }
                write_paragraphs(&mut out, decl.documentation());

                for function in decl.functions_sorted_by_name() {
                    out.push_str(&format!("\n#### `{}`\n", signature(function)));
                    write_paragraphs(&mut out, function.documentation());
                }
            }
        }

        fs::write(output_path.join(format!("{name}.md")), out)?;

        Ok(())
    }
}

/// Renders a function signature in definition file syntax.
fn signature(function: &Function) -> String {
    let arguments: Vec<String> = function
        .arguments_sorted_by_index()
        .iter()
        .map(|a| format!("{}: {} {}", a.index, a.name, a.argument_type))
        .collect();

    let mut rendered = format!("{}({})", function.name(), arguments.join(", "));

    if let Some(return_type) = function.return_type() {
        rendered.push_str(&format!(" {return_type}"));
    }

    rendered
}

/// Writes documentation paragraphs, wrapped, separated by blank lines.
fn write_paragraphs(out: &mut String, documentation: &[String]) {
    let wrapper = TextWrapper::simple(DOC_WIDTH);

    for paragraph in documentation {
        out.push('\n');

        for line in wrapper.wrap(paragraph) {
            out.push_str(&line);
            out.push('\n');
        }
    }
}
