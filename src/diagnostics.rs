// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Diagnostic records and their Clang-style pretty printer.
//!
//! A [`Diagnostic`] is a value: a description plus an ordered chain of
//! [`Frame`]s pointing into source buffers. All frames but the last
//! describe import sites; the last frame is the error site itself. Callers
//! decide whether to pretty print a diagnostic or marshal it.

use std::io;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::source::Source;
use crate::text::{expand_tabs, mask_with_whitespace_expanded};
use crate::token::{Position, Token};

const TAB_WIDTH: usize = 4;

/// One entry in a diagnostic's frame chain.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub source: &'a Source,
    pub start: Position,
    pub end: Position,
}

/// A parse diagnostic with source positions.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{description}")]
pub struct Diagnostic<'a> {
    description: String,
    frames: Vec<Frame<'a>>,
}

impl<'a> Diagnostic<'a> {
    /// Creates a diagnostic covering an explicit span.
    pub fn new(
        description: impl Into<String>,
        start: Position,
        end: Position,
        source: &'a Source,
        frames: &[Frame<'a>],
    ) -> Self {
        let mut all_frames = Vec::with_capacity(frames.len() + 1);
        all_frames.extend_from_slice(frames);
        all_frames.push(Frame { source, start, end });

        Self {
            description: description.into(),
            frames: all_frames,
        }
    }

    /// Creates a diagnostic covering an existing token.
    pub fn for_token(
        description: impl Into<String>,
        token: &Token,
        source: &'a Source,
        frames: &[Frame<'a>],
    ) -> Self {
        Self::new(description, token.span.start, token.span.end, source, frames)
    }

    /// Description of the problem.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The frame chain.
    ///
    /// The last frame describes the actual error, while all previous
    /// frames are guaranteed to describe imports.
    pub fn frames(&self) -> &[Frame<'a>] {
        &self.frames
    }

    /// Pretty prints the diagnostic to standard error.
    pub fn print(&self) -> io::Result<()> {
        let mut stream = StandardStream::stderr(ColorChoice::Auto);
        self.write(&mut stream)
    }

    /// Renders the diagnostic without color codes.
    pub fn render(&self) -> String {
        let mut buffer = Buffer::no_color();
        self.write(&mut buffer)
            .expect("in-memory rendering cannot fail");
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    /// Pretty prints the diagnostic to a color-capable stream.
    ///
    /// Essentially a carbon copy of how Clang prints errors, because it is
    /// so darned helpful.
    pub fn write(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        for (i, frame) in self.frames.iter().enumerate() {
            let last = i == self.frames.len() - 1;

            // Location header and description.
            w.set_color(&bold())?;
            write!(
                w,
                "{}:{}:{}: ",
                frame.source.path(),
                frame.start.line,
                frame.start.character
            )?;

            if !last {
                w.set_color(bold().set_fg(Some(Color::Magenta)))?;
                write!(w, "imported from here")?;
            } else {
                w.set_color(bold().set_fg(Some(Color::Red)))?;
                write!(w, "error: ")?;
                w.set_color(&bold())?;
                write!(w, "{}", self.description)?;
            }

            w.reset()?;
            writeln!(w)?;

            // The offending source line.
            let line = frame.source.line(frame.start.line);
            writeln!(w, "{}", expand_tabs(&line, TAB_WIDTH))?;

            // The pointing arrow and curly marker.
            let start = frame.start.character;
            let mut end = frame.end.character;

            if frame.end.line > frame.start.line {
                end = line.chars().count() + 1;
            }

            if start > 1 {
                let prefix: String = line.chars().take(start - 1).collect();
                write!(w, "{}", mask_with_whitespace_expanded(&prefix, TAB_WIDTH))?;
            }

            w.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(w, "^")?;

            if end > start {
                write!(w, "{}", "~".repeat(end - start))?;
            }

            w.reset()?;
            writeln!(w)?;

            // An empty line between frames.
            if !last {
                writeln!(w)?;
            }
        }

        Ok(())
    }
}

fn bold() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_bold(true);
    spec
}

impl Serialize for Frame<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Frame", 3)?;
        state.serialize_field("path", self.source.path())?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.end()
    }
}

impl Serialize for Diagnostic<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 2)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("frames", &self.frames)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(line: usize, character: usize) -> Position {
        Position { line, character }
    }

    #[test]
    fn renders_a_single_frame_with_markers() {
        let src = Source::from_text("definition demo\nstruct horse {\n}\n", "demo.etg");
        let diag = Diagnostic::new(
            "'horse' is not a valid type name. Type names must be upper camel case",
            position(2, 8),
            position(2, 12),
            &src,
            &[],
        );

        assert_eq!(
            diag.render(),
            "demo.etg:2:8: error: 'horse' is not a valid type name. \
             Type names must be upper camel case\n\
             struct horse {\n       ^~~~~\n"
        );
    }

    #[test]
    fn renders_import_frames_before_the_error_site() {
        let importing = Source::from_text("definition app\nimport \"demo\"\n", "app.etg");
        let imported = Source::from_text("definition demo\nbroken\n", "demo.etg");

        let import_frame = Frame {
            source: &importing,
            start: position(2, 1),
            end: position(2, 13),
        };
        let diag = Diagnostic::new(
            "unexpected token",
            position(2, 1),
            position(2, 6),
            &imported,
            &[import_frame],
        );

        let mut expected = String::new();
        expected.push_str("app.etg:2:1: imported from here\n");
        expected.push_str("import \"demo\"\n");
        expected.push_str(&format!("^{}\n", "~".repeat(12)));
        expected.push('\n');
        expected.push_str("demo.etg:2:1: error: unexpected token\n");
        expected.push_str("broken\n");
        expected.push_str(&format!("^{}\n", "~".repeat(5)));

        assert_eq!(diag.render(), expected);
    }

    #[test]
    fn expands_tabs_in_quoted_lines() {
        let src = Source::from_text("definition demo\n\tbroken\n", "demo.etg");
        let diag = Diagnostic::new("unexpected token", position(2, 2), position(2, 7), &src, &[]);

        assert_eq!(
            diag.render(),
            "demo.etg:2:2: error: unexpected token\n    broken\n    ^~~~~~\n"
        );
    }

    #[test]
    fn extends_markers_to_the_end_of_line_for_multi_line_spans() {
        let src = Source::from_text("definition demo\n\"oops\n", "demo.etg");
        let diag = Diagnostic::new(
            "unexpected end of line in literal",
            position(2, 1),
            position(3, 1),
            &src,
            &[],
        );

        assert_eq!(
            diag.render(),
            "demo.etg:2:1: error: unexpected end of line in literal\n\"oops\n^~~~~~\n"
        );
    }

    #[test]
    fn diagnostic_displays_its_description() {
        let src = Source::from_text("x", "demo.etg");
        let diag = Diagnostic::new("unexpected token", position(1, 1), position(1, 1), &src, &[]);

        assert_eq!(diag.to_string(), "unexpected token");
    }
}
