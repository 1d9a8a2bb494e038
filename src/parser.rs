// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! The parser for Entangle definition files.
//!
//! [`parse`] drives a recursive-descent state machine over the token
//! stream and produces a validated [`Interface`] declaration. The first
//! diagnostic stops parsing; no recovery is attempted.

use lazy_static::lazy_static;
use regex::Regex;

use crate::declarations::{
    DefinitionName, Enum, Exception, Function, Interface, PrimitiveKind, Service, Struct, Type,
};
use crate::diagnostics::{Diagnostic, Frame};
use crate::lexer::Lexer;
use crate::source::Source;
use crate::token::{Position, Token, TokenKind};

lazy_static! {
    static ref LOWER_CAMEL_CASE: Regex = Regex::new("^[a-z][a-zA-Z0-9]*$").unwrap();
    static ref UPPER_CAMEL_CASE: Regex = Regex::new("^[A-Z][a-zA-Z0-9]*$").unwrap();
    static ref LOWER_CAMEL_OR_SNAKE_CASE: Regex = Regex::new("^[a-z][_a-zA-Z0-9]*$").unwrap();
}

/// Identifiers reserved in every name role.
const RESERVED_IDENTIFIERS: &[&str] = &[
    "int64", "uint64", "float64", "int32", "uint32", "float32", "import", "typedef", "int8",
    "uint8", "int16", "uint16", "struct", "service", "enum", "binary", "bool", "const",
];

const RESERVED_ARGUMENT_NAMES: &[&str] = &["notify", "trace"];

const RESERVED_FIELD_NAMES: &[&str] = &["Serialize", "Deserialize"];

const RESERVED_DEFINITION_NAMES: &[&str] = &["entangle"];

/// Parses an Entangle definition file to an interface declaration.
pub fn parse(src: &Source) -> Result<Interface, Diagnostic<'_>> {
    let parser = SourceParser {
        lexer: Lexer::new(src, Vec::new()),
        src,
        docs: DocBuffer::default(),
        frames: Vec::new(),
        prev: Token::default(),
        tok: Token::default(),
        interface: Interface::new(),
    };

    parser.parse()
}

/// Pending documentation lines, owned by the parser.
///
/// Lines are pushed as they are lexed and consumed into paragraphs when
/// the documented declaration is constructed.
#[derive(Default)]
struct DocBuffer {
    lines: Vec<Token>,
}

impl DocBuffer {
    fn push(&mut self, line: Token) {
        self.lines.push(line);
    }

    fn reset(&mut self) {
        self.lines.clear();
    }

    /// Consumes the buffered lines into documentation paragraphs.
    ///
    /// Consecutive non-empty lines join with a single space; a blank line
    /// separates paragraphs. A single leading space is stripped from each
    /// line and trailing whitespace is trimmed.
    fn paragraphs(&mut self) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut segments: Vec<String> = Vec::new();

        for line in self.lines.drain(..) {
            let segment = line.text;

            if segment.trim().is_empty() {
                if !segments.is_empty() {
                    paragraphs.push(segments.join(" "));
                    segments.clear();
                }
            } else {
                let segment = segment
                    .strip_prefix(' ')
                    .unwrap_or(segment.as_str())
                    .trim_end()
                    .to_string();
                segments.push(segment);
            }
        }

        if !segments.is_empty() {
            paragraphs.push(segments.join(" "));
        }

        paragraphs
    }
}

/// The self reference allowed, if any, while parsing a type.
#[derive(Clone, Copy)]
enum SelfReference<'s> {
    /// No enclosing declaration.
    None,

    /// The struct whose fields are being parsed. A nilable reference to
    /// it resolves to the struct itself once it is registered.
    Struct(&'s str),

    /// The function whose arguments or return type are being parsed.
    Function(&'s str),
}

impl SelfReference<'_> {
    fn name(&self) -> Option<&str> {
        match *self {
            SelfReference::None => None,
            SelfReference::Struct(name) | SelfReference::Function(name) => Some(name),
        }
    }
}

/// Internal context manager for parsing one source file.
struct SourceParser<'a> {
    src: &'a Source,
    lexer: Lexer<'a>,
    docs: DocBuffer,
    frames: Vec<Frame<'a>>,
    prev: Token,
    tok: Token,
    interface: Interface,
}

impl<'a> SourceParser<'a> {
    fn next(&mut self) -> Result<(), Diagnostic<'a>> {
        self.prev = std::mem::take(&mut self.tok);
        self.tok = self.lexer.next_token()?;
        Ok(())
    }

    fn parse_error(
        &self,
        description: impl Into<String>,
        start: Position,
        end: Position,
    ) -> Diagnostic<'a> {
        Diagnostic::new(description, start, end, self.src, &self.frames)
    }

    fn parse_error_here(&self, description: impl Into<String>) -> Diagnostic<'a> {
        Diagnostic::for_token(description, &self.tok, self.src, &self.frames)
    }

    /// Expects a punctuation character and moves past it.
    ///
    /// The context description is used as "... in <context>".
    fn expect_rune(&mut self, r: char, context: &str) -> Result<(), Diagnostic<'a>> {
        match self.tok.kind {
            TokenKind::Punctuation(c) if c == r => self.next(),
            TokenKind::NewLine => Err(self.parse_error_here(format!(
                "unexpected new line in {context}, expected '{r}'"
            ))),
            TokenKind::EndOfFile => Err(self.parse_error_here(format!(
                "unexpected end of file in {context}, expected '{r}'"
            ))),
            _ => Err(self.parse_error_here(format!("expected '{r}' in {context}"))),
        }
    }

    fn skip_new_lines(&mut self) -> Result<(), Diagnostic<'a>> {
        while self.tok.kind == TokenKind::NewLine {
            self.next()?;
        }

        Ok(())
    }

    fn next_and_skip_new_lines(&mut self) -> Result<(), Diagnostic<'a>> {
        self.next()?;
        self.skip_new_lines()
    }

    /// Skips new lines, storing documentation lines along the way.
    fn skip_new_lines_store_documentation(&mut self) -> Result<(), Diagnostic<'a>> {
        self.docs.reset();

        loop {
            match self.tok.kind {
                TokenKind::NewLine => {
                    // A blank line inside a documentation block separates
                    // paragraphs; anything else resets the buffer.
                    if self.prev.kind != TokenKind::DocumentationLine {
                        self.docs.reset();
                    }
                }
                TokenKind::DocumentationLine => {
                    self.docs.push(self.tok.clone());
                }
                _ => return Ok(()),
            }

            self.next()?;
        }
    }

    fn parse(mut self) -> Result<Interface, Diagnostic<'a>> {
        self.next()?;

        // The file starts with the definition statement, preceded only by
        // documentation and blank lines.
        loop {
            match self.tok.kind {
                TokenKind::NewLine => {
                    if self.prev.kind != TokenKind::DocumentationLine {
                        self.docs.reset();
                    }
                    self.next()?;
                }
                TokenKind::DocumentationLine => {
                    self.docs.push(self.tok.clone());
                    self.next()?;
                }
                TokenKind::Definition => {
                    self.parse_definition()?;
                    break;
                }
                TokenKind::EndOfFile => {
                    return Err(self.parse_error_here(
                        "unexpected end of file in definition file, expected 'definition'",
                    ));
                }
                _ => {
                    return Err(self.parse_error_here("unexpected token, expected 'definition'"));
                }
            }
        }

        // Read through till the end.
        loop {
            match self.tok.kind {
                TokenKind::NewLine => {
                    if self.prev.kind != TokenKind::DocumentationLine {
                        self.docs.reset();
                    }
                    self.next()?;
                }
                TokenKind::DocumentationLine => {
                    self.docs.push(self.tok.clone());
                    self.next()?;
                }
                TokenKind::Import => self.parse_import()?,
                TokenKind::Struct => self.parse_struct()?,
                TokenKind::Exception => self.parse_exception()?,
                TokenKind::Enum => self.parse_enum()?,
                TokenKind::Service => self.parse_service()?,
                TokenKind::EndOfFile => break,
                _ => return Err(self.parse_error_here("unexpected token")),
            }
        }

        Ok(self.interface)
    }

    fn parse_definition(&mut self) -> Result<(), Diagnostic<'a>> {
        self.next()?;

        match self.tok.kind {
            TokenKind::NewLine => {
                return Err(self.parse_error_here("unexpected end of line in definition statement"));
            }
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here("unexpected end of file in definition statement"));
            }
            TokenKind::Identifier => {
                let name = self.validate_definition_name()?;
                self.interface.set_name(name);

                let documentation = self.docs.paragraphs();
                self.interface.set_documentation(documentation);
            }
            _ => return Err(self.parse_error_here("expected definition name")),
        }

        self.next()?;

        // The definition name is followed by a new line.
        match self.tok.kind {
            TokenKind::NewLine | TokenKind::EndOfFile => self.next(),
            _ => Err(self.parse_error_here("expected new line following definition name")),
        }
    }

    fn parse_import(&mut self) -> Result<(), Diagnostic<'a>> {
        let start = self.tok.span.start;

        // If the next token is an identifier, this is a named import.
        self.next()?;

        let mut named = false;
        if self.tok.kind == TokenKind::Identifier {
            self.validate_import_name()?;
            named = true;
            self.next()?;
        }

        // At this point the import path follows as a literal.
        match self.tok.kind {
            TokenKind::NewLine => {
                return Err(self.parse_error_here("unexpected end of line in import statement"));
            }
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here("unexpected end of file in import statement"));
            }
            TokenKind::Literal => {
                if self.tok.text.trim().is_empty() {
                    return Err(self.parse_error_here("empty import path"));
                }
            }
            _ if named => return Err(self.parse_error_here("expected import path")),
            _ => return Err(self.parse_error_here("expected import name or import path")),
        }

        let end = self.tok.span.end;
        Err(self.parse_error("imports are currently not supported", start, end))
    }

    fn parse_exception(&mut self) -> Result<(), Diagnostic<'a>> {
        self.next()?;

        let name = match self.tok.kind {
            TokenKind::NewLine => {
                return Err(self.parse_error_here("unexpected end of line in exception declaration"));
            }
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here("unexpected end of file in exception declaration"));
            }
            TokenKind::Identifier => {
                self.validate_type_name()?;
                let name = self.tok.text.clone();

                if self.interface.name_in_use(&name) {
                    return Err(self.parse_error_here(format!(
                        "exception name '{name}' would override previous type declaration"
                    )));
                }

                name
            }
            _ => return Err(self.parse_error_here("expected struct name")),
        };

        self.next()?;

        match self.tok.kind {
            TokenKind::NewLine | TokenKind::EndOfFile => {}
            _ => {
                return Err(
                    self.parse_error_here("expected new line following exception declaration")
                );
            }
        }

        let documentation = self.docs.paragraphs();
        self.interface.add_exception(Exception::new(name, documentation));

        self.next()
    }

    fn parse_struct(&mut self) -> Result<(), Diagnostic<'a>> {
        let context = "struct declaration";
        let field_context = "struct field declaration";

        // Parse the name.
        self.next()?;

        let name = match self.tok.kind {
            TokenKind::NewLine => {
                return Err(self.parse_error_here(format!("unexpected end of line in {context}")));
            }
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here(format!("unexpected end of file in {context}")));
            }
            TokenKind::Identifier => {
                self.validate_type_name()?;
                let name = self.tok.text.clone();

                if self.interface.name_in_use(&name) {
                    return Err(self.parse_error_here(format!(
                        "struct name '{name}' would override previous type declaration"
                    )));
                }

                name
            }
            _ => return Err(self.parse_error_here("expected struct name")),
        };

        self.next_and_skip_new_lines()?;

        // A ':' marks inheritance from a previously declared struct.
        let mut parent: Option<Struct> = None;

        if self.tok.kind == TokenKind::Punctuation(':') {
            self.next_and_skip_new_lines()?;

            match self.tok.kind {
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {context}"))
                    );
                }
                TokenKind::Identifier => {
                    let parent_name = self.tok.text.clone();

                    match self.interface.struct_named(&parent_name) {
                        Some(decl) => parent = Some(decl.clone()),
                        None => {
                            return Err(self.parse_error_here(format!(
                                "unknown parent struct '{parent_name}'"
                            )));
                        }
                    }
                }
                _ => return Err(self.parse_error_here("expected parent struct name")),
            }

            self.next_and_skip_new_lines()?;
        }

        self.expect_rune('{', context)?;

        // Inheriting copies the parent's fields at declaration time.
        let documentation = self.docs.paragraphs();
        let mut decl = match &parent {
            Some(parent) => parent.inherit(name, documentation),
            None => Struct::new(name, documentation),
        };

        // From here on out, documentation and field definitions.
        loop {
            self.skip_new_lines_store_documentation()?;

            if self.tok.kind == TokenKind::Punctuation('}') {
                self.docs.reset();
                break;
            }

            let index = match self.tok.kind {
                TokenKind::UintConstant(index) => {
                    if index == 0 {
                        return Err(self.parse_error_here("field indexes are 1-based"));
                    }
                    if decl.field_index_in_use(index) {
                        return Err(
                            self.parse_error_here(format!("field index {index} already in use"))
                        );
                    }

                    index
                }
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {context}"))
                    );
                }
                _ => return Err(self.parse_error_here("expected field index")),
            };

            self.next()?;
            self.expect_rune(':', field_context)?;

            let field_name = match self.tok.kind {
                TokenKind::Identifier => {
                    self.validate_field_name()?;
                    let name = self.tok.text.clone();

                    if decl.field_name_in_use(&name) {
                        return Err(
                            self.parse_error_here(format!("field name '{name}' already in use"))
                        );
                    }

                    name
                }
                TokenKind::NewLine => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of line in {field_context}"))
                    );
                }
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {field_context}"))
                    );
                }
                _ => {
                    return Err(
                        self.parse_error_here("expected field name in struct field definition")
                    );
                }
            };

            self.next()?;

            let field_type = self.parse_type(field_context, SelfReference::Struct(decl.name()))?;

            self.next()?;

            match self.tok.kind {
                TokenKind::NewLine => {}
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {context}"))
                    );
                }
                _ => {
                    return Err(
                        self.parse_error_here("expected new line after struct field definition")
                    );
                }
            }

            let documentation = self.docs.paragraphs();
            decl.add_field(index, field_name, documentation, field_type);

            self.next()?;
        }

        self.expect_rune('}', context)?;

        match self.tok.kind {
            TokenKind::NewLine | TokenKind::EndOfFile => {}
            _ => return Err(self.parse_error_here("expected new line following '}'")),
        }

        self.interface.add_struct(decl);

        self.next()
    }

    fn parse_enum(&mut self) -> Result<(), Diagnostic<'a>> {
        let context = "enumeration declaration";
        let value_context = "enumeration value declaration";

        // Parse the name.
        self.next()?;

        let name = match self.tok.kind {
            TokenKind::NewLine => {
                return Err(self.parse_error_here(format!("unexpected end of line in {context}")));
            }
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here(format!("unexpected end of file in {context}")));
            }
            TokenKind::Identifier => {
                self.validate_type_name()?;
                let name = self.tok.text.clone();

                if self.interface.name_in_use(&name) {
                    return Err(self.parse_error_here(format!(
                        "enumeration name '{name}' would override previous type declaration"
                    )));
                }

                name
            }
            _ => return Err(self.parse_error_here("expected enumeration name")),
        };

        self.next_and_skip_new_lines()?;
        self.expect_rune('{', context)?;

        let documentation = self.docs.paragraphs();
        let mut decl = Enum::new(name.clone(), documentation);

        // The enumeration name is reserved before its values are parsed,
        // so a value cannot shadow its own enumeration.
        self.interface.mark_name_as_used(&name);

        // From here on out, documentation and value definitions.
        loop {
            self.skip_new_lines_store_documentation()?;

            if self.tok.kind == TokenKind::Punctuation('}') {
                self.docs.reset();
                break;
            }

            let value = match self.tok.kind {
                TokenKind::UintConstant(value) => {
                    if value > i64::MAX as u64 {
                        return Err(self.parse_error_here("enumeration value out of range"));
                    }

                    value as i64
                }
                TokenKind::IntConstant(value) => value,
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {context}"))
                    );
                }
                _ => return Err(self.parse_error_here("expected field index")),
            };

            if let Some(existing) = decl.value(value) {
                return Err(self.parse_error_here(format!(
                    "another enumeration value in '{}' already has this value: '{}'",
                    decl.name(),
                    existing.name
                )));
            }

            self.next()?;
            self.expect_rune(':', value_context)?;

            let value_name = match self.tok.kind {
                TokenKind::Identifier => {
                    self.validate_enum_value_name()?;
                    let value_name = self.tok.text.clone();

                    if self.interface.name_in_use(&value_name) {
                        return Err(self.parse_error_here(format!(
                            "enumeration value name '{value_name}' would override previous type definition"
                        )));
                    }

                    value_name
                }
                TokenKind::NewLine => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of line in {value_context}"))
                    );
                }
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {value_context}"))
                    );
                }
                _ => {
                    return Err(self.parse_error_here(format!(
                        "expected name in {value_context}"
                    )));
                }
            };

            self.next()?;

            match self.tok.kind {
                TokenKind::NewLine => {}
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {context}"))
                    );
                }
                _ => {
                    return Err(self.parse_error_here(
                        "expected new line after enumeration value definition",
                    ));
                }
            }

            let documentation = self.docs.paragraphs();
            decl.add_value(value, value_name, documentation);

            self.next()?;
        }

        self.expect_rune('}', context)?;

        match self.tok.kind {
            TokenKind::NewLine | TokenKind::EndOfFile => {}
            _ => return Err(self.parse_error_here("expected new line following '}'")),
        }

        self.interface.add_enum(decl);

        self.next()
    }

    fn parse_service(&mut self) -> Result<(), Diagnostic<'a>> {
        let context = "service declaration";

        // Parse the name.
        self.next()?;

        let name = match self.tok.kind {
            TokenKind::NewLine => {
                return Err(self.parse_error_here(format!("unexpected end of line in {context}")));
            }
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here(format!("unexpected end of file in {context}")));
            }
            TokenKind::Identifier => {
                self.validate_type_name()?;
                let name = self.tok.text.clone();

                if self.interface.name_in_use(&name) {
                    return Err(self.parse_error_here(format!(
                        "service name '{name}' would override previous type declaration"
                    )));
                }

                name
            }
            _ => return Err(self.parse_error_here("expected service name")),
        };

        self.next_and_skip_new_lines()?;

        // A ':' marks inheritance from a previously declared service.
        let mut parent: Option<Service> = None;

        if self.tok.kind == TokenKind::Punctuation(':') {
            self.next_and_skip_new_lines()?;

            match self.tok.kind {
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {context}"))
                    );
                }
                TokenKind::Identifier => {
                    let parent_name = self.tok.text.clone();

                    match self.interface.service_named(&parent_name) {
                        Some(decl) => parent = Some(decl.clone()),
                        None => {
                            return Err(self.parse_error_here(format!(
                                "unknown parent service '{parent_name}'"
                            )));
                        }
                    }
                }
                _ => return Err(self.parse_error_here("expected parent service name")),
            }

            self.next_and_skip_new_lines()?;
        }

        self.expect_rune('{', context)?;

        // Inheriting copies the parent's functions at declaration time.
        let documentation = self.docs.paragraphs();
        let mut decl = match &parent {
            Some(parent) => parent.inherit(name, documentation),
            None => Service::new(name, documentation),
        };

        // From here on out, documentation and function definitions.
        loop {
            self.skip_new_lines_store_documentation()?;

            if self.tok.kind == TokenKind::Punctuation('}') {
                self.docs.reset();
                break;
            }

            let function = self.parse_service_function(&decl)?;
            decl.add_function(function);
        }

        self.expect_rune('}', context)?;

        match self.tok.kind {
            TokenKind::NewLine | TokenKind::EndOfFile => {}
            _ => return Err(self.parse_error_here("expected new line following '}'")),
        }

        self.interface.add_service(decl);

        self.next()
    }

    fn parse_service_function(&mut self, service: &Service) -> Result<Function, Diagnostic<'a>> {
        let context = "service function definition";
        let argument_context = "service function argument declaration";

        // Parse the name.
        let name = match self.tok.kind {
            TokenKind::NewLine => {
                return Err(self.parse_error_here(format!("unexpected end of line in {context}")));
            }
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here(format!("unexpected end of file in {context}")));
            }
            TokenKind::Identifier => {
                self.validate_function_name()?;
                let name = self.tok.text.clone();

                if service.function_name_in_use(&name) {
                    return Err(self.parse_error_here(format!(
                        "function name '{name}' has already been declared"
                    )));
                }

                name
            }
            _ => return Err(self.parse_error_here("expected function name")),
        };

        self.next()?;

        let documentation = self.docs.paragraphs();
        let mut decl = Function::new(name, documentation);

        self.expect_rune('(', context)?;

        // Parse the arguments. They are comma separated; the comma is
        // required between arguments and not permitted before the closing
        // parenthesis.
        let mut after_comma = false;

        loop {
            self.skip_new_lines_store_documentation()?;

            if self.tok.kind == TokenKind::Punctuation(')') {
                if after_comma {
                    return Err(
                        self.parse_error_here(format!("expected argument index in {context}"))
                    );
                }
                break;
            }

            let index = match self.tok.kind {
                TokenKind::UintConstant(index) => {
                    if index == 0 {
                        return Err(self.parse_error_here("argument indexes are 1-based"));
                    }
                    if decl.argument_index_in_use(index) {
                        return Err(self.parse_error_here(format!(
                            "argument index {index} already in use"
                        )));
                    }

                    index
                }
                TokenKind::EndOfFile => {
                    return Err(
                        self.parse_error_here(format!("unexpected end of file in {context}"))
                    );
                }
                _ => {
                    return Err(
                        self.parse_error_here(format!("expected argument index in {context}"))
                    );
                }
            };

            self.next()?;
            self.expect_rune(':', argument_context)?;

            let argument_name = match self.tok.kind {
                TokenKind::Identifier => {
                    self.validate_argument_name()?;
                    let argument_name = self.tok.text.clone();

                    if decl.argument_name_in_use(&argument_name) {
                        return Err(self.parse_error_here(format!(
                            "argument named '{argument_name}' already declared"
                        )));
                    }

                    argument_name
                }
                TokenKind::NewLine => {
                    return Err(self.parse_error_here(format!(
                        "unexpected end of line in {argument_context}"
                    )));
                }
                TokenKind::EndOfFile => {
                    return Err(self.parse_error_here(format!(
                        "unexpected end of file in {argument_context}"
                    )));
                }
                _ => {
                    return Err(self.parse_error_here(format!(
                        "expected argument name in {argument_context}"
                    )));
                }
            };

            self.next()?;

            let argument_type =
                self.parse_type(argument_context, SelfReference::Function(decl.name()))?;

            self.next()?;

            after_comma = false;
            if self.tok.kind != TokenKind::Punctuation(')') {
                self.expect_rune(',', context)?;
                after_comma = true;
            }

            decl.add_argument(index, argument_name, argument_type);
        }

        self.expect_rune(')', context)?;

        // A non-newline token after the closing parenthesis is the return
        // type; no type means the function is void.
        if !matches!(self.tok.kind, TokenKind::NewLine | TokenKind::EndOfFile) {
            let return_type = self.parse_type(context, SelfReference::Function(decl.name()))?;
            decl.set_return_type(return_type);

            self.next()?;
        }

        match self.tok.kind {
            TokenKind::NewLine => {}
            TokenKind::EndOfFile => {
                return Err(self.parse_error_here(format!("unexpected end of file in {context}")));
            }
            _ => {
                return Err(self.parse_error_here(format!("expected new line after {context}")));
            }
        }

        self.next()?;

        Ok(decl)
    }

    /// Parses a type.
    fn parse_type(
        &mut self,
        context: &str,
        self_reference: SelfReference<'_>,
    ) -> Result<Type, Diagnostic<'a>> {
        // A '*' marks the type as nilable.
        let mut nilable = false;

        if self.tok.kind == TokenKind::Punctuation('*') {
            nilable = true;
            self.next()?;
        }

        match self.tok.kind {
            TokenKind::Identifier => {
                let name = self.tok.text.clone();

                if self_reference.name() == Some(name.as_str()) && !nilable {
                    return Err(
                        self.parse_error_here("non-nilable self references are not allowed")
                    );
                }

                if self.interface.struct_named(&name).is_some() {
                    Ok(Type::struct_reference(name, nilable))
                } else if self.interface.enum_named(&name).is_some() {
                    Ok(Type::enum_reference(name, nilable))
                } else if let SelfReference::Struct(self_name) = self_reference {
                    // A nilable self reference resolves through the
                    // interface once the struct is registered.
                    if self_name == name {
                        Ok(Type::struct_reference(name, nilable))
                    } else {
                        Err(self.parse_error_here(format!("unknown type '{name}'")))
                    }
                } else {
                    Err(self.parse_error_here(format!("unknown type '{name}'")))
                }
            }

            TokenKind::Map => {
                self.next()?;

                match self.tok.kind {
                    TokenKind::Punctuation('[') => {}
                    TokenKind::NewLine => {
                        return Err(
                            self.parse_error_here(format!("unexpected end of line in {context}"))
                        );
                    }
                    TokenKind::EndOfFile => {
                        return Err(
                            self.parse_error_here(format!("unexpected end of file in {context}"))
                        );
                    }
                    _ => return Err(self.parse_error_here("expected '['")),
                }

                self.next()?;
                let key = self.parse_type(context, SelfReference::None)?;

                self.next()?;

                match self.tok.kind {
                    TokenKind::Punctuation(']') => {}
                    TokenKind::NewLine => {
                        return Err(
                            self.parse_error_here(format!("unexpected end of line in {context}"))
                        );
                    }
                    TokenKind::EndOfFile => {
                        return Err(
                            self.parse_error_here(format!("unexpected end of file in {context}"))
                        );
                    }
                    _ => return Err(self.parse_error_here("expected ']'")),
                }

                self.next()?;
                let value = self.parse_type(context, SelfReference::None)?;

                Ok(Type::map(key, value, nilable))
            }

            TokenKind::Punctuation('[') => {
                self.next()?;

                match self.tok.kind {
                    TokenKind::Punctuation(']') => {}
                    TokenKind::NewLine => {
                        return Err(
                            self.parse_error_here(format!("unexpected end of line in {context}"))
                        );
                    }
                    TokenKind::EndOfFile => {
                        return Err(
                            self.parse_error_here(format!("unexpected end of file in {context}"))
                        );
                    }
                    _ => return Err(self.parse_error_here("expected ']'")),
                }

                self.next()?;
                let element = self.parse_type(context, SelfReference::None)?;

                Ok(Type::list(element, nilable))
            }

            TokenKind::Bool => Ok(Type::primitive(PrimitiveKind::Bool, nilable)),
            TokenKind::String => Ok(Type::primitive(PrimitiveKind::String, nilable)),
            TokenKind::Binary => Ok(Type::primitive(PrimitiveKind::Binary, nilable)),
            TokenKind::Float32 => Ok(Type::primitive(PrimitiveKind::Float32, nilable)),
            TokenKind::Float64 => Ok(Type::primitive(PrimitiveKind::Float64, nilable)),
            TokenKind::Int8 => Ok(Type::primitive(PrimitiveKind::Int8, nilable)),
            TokenKind::Int16 => Ok(Type::primitive(PrimitiveKind::Int16, nilable)),
            TokenKind::Int32 => Ok(Type::primitive(PrimitiveKind::Int32, nilable)),
            TokenKind::Int64 => Ok(Type::primitive(PrimitiveKind::Int64, nilable)),
            TokenKind::Uint8 => Ok(Type::primitive(PrimitiveKind::Uint8, nilable)),
            TokenKind::Uint16 => Ok(Type::primitive(PrimitiveKind::Uint16, nilable)),
            TokenKind::Uint32 => Ok(Type::primitive(PrimitiveKind::Uint32, nilable)),
            TokenKind::Uint64 => Ok(Type::primitive(PrimitiveKind::Uint64, nilable)),

            TokenKind::NewLine => {
                Err(self.parse_error_here(format!("unexpected end of line in {context}")))
            }
            TokenKind::EndOfFile => {
                Err(self.parse_error_here(format!("unexpected end of file in {context}")))
            }
            _ => Err(self.parse_error_here(format!("expected type in {context}"))),
        }
    }

    fn validate_definition_name(&self) -> Result<DefinitionName, Diagnostic<'a>> {
        let value = self.tok.text.clone();

        if RESERVED_IDENTIFIERS.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved identifier")));
        }

        if RESERVED_DEFINITION_NAMES.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved definition name")));
        }

        DefinitionName::try_new(value.clone()).map_err(|_| {
            self.parse_error_here(format!(
                "'{value}' is not a valid definition name. Definition names must be lower snake case"
            ))
        })
    }

    fn validate_import_name(&self) -> Result<(), Diagnostic<'a>> {
        let value = &self.tok.text;

        if RESERVED_IDENTIFIERS.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved identifier")));
        }

        if !LOWER_CAMEL_OR_SNAKE_CASE.is_match(value) {
            return Err(self.parse_error_here(format!(
                "'{value}' is not a valid import name. Import names must be lower camel case or lower snake case"
            )));
        }

        Ok(())
    }

    fn validate_type_name(&self) -> Result<(), Diagnostic<'a>> {
        let value = &self.tok.text;

        if RESERVED_IDENTIFIERS.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved identifier")));
        }

        if !UPPER_CAMEL_CASE.is_match(value) {
            return Err(self.parse_error_here(format!(
                "'{value}' is not a valid type name. Type names must be upper camel case"
            )));
        }

        Ok(())
    }

    fn validate_function_name(&self) -> Result<(), Diagnostic<'a>> {
        let value = &self.tok.text;

        if RESERVED_IDENTIFIERS.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved identifier")));
        }

        if !UPPER_CAMEL_CASE.is_match(value) {
            return Err(self.parse_error_here(format!(
                "'{value}' is not a valid function name. Function names must be upper camel case"
            )));
        }

        Ok(())
    }

    fn validate_enum_value_name(&self) -> Result<(), Diagnostic<'a>> {
        let value = &self.tok.text;

        if RESERVED_IDENTIFIERS.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved identifier")));
        }

        if !UPPER_CAMEL_CASE.is_match(value) {
            return Err(self.parse_error_here(format!(
                "'{value}' is not a valid enumeration value name. Enumeration value names must be upper camel case or upper snake case"
            )));
        }

        Ok(())
    }

    fn validate_field_name(&self) -> Result<(), Diagnostic<'a>> {
        let value = &self.tok.text;

        if RESERVED_IDENTIFIERS.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved identifier")));
        }

        if RESERVED_FIELD_NAMES.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved field name")));
        }

        if !UPPER_CAMEL_CASE.is_match(value) {
            return Err(self.parse_error_here(format!(
                "'{value}' is not a valid field name. Field names must be upper camel case"
            )));
        }

        Ok(())
    }

    fn validate_argument_name(&self) -> Result<(), Diagnostic<'a>> {
        let value = &self.tok.text;

        if RESERVED_IDENTIFIERS.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved identifier")));
        }

        if RESERVED_ARGUMENT_NAMES.contains(&value.as_str()) {
            return Err(self.parse_error_here(format!("'{value}' is a reserved argument name")));
        }

        if !LOWER_CAMEL_CASE.is_match(value) {
            return Err(self.parse_error_here(format!(
                "'{value}' is not a valid argument name. Argument names must be lower camel case"
            )));
        }

        Ok(())
    }
}
