// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! The lexer for Entangle definition files.
//!
//! [`Lexer::next_token`] is pull driven and produces one token per call;
//! after the input is exhausted it keeps returning [`TokenKind::EndOfFile`].
//! Errors are reported as [`Diagnostic`] values carrying the offending
//! span.

use crate::diagnostics::{Diagnostic, Frame};
use crate::source::Source;
use crate::token::{Position, Span, Token, TokenKind};

const ERR_EXPECTED_HEXADECIMAL_DIGIT: &str = "expected hexadecimal digit";
const ERR_UNEXPECTED_CHARACTER: &str = "unexpected character";
const ERR_UNEXPECTED_END_OF_LINE_LITERAL: &str = "unexpected end of line in literal";
const ERR_UNEXPECTED_END_OF_LINE_NUMBER: &str = "unexpected end of line in numerical";
const ERR_NUMBER_OUT_OF_RANGE: &str = "number is out of range";

/// White space, not including the line feed, which is a token of its own.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0b' | '\x0c')
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hexadecimal_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters that form single-character tokens or open a literal or
/// comment.
fn is_reserved(c: char) -> bool {
    matches!(
        c,
        '\n' | '"' | '{' | '}' | '[' | ']' | '(' | ')' | ':' | '*' | ',' | '/'
    )
}

/// Characters that may start a numerical value.
fn is_numerical_first(c: char) -> bool {
    is_digit(c) || matches!(c, '+' | '-' | '.')
}

/// Characters valid immediately after an identifier or a numerical value.
fn is_valid_delimiter(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => {
            is_whitespace(c)
                || matches!(
                    c,
                    '\n' | '{' | '}' | '[' | ']' | '(' | ')' | ':' | '.' | '/' | ',' | '*'
                )
        }
    }
}

/// Resolves a completed identifier against the keyword table.
pub fn identifier_kind(identifier: &str) -> TokenKind {
    match identifier {
        "definition" => TokenKind::Definition,
        "import" => TokenKind::Import,
        "typedef" => TokenKind::Typedef,
        "const" => TokenKind::Const,
        "enum" => TokenKind::Enum,
        "struct" => TokenKind::Struct,
        "service" => TokenKind::Service,
        "exception" => TokenKind::Exception,
        "map" => TokenKind::Map,
        "bool" => TokenKind::Bool,
        "string" => TokenKind::String,
        "binary" => TokenKind::Binary,
        "float32" => TokenKind::Float32,
        "float64" => TokenKind::Float64,
        "int8" => TokenKind::Int8,
        "int16" => TokenKind::Int16,
        "int32" => TokenKind::Int32,
        "int64" => TokenKind::Int64,
        "uint8" => TokenKind::Uint8,
        "uint16" => TokenKind::Uint16,
        "uint32" => TokenKind::Uint32,
        "uint64" => TokenKind::Uint64,
        _ => TokenKind::Identifier,
    }
}

/// The lexer.
pub struct Lexer<'a> {
    src: &'a Source,
    data: &'a [char],

    /// Index one past the current character.
    data_position: usize,

    /// Whether a token has already been produced on the current line.
    line_has_had_token: bool,

    /// Previous character, NUL before anything has been read.
    prev: char,

    /// Current character, `None` at end of input.
    cur: Option<char>,

    /// Position of the current character.
    position: Position,

    /// Frames describing the import chain, for error reporting.
    frames: Vec<Frame<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `src`.
    ///
    /// The provided frames are used when reporting errors.
    pub fn new(src: &'a Source, frames: Vec<Frame<'a>>) -> Self {
        Self {
            src,
            data: src.data(),
            data_position: 0,
            line_has_had_token: false,
            prev: '\0',
            cur: Some(' '),
            position: Position {
                line: 1,
                character: 0,
            },
            frames,
        }
    }

    pub fn source(&self) -> &'a Source {
        self.src
    }

    fn parse_error(
        &self,
        description: &str,
        start: Position,
        end: Position,
    ) -> Diagnostic<'a> {
        Diagnostic::new(description, start, end, self.src, &self.frames)
    }

    fn parse_error_here(&self, description: &str) -> Diagnostic<'a> {
        self.parse_error(description, self.position, self.position)
    }

    /// Reads the next character.
    fn next(&mut self) {
        if self.data_position == self.data.len() {
            self.cur = None;
            return;
        }

        if self.cur == Some('\n') {
            self.position.line += 1;
            self.position.character = 1;
            self.line_has_had_token = false;
        } else {
            self.position.character += 1;
        }

        self.prev = self.cur.unwrap_or('\0');
        self.cur = Some(self.data[self.data_position]);
        self.data_position += 1;
    }

    /// Peeks ahead to the next character.
    fn peek(&self) -> Option<char> {
        self.data.get(self.data_position).copied()
    }

    /// Index one past the raw text of the token ending at the current
    /// character.
    fn raw_end(&self) -> usize {
        if self.cur.is_none() {
            self.data_position
        } else {
            self.data_position - 1
        }
    }

    /// End position of a token delimited by the current character.
    fn end_position(&self) -> Position {
        if self.cur.is_none() {
            self.position
        } else {
            self.position.before()
        }
    }

    fn skip_whitespace(&mut self) {
        while self.cur.is_some_and(is_whitespace) {
            self.next();
        }
    }

    fn skip_multi_line_comment(&mut self) {
        loop {
            self.next();

            match self.cur {
                None => return,
                Some('/') if self.prev == '*' => {
                    self.next();
                    return;
                }
                _ => {}
            }
        }
    }

    fn skip_single_line_comment(&mut self) {
        while !matches!(self.cur, None | Some('\n')) {
            self.next();
        }
    }

    /// Parses a documentation line.
    ///
    /// Invoked with the current character on the second slash; `start` is
    /// the position of the first.
    fn parse_single_line_comment(&mut self, start: Position) -> Token {
        let content_start = self.data_position;

        loop {
            self.next();

            match self.cur {
                None => {
                    return Token {
                        kind: TokenKind::DocumentationLine,
                        span: Span {
                            start,
                            end: self.position,
                        },
                        text: self.data[content_start..self.data_position].iter().collect(),
                    };
                }
                Some('\n') => {
                    return Token {
                        kind: TokenKind::DocumentationLine,
                        span: Span {
                            start,
                            end: self.position.before(),
                        },
                        text: self.data[content_start..self.data_position - 1]
                            .iter()
                            .collect(),
                    };
                }
                _ => {}
            }
        }
    }

    /// Parses a quoted string.
    ///
    /// Invoked with the current character just past the opening quote;
    /// `start` is the position of the quote itself.
    fn parse_quoted_string(&mut self, start: Position) -> Result<Token, Diagnostic<'a>> {
        let mut escaped = false;
        let mut value = String::new();

        loop {
            match self.cur {
                None | Some('\n') => {
                    return Err(self.parse_error(
                        ERR_UNEXPECTED_END_OF_LINE_LITERAL,
                        start,
                        self.position,
                    ));
                }

                Some(cur) if escaped => {
                    match cur {
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        _ => value.push(cur),
                    }
                    escaped = false;
                }

                Some('\\') => escaped = true,

                Some('"') => {
                    let end = self.position;
                    self.next();
                    return Ok(Token {
                        kind: TokenKind::Literal,
                        span: Span { start, end },
                        text: value,
                    });
                }

                Some(cur) => value.push(cur),
            }

            self.next();
        }
    }

    /// Parses an identifier.
    ///
    /// Invoked with the guarantee that the current character is a valid
    /// start character for an identifier.
    fn parse_identifier(&mut self, start: Position) -> Result<Token, Diagnostic<'a>> {
        let mut identifier = String::new();
        if let Some(c) = self.cur {
            identifier.push(c);
        }

        loop {
            self.next();

            match self.cur {
                Some(c) if is_identifier_continue(c) => identifier.push(c),
                _ => break,
            }
        }

        // An identifier must be followed by whitespace, a new line, the
        // end of input or a delimiting character.
        if !is_valid_delimiter(self.cur) {
            return Err(self.parse_error_here(ERR_UNEXPECTED_CHARACTER));
        }

        let span = Span {
            start,
            end: self.end_position(),
        };

        Ok(Token {
            kind: identifier_kind(&identifier),
            span,
            text: identifier,
        })
    }

    /// Converts parsed digits into an integer constant token.
    fn int_token(
        &self,
        negative: bool,
        digits: &str,
        base: u32,
        text: String,
        span: Span,
    ) -> Result<Token, Diagnostic<'a>> {
        let magnitude = u64::from_str_radix(digits, base)
            .map_err(|_| self.parse_error(ERR_NUMBER_OUT_OF_RANGE, span.start, span.end))?;

        let kind = if negative {
            if magnitude > (i64::MAX as u64) + 1 {
                return Err(self.parse_error(ERR_NUMBER_OUT_OF_RANGE, span.start, span.end));
            }
            TokenKind::IntConstant(magnitude.wrapping_neg() as i64)
        } else {
            TokenKind::UintConstant(magnitude)
        };

        Ok(Token { kind, span, text })
    }

    /// Parses a number.
    ///
    /// Invoked with a valid starting character for a number.
    fn parse_number(&mut self, start: Position) -> Result<Token, Diagnostic<'a>> {
        let data_start = self.data_position - 1;
        let mut mantissa_start = data_start;
        let mut negative = false;

        // The sign, if present, is part of the raw text but not of the
        // digits handed to the integer conversion.
        if matches!(self.cur, Some('+') | Some('-')) {
            negative = self.cur == Some('-');
            mantissa_start += 1;
            self.next();
        }

        // Check immediately if this is a hexadecimal number by peeking
        // ahead.
        if self.cur == Some('0') && matches!(self.peek(), Some('x') | Some('X')) {
            self.next();
            self.next();

            while self.cur.is_some_and(is_hexadecimal_digit) {
                self.next();
            }

            if !is_valid_delimiter(self.cur) {
                return Err(self.parse_error_here(ERR_UNEXPECTED_CHARACTER));
            }

            let raw_end = self.raw_end();
            let digits: String = self.data[mantissa_start + 2..raw_end].iter().collect();

            if digits.is_empty() {
                return Err(self.parse_error_here(ERR_EXPECTED_HEXADECIMAL_DIGIT));
            }

            let text: String = self.data[data_start..raw_end].iter().collect();
            let span = Span {
                start,
                end: self.end_position(),
            };

            return self.int_token(negative, &digits, 16, text, span);
        }

        // Assume a mantissa is being parsed and reduce to a more specific
        // case as soon as possible: whether this is a decimal or an octal
        // integer is only known once neither a period nor an exponent
        // prefix can follow.
        let mut digits_before_dot = 0;

        while self.cur.is_some_and(is_digit) {
            digits_before_dot += 1;
            self.next();
        }

        if !matches!(self.cur, Some('.') | Some('e') | Some('E')) {
            if digits_before_dot == 0 {
                if matches!(self.cur, None | Some('\n')) {
                    return Err(self.parse_error_here(ERR_UNEXPECTED_END_OF_LINE_NUMBER));
                }
                return Err(self.parse_error_here(ERR_UNEXPECTED_CHARACTER));
            }

            if !is_valid_delimiter(self.cur) {
                return Err(self.parse_error_here(ERR_UNEXPECTED_CHARACTER));
            }

            let raw_end = self.raw_end();
            let digits: String = self.data[mantissa_start..raw_end].iter().collect();
            let text: String = self.data[data_start..raw_end].iter().collect();
            let span = Span {
                start,
                end: self.end_position(),
            };

            let mut base = 10;
            if digits.starts_with('0') {
                base = 8;

                // All digits of an octal value have to be valid octal
                // digits.
                for (i, c) in digits.chars().enumerate() {
                    if c > '7' {
                        let mut pos = span.start;
                        pos.character += (mantissa_start - data_start) + i;
                        return Err(self.parse_error(ERR_UNEXPECTED_CHARACTER, pos, pos));
                    }
                }
            }

            return self.int_token(negative, &digits, base, text, span);
        }

        // This is a floating point number. Parse any digits after the dot
        // if one has been reached.
        let mut digits_after_dot = 0;

        if self.cur == Some('.') {
            self.next();

            while self.cur.is_some_and(is_digit) {
                digits_after_dot += 1;
                self.next();
            }
        }

        // The mantissa may omit digits on one side of the dot but not on
        // both.
        if digits_before_dot == 0 && digits_after_dot == 0 {
            if matches!(self.cur, None | Some('\n')) {
                return Err(self.parse_error_here(ERR_UNEXPECTED_END_OF_LINE_NUMBER));
            }
            return Err(self.parse_error_here(ERR_UNEXPECTED_CHARACTER));
        }

        // Read the exponent if available.
        if matches!(self.cur, Some('e') | Some('E')) {
            self.next();
            let mut exponent_digits = 0;

            if matches!(self.cur, Some('-') | Some('+')) {
                self.next();
            }

            while self.cur.is_some_and(is_digit) {
                exponent_digits += 1;
                self.next();
            }

            if exponent_digits == 0 {
                if matches!(self.cur, None | Some('\n')) {
                    return Err(self.parse_error_here(ERR_UNEXPECTED_END_OF_LINE_NUMBER));
                }
                return Err(self.parse_error_here(ERR_UNEXPECTED_CHARACTER));
            }
        }

        if !is_valid_delimiter(self.cur) {
            return Err(self.parse_error_here(ERR_UNEXPECTED_CHARACTER));
        }

        let raw_end = self.raw_end();
        let text: String = self.data[data_start..raw_end].iter().collect();
        let span = Span {
            start,
            end: self.end_position(),
        };

        let value: f64 = text
            .parse()
            .map_err(|_| self.parse_error(ERR_NUMBER_OUT_OF_RANGE, span.start, span.end))?;

        if value.is_infinite() {
            return Err(self.parse_error(ERR_NUMBER_OUT_OF_RANGE, span.start, span.end));
        }

        Ok(Token {
            kind: TokenKind::FloatConstant(value),
            span,
            text,
        })
    }

    /// Produces the next token.
    ///
    /// Once the end of the input is reached, every further call returns an
    /// [`TokenKind::EndOfFile`] token.
    pub fn next_token(&mut self) -> Result<Token, Diagnostic<'a>> {
        loop {
            self.skip_whitespace();
            let first_token_in_line = !self.line_has_had_token;
            self.line_has_had_token = true;

            let start = self.position;

            let Some(current) = self.cur else {
                return Ok(Token {
                    kind: TokenKind::EndOfFile,
                    span: Span { start, end: start },
                    text: String::new(),
                });
            };

            if is_reserved(current) {
                self.next();

                match current {
                    '\n' => {
                        return Ok(Token {
                            kind: TokenKind::NewLine,
                            span: Span { start, end: start },
                            text: "\n".to_string(),
                        });
                    }

                    '"' => return self.parse_quoted_string(start),

                    '/' => match self.cur {
                        Some('/') => {
                            if first_token_in_line {
                                return Ok(self.parse_single_line_comment(start));
                            }

                            self.skip_single_line_comment();
                            continue;
                        }
                        Some('*') => {
                            self.skip_multi_line_comment();
                            continue;
                        }
                        _ => {}
                    },

                    _ => {}
                }

                return Ok(Token {
                    kind: TokenKind::Punctuation(current),
                    span: Span { start, end: start },
                    text: current.to_string(),
                });
            }

            if is_identifier_start(current) {
                return self.parse_identifier(start);
            }

            if is_numerical_first(current) {
                // A dot not followed by a digit is the dot token, not the
                // start of a floating point number.
                if current == '.' && !self.peek().is_some_and(is_digit) {
                    self.next();
                    return Ok(Token {
                        kind: TokenKind::Punctuation('.'),
                        span: Span { start, end: start },
                        text: ".".to_string(),
                    });
                }

                return self.parse_number(start);
            }

            // Pass the raw character through; the parser will reject it.
            self.next();
            return Ok(Token {
                kind: TokenKind::Punctuation(current),
                span: Span { start, end: start },
                text: current.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Result<Vec<Token>, String> {
        let src = Source::from_text(input, "test.etg");
        let mut lexer = Lexer::new(&src, Vec::new());
        let mut tokens = Vec::new();

        loop {
            match lexer.next_token() {
                Ok(token) => {
                    let done = token.kind == TokenKind::EndOfFile;
                    tokens.push(token);
                    if done {
                        return Ok(tokens);
                    }
                }
                Err(diagnostic) => return Err(diagnostic.description().to_string()),
            }
        }
    }

    fn assert_lexer_success(input: &str) -> Vec<Token> {
        match lex(input) {
            Ok(tokens) => tokens,
            Err(description) => panic!("unexpected error lexing `{input}`: {description}"),
        }
    }

    fn assert_lexer_error(input: &str, expected: &str) {
        match lex(input) {
            Ok(tokens) => panic!("expected `{expected}` lexing `{input}`, got tokens {tokens:?}"),
            Err(description) => assert_eq!(description, expected, "while lexing `{input}`"),
        }
    }

    fn first(input: &str) -> Token {
        assert_lexer_success(input).into_iter().next().unwrap()
    }

    const DELIMITERS: &[&str] = &[
        "", " ", "\r", "\t", "\n", "{", "}", "[", "]", "(", ")", ":", ".", "/", ",", "*",
    ];

    #[test]
    fn identifiers_and_keywords() {
        let fixtures: &[(&str, TokenKind)] = &[
            ("horse", TokenKind::Identifier),
            ("Horse", TokenKind::Identifier),
            ("A0", TokenKind::Identifier),
            ("HORSE_STUFF", TokenKind::Identifier),
            ("_private", TokenKind::Identifier),
            ("definition", TokenKind::Definition),
            ("import", TokenKind::Import),
            ("typedef", TokenKind::Typedef),
            ("const", TokenKind::Const),
            ("enum", TokenKind::Enum),
            ("struct", TokenKind::Struct),
            ("service", TokenKind::Service),
            ("exception", TokenKind::Exception),
            ("map", TokenKind::Map),
            ("bool", TokenKind::Bool),
            ("string", TokenKind::String),
            ("binary", TokenKind::Binary),
            ("float32", TokenKind::Float32),
            ("float64", TokenKind::Float64),
            ("int8", TokenKind::Int8),
            ("int16", TokenKind::Int16),
            ("int32", TokenKind::Int32),
            ("int64", TokenKind::Int64),
            ("uint8", TokenKind::Uint8),
            ("uint16", TokenKind::Uint16),
            ("uint32", TokenKind::Uint32),
            ("uint64", TokenKind::Uint64),
        ];

        for (identifier, kind) in fixtures {
            // Any valid delimiter or the end of input may follow.
            for delimiter in DELIMITERS {
                let input = format!("{identifier}{delimiter}");
                let token = first(&input);
                assert_eq!(&token.kind, kind, "while lexing `{input}`");
                assert_eq!(&token.text, identifier, "while lexing `{input}`");
            }

            // An invalid character following the identifier is an error.
            assert_lexer_error(&format!("{identifier}\""), "unexpected character");
        }
    }

    #[test]
    fn unterminated_literals() {
        for prefix in ["", "     ", "\n\n   \r\t"] {
            assert_lexer_error(
                &format!("{prefix}\"horse"),
                "unexpected end of line in literal",
            );
            assert_lexer_error(
                &format!("{prefix}\"horse\n"),
                "unexpected end of line in literal",
            );
            assert_lexer_error(
                &format!("{prefix}\"horse\r\n"),
                "unexpected end of line in literal",
            );
        }
    }

    #[test]
    fn literal_escapes() {
        let token = first(r#""a\nb\rc\td\"e\\f""#);
        assert_eq!(token.kind, TokenKind::Literal);
        assert_eq!(token.text, "a\nb\rc\td\"e\\f");
    }

    #[test]
    fn literal_spans_cover_the_quotes() {
        let token = first("  \"horse\"");
        assert_eq!(token.span.start, Position { line: 1, character: 3 });
        assert_eq!(token.span.end, Position { line: 1, character: 9 });
    }

    #[test]
    fn unterminated_literal_span_starts_at_the_opening_quote() {
        let src = Source::from_text("\"unterminated", "test.etg");
        let mut lexer = Lexer::new(&src, Vec::new());

        let diagnostic = lexer.next_token().unwrap_err();
        assert_eq!(diagnostic.description(), "unexpected end of line in literal");

        let frame = diagnostic.frames().last().unwrap();
        assert_eq!(frame.start, Position { line: 1, character: 1 });
        assert_eq!(frame.end, Position { line: 1, character: 13 });
    }

    #[test]
    fn hexadecimal_constants() {
        assert_eq!(first("0x1").kind, TokenKind::UintConstant(1));
        assert_eq!(
            first("0x0123456789abcdef").kind,
            TokenKind::UintConstant(0x0123456789abcdef)
        );
        assert_eq!(
            first("0X0123456789ABCDEF").kind,
            TokenKind::UintConstant(0x0123456789abcdef)
        );
        assert_eq!(
            first("-0x0123456789abcdef").kind,
            TokenKind::IntConstant(-0x0123456789abcdef)
        );
        assert_eq!(first("+0x10").kind, TokenKind::UintConstant(16));
        assert_eq!(first("0x10").text, "0x10");
    }

    #[test]
    fn octal_constants() {
        assert_eq!(first("01").kind, TokenKind::UintConstant(1));
        assert_eq!(first("01234567").kind, TokenKind::UintConstant(0o1234567));
        assert_eq!(first("-01234567").kind, TokenKind::IntConstant(-0o1234567));
        assert_eq!(first("0").kind, TokenKind::UintConstant(0));
    }

    #[test]
    fn decimal_constants() {
        assert_eq!(first("1").kind, TokenKind::UintConstant(1));
        assert_eq!(first("123456789").kind, TokenKind::UintConstant(123456789));
        assert_eq!(first("-123456789").kind, TokenKind::IntConstant(-123456789));
        assert_eq!(first("+42").kind, TokenKind::UintConstant(42));
        assert_eq!(first("-42").text, "-42");
    }

    #[test]
    fn float_constants() {
        assert_eq!(first("0.").kind, TokenKind::FloatConstant(0.0));
        assert_eq!(first(".0").kind, TokenKind::FloatConstant(0.0));
        assert_eq!(first("1.0").kind, TokenKind::FloatConstant(1.0));
        assert_eq!(first("1.0e5").kind, TokenKind::FloatConstant(1.0e5));
        assert_eq!(first("1e5").kind, TokenKind::FloatConstant(1e5));
        assert_eq!(first("1.5E-3").kind, TokenKind::FloatConstant(1.5e-3));
        assert_eq!(
            first("1.797693134862315708145274237317043567981e308").kind,
            TokenKind::FloatConstant(1.797693134862315708145274237317043567981e308)
        );
        assert_eq!(
            first("4.940656458412465441765687928682213723651e-324").kind,
            TokenKind::FloatConstant(4.940656458412465441765687928682213723651e-324)
        );
        assert_eq!(
            first("-00123456789.0123456789e123").kind,
            TokenKind::FloatConstant(-123456789.0123456789e123)
        );
        assert_eq!(
            first("00123456789.0123456789e123").kind,
            TokenKind::FloatConstant(123456789.0123456789e123)
        );
    }

    #[test]
    fn integer_bounds() {
        assert_eq!(
            first("18446744073709551615").kind,
            TokenKind::UintConstant(u64::MAX)
        );
        assert_lexer_error("18446744073709551616", "number is out of range");

        assert_eq!(
            first("-9223372036854775808").kind,
            TokenKind::IntConstant(i64::MIN)
        );
        assert_lexer_error("-9223372036854775809", "number is out of range");

        assert_lexer_error("1e999", "number is out of range");
    }

    #[test]
    fn hexadecimal_digit_is_required() {
        assert_lexer_error("0x", "expected hexadecimal digit");
        assert_lexer_error("0x,", "expected hexadecimal digit");
        assert_lexer_error("0xg", "unexpected character");
    }

    #[test]
    fn octal_constants_reject_decimal_digits() {
        let src = Source::from_text("08", "test.etg");
        let mut lexer = Lexer::new(&src, Vec::new());

        let diagnostic = lexer.next_token().unwrap_err();
        assert_eq!(diagnostic.description(), "unexpected character");

        // The diagnostic points at the offending digit.
        let frame = diagnostic.frames().last().unwrap();
        assert_eq!(frame.start, Position { line: 1, character: 2 });
    }

    #[test]
    fn signed_octal_rejection_points_at_the_offending_digit() {
        let src = Source::from_text("-0779", "test.etg");
        let mut lexer = Lexer::new(&src, Vec::new());

        let diagnostic = lexer.next_token().unwrap_err();
        assert_eq!(diagnostic.description(), "unexpected character");
        assert_eq!(
            diagnostic.frames().last().unwrap().start,
            Position { line: 1, character: 5 }
        );
    }

    #[test]
    fn bare_dot_is_punctuation() {
        let token = first(".");
        assert_eq!(token.kind, TokenKind::Punctuation('.'));

        let token = first(". ");
        assert_eq!(token.kind, TokenKind::Punctuation('.'));
    }

    #[test]
    fn lone_sign_at_end_of_input() {
        assert_lexer_error("+", "unexpected end of line in numerical");
        assert_lexer_error("-\n", "unexpected end of line in numerical");
        assert_lexer_error("1e", "unexpected end of line in numerical");
    }

    #[test]
    fn punctuation_tokens_carry_their_code_point() {
        let tokens = assert_lexer_success("{}[]():.*,/");
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Punctuation('{'),
                TokenKind::Punctuation('}'),
                TokenKind::Punctuation('['),
                TokenKind::Punctuation(']'),
                TokenKind::Punctuation('('),
                TokenKind::Punctuation(')'),
                TokenKind::Punctuation(':'),
                TokenKind::Punctuation('.'),
                TokenKind::Punctuation('*'),
                TokenKind::Punctuation(','),
                TokenKind::Punctuation('/'),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn newlines_are_tokens_and_track_lines() {
        let tokens = assert_lexer_success("a\nb\n");

        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].span.start, Position { line: 1, character: 1 });
        assert_eq!(tokens[1].kind, TokenKind::NewLine);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].span.start, Position { line: 2, character: 1 });
        assert_eq!(tokens[3].kind, TokenKind::NewLine);
        assert_eq!(tokens[4].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn end_of_file_is_emitted_indefinitely() {
        let src = Source::from_text("", "test.etg");
        let mut lexer = Lexer::new(&src, Vec::new());

        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfFile);
        }
    }

    #[test]
    fn leading_comment_is_a_documentation_line() {
        let tokens = assert_lexer_success("// A user.\nstruct");

        assert_eq!(tokens[0].kind, TokenKind::DocumentationLine);
        assert_eq!(tokens[0].text, " A user.");
        assert_eq!(tokens[1].kind, TokenKind::NewLine);
        assert_eq!(tokens[2].kind, TokenKind::Struct);
    }

    #[test]
    fn documentation_span_starts_at_the_first_slash() {
        let tokens = assert_lexer_success("  // docs\n");

        assert_eq!(tokens[0].kind, TokenKind::DocumentationLine);
        assert_eq!(tokens[0].span.start, Position { line: 1, character: 3 });
    }

    #[test]
    fn trailing_comment_is_discarded() {
        let tokens = assert_lexer_success("struct // not documentation\n");
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![TokenKind::Struct, TokenKind::NewLine, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn multi_line_comments_are_discarded() {
        let tokens = assert_lexer_success("a /* one\ntwo */ b");
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn documentation_comment_at_end_of_input() {
        let tokens = assert_lexer_success("// tail");

        assert_eq!(tokens[0].kind, TokenKind::DocumentationLine);
        assert_eq!(tokens[0].text, " tail");
        assert_eq!(tokens[1].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn spans_reproduce_raw_token_text() {
        let src = Source::from_text(
            "definition demo\nstruct Foo {\n\t1: Bar uint32\n}\n-17 0x2a 3.5\n",
            "test.etg",
        );
        let mut lexer = Lexer::new(&src, Vec::new());

        loop {
            let token = lexer.next_token().unwrap();

            match token.kind {
                TokenKind::EndOfFile => break,
                TokenKind::NewLine | TokenKind::Literal | TokenKind::DocumentationLine => continue,
                _ => {}
            }

            let line = src.line(token.span.start.line);
            let raw: String = line
                .chars()
                .skip(token.span.start.character - 1)
                .take(token.span.end.character - token.span.start.character + 1)
                .collect();

            assert_eq!(raw, token.text, "span mismatch for {:?}", token.kind);
        }
    }
}
