#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use super::ParseError;
use super::tokens::{FilePosition, Token, TokenKind};

/// Converts a source buffer into a flat, EOF-terminated token stream.
///
/// The lexer is driven by a one-character lookahead dispatch: every
/// character class (comment opener, quote, digit, letter, punctuation)
/// routes into a dedicated consumer. Comments are discarded and literals
/// are normalized to canonical text while tokens keep byte-accurate
/// positions into the untouched buffer.
pub struct Lexer<'a> {
    /// The buffer being tokenized.
    src:    &'a str,
    /// Byte offset and value of every character, for O(1) lookahead.
    chars:  Vec<(usize, char)>,
    /// Index of the next unconsumed character in `chars`.
    pos:    usize,
    /// 1-based line of the next unconsumed character.
    line:   usize,
    /// 1-based column of the next unconsumed character.
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `src` positioned at its first character.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes an entire buffer.
    ///
    /// The returned stream is finite and always ends with exactly one
    /// end-of-file token.
    pub fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
        Lexer::new(src).run()
    }

    /// The main dispatch loop.
    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek(0) {
            let start = self.position();
            self.consume();
            match c {
                '/' => {
                    if let Some(token) = self.handle_forward_slash(start) {
                        tokens.push(token);
                    }
                }
                '{' => tokens.push(Token::new(TokenKind::OpenCurly, "{", start)),
                '}' => tokens.push(Token::new(TokenKind::CloseCurly, "}", start)),
                '[' => tokens.push(Token::new(TokenKind::OpenBracket, "[", start)),
                ']' => tokens.push(Token::new(TokenKind::CloseBracket, "]", start)),
                '(' => tokens.push(Token::new(TokenKind::OpenParen, "(", start)),
                ')' => tokens.push(Token::new(TokenKind::CloseParen, ")", start)),
                ';' => tokens.push(Token::new(TokenKind::Semi, ";", start)),
                ',' => tokens.push(Token::new(TokenKind::Comma, ",", start)),
                '.' => tokens.push(Token::new(TokenKind::Dot, ".", start)),
                '@' => tokens.push(Token::new(TokenKind::At, "@", start)),
                '?' => tokens.push(Token::new(TokenKind::Question, "?", start)),
                '&' => tokens.push(Token::new(TokenKind::Amp, "&", start)),
                '|' => tokens.push(Token::new(TokenKind::Pipe, "|", start)),
                '^' => tokens.push(Token::new(TokenKind::Caret, "^", start)),
                '*' => tokens.push(Token::new(TokenKind::Star, "*", start)),
                '%' => tokens.push(Token::new(TokenKind::Percent, "%", start)),
                '=' => tokens.push(self.paired(start, '=', '=', TokenKind::Eq, TokenKind::Assign)),
                '<' => {
                    tokens.push(self.paired(start, '<', '=', TokenKind::Le, TokenKind::OpenChevron));
                }
                '>' => {
                    tokens.push(self.paired(start, '>', '=', TokenKind::Ge, TokenKind::CloseChevron));
                }
                '+' => {
                    tokens.push(self.paired(start, '+', '+', TokenKind::Increment, TokenKind::Plus));
                }
                '-' => {
                    tokens.push(self.paired(start, '-', '-', TokenKind::Decrement, TokenKind::Minus));
                }
                '"' => tokens.push(self.consume_string_lit(start)?),
                '\'' => tokens.push(self.consume_char_lit(start)?),
                c if c.is_ascii_digit() => tokens.push(self.consume_numeric_lit(c, start)?),
                c if c.is_alphabetic() || c == '_' || c == '$' => {
                    tokens.push(self.consume_word(c, start));
                }
                c if c.is_whitespace() => {}
                // Anything else only occurs inside method bodies, which are
                // opaque to structural analysis.
                _ => {}
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.position()));
        Ok(tokens)
    }

    /// Position of the next unconsumed character (or end of input).
    fn position(&self) -> FilePosition {
        FilePosition {
            line:   self.line,
            column: self.column,
            offset: self
                .chars
                .get(self.pos)
                .map_or(self.src.len(), |(offset, _)| *offset),
        }
    }

    /// Looks ahead without consuming.
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|(_, c)| *c)
    }

    /// Consumes one character, updating line and column bookkeeping.
    fn consume(&mut self) -> Option<char> {
        let (_, c) = *self.chars.get(self.pos)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Emits `double_kind` if the next character is `second` (consuming
    /// it), otherwise `single_kind` for the already-consumed `first`.
    fn paired(
        &mut self,
        start: FilePosition,
        first: char,
        second: char,
        double_kind: TokenKind,
        single_kind: TokenKind,
    ) -> Token {
        if self.peek(0) == Some(second) {
            self.consume();
            Token::new(double_kind, format!("{first}{second}"), start)
        } else {
            Token::new(single_kind, first.to_string(), start)
        }
    }

    /// Either a comment (discarded) or a lone division operator.
    fn handle_forward_slash(&mut self, start: FilePosition) -> Option<Token> {
        match self.peek(0) {
            Some('/') => {
                while let Some(c) = self.consume() {
                    if c == '\n' {
                        break;
                    }
                }
                None
            }
            Some('*') => {
                self.consume();
                // Tolerates end of input without a closing delimiter.
                while let Some(c) = self.consume() {
                    if c == '*' && self.peek(0) == Some('/') {
                        self.consume();
                        break;
                    }
                }
                None
            }
            _ => Some(Token::new(TokenKind::Slash, "/", start)),
        }
    }

    /// Accumulates characters until an unescaped closing quote.
    fn consume_string_lit(&mut self, start: FilePosition) -> Result<Token, ParseError> {
        let text = self.consume_quoted('"', "closing '\"'")?;
        Ok(Token::new(TokenKind::StringLit, text, start))
    }

    /// Same termination rules as string literals, single quotes.
    fn consume_char_lit(&mut self, start: FilePosition) -> Result<Token, ParseError> {
        let text = self.consume_quoted('\'', "closing \"'\"")?;
        Ok(Token::new(TokenKind::CharLit, text, start))
    }

    /// Shared body of the two quoted-literal consumers. An escaped quote
    /// does not terminate the literal.
    fn consume_quoted(&mut self, quote: char, expected: &str) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            let Some(c) = self.consume() else {
                return Err(ParseError::expected(expected, self.position()));
            };
            if c == quote {
                break;
            }
            if c == '\\' {
                text.push('\\');
                let Some(escaped) = self.consume() else {
                    return Err(ParseError::expected(expected, self.position()));
                };
                text.push(escaped);
            } else {
                text.push(c);
            }
        }
        Ok(text)
    }

    /// Numeric literals: decimal, and behind a leading `0` also binary,
    /// hexadecimal, and octal, each with optional long/float suffixes.
    fn consume_numeric_lit(
        &mut self,
        first: char,
        start: FilePosition,
    ) -> Result<Token, ParseError> {
        if first == '0' {
            return match self.peek(0) {
                None => Err(ParseError::expected(
                    "digit, radix prefix, or suffix after '0'",
                    self.position(),
                )),
                Some('b' | 'B') => {
                    self.consume();
                    self.consume_radix_literal(2, "binary digits after 0b", start)
                }
                Some('x' | 'X') => {
                    self.consume();
                    self.consume_hex_literal(start)
                }
                Some(c) if ('0'..='7').contains(&c) => self.consume_octal_literal(start),
                Some('.' | 'e' | 'E') => self.consume_decimal_literal("0".to_string(), start),
                Some('l' | 'L') => {
                    self.consume();
                    Ok(Token::new(TokenKind::LongLit, "0", start))
                }
                Some('f' | 'F') => {
                    self.consume();
                    Ok(Token::new(TokenKind::FloatLit, "0", start))
                }
                Some(_) => Ok(Token::new(TokenKind::IntLit, "0", start)),
            };
        }

        let mut digits = String::from(first);
        digits.push_str(&self.consume_digits(10));
        self.consume_decimal_literal(digits, start)
    }

    /// Decimal literals after the integer part has been consumed into
    /// `digits`: optional fraction, exponent marker, and type suffix.
    fn consume_decimal_literal(
        &mut self,
        mut digits: String,
        start: FilePosition,
    ) -> Result<Token, ParseError> {
        if self.peek(0) == Some('.') {
            self.consume();
            digits.push('.');
            digits.push_str(&self.consume_digits(10));
        }

        match self.peek(0) {
            Some('f' | 'F') => {
                self.consume();
                Ok(Token::new(
                    TokenKind::FloatLit,
                    self.normalize_float(&digits, start)?,
                    start,
                ))
            }
            Some('e' | 'E') => {
                self.consume();
                self.consume_scientific(&digits, start)
            }
            Some('l' | 'L') => {
                self.consume();
                if digits.contains('.') {
                    return Err(ParseError::expected(
                        "an integral value before the long suffix",
                        start,
                    ));
                }
                Ok(Token::new(
                    TokenKind::LongLit,
                    self.normalize_int(&digits, 10, start)?,
                    start,
                ))
            }
            Some('d' | 'D') => {
                self.consume();
                Ok(Token::new(
                    TokenKind::DoubleLit,
                    self.normalize_double(&digits, start)?,
                    start,
                ))
            }
            _ => {
                if digits.contains('.') {
                    Ok(Token::new(
                        TokenKind::DoubleLit,
                        self.normalize_double(&digits, start)?,
                        start,
                    ))
                } else {
                    Ok(Token::new(
                        TokenKind::IntLit,
                        self.normalize_int(&digits, 10, start)?,
                        start,
                    ))
                }
            }
        }
    }

    /// `e`/`E` exponent with optional sign, applied to the base value.
    fn consume_scientific(
        &mut self,
        base: &str,
        start: FilePosition,
    ) -> Result<Token, ParseError> {
        let mut exponent_text = String::new();
        if matches!(self.peek(0), Some('-' | '+')) {
            exponent_text.push(self.consume().unwrap_or('+'));
        }
        let exponent_digits = self.consume_digits(10);
        if exponent_digits.is_empty() {
            return Err(ParseError::expected("exponent after 'e'", self.position()));
        }
        exponent_text.push_str(&exponent_digits);
        let exponent: i32 = exponent_text
            .parse()
            .map_err(|_| ParseError::expected("a representable exponent", start))?;

        if matches!(self.peek(0), Some('f' | 'F')) {
            self.consume();
            let value: f32 = base
                .parse()
                .map_err(|_| ParseError::expected("a valid float literal", start))?;
            let scaled = value * 10f32.powi(exponent);
            Ok(Token::new(TokenKind::FloatLit, scaled.to_string(), start))
        } else {
            let value: f64 = base
                .parse()
                .map_err(|_| ParseError::expected("a valid double literal", start))?;
            let scaled = value * 10f64.powi(exponent);
            Ok(Token::new(TokenKind::DoubleLit, scaled.to_string(), start))
        }
    }

    /// Hexadecimal literals, including the `p`-exponent floating form.
    fn consume_hex_literal(&mut self, start: FilePosition) -> Result<Token, ParseError> {
        let integer_part = self.consume_digits(16);
        if integer_part.is_empty() && self.peek(0) != Some('.') {
            return Err(ParseError::expected("hex digits after 0x", self.position()));
        }

        if self.peek(0) != Some('.') {
            return if matches!(self.peek(0), Some('l' | 'L')) {
                self.consume();
                Ok(Token::new(
                    TokenKind::LongLit,
                    self.normalize_int(&integer_part, 16, start)?,
                    start,
                ))
            } else {
                Ok(Token::new(
                    TokenKind::IntLit,
                    self.normalize_int(&integer_part, 16, start)?,
                    start,
                ))
            };
        }

        self.consume();
        let fractional_part = self.consume_digits(16);

        if !matches!(self.peek(0), Some('p' | 'P')) {
            return Err(ParseError::expected(
                "'p' exponent in hexadecimal floating literal",
                self.position(),
            ));
        }
        self.consume();

        let mut exponent_text = String::new();
        if matches!(self.peek(0), Some('-' | '+')) {
            exponent_text.push(self.consume().unwrap_or('+'));
        }
        let exponent_digits = self.consume_digits(10);
        if exponent_digits.is_empty() {
            return Err(ParseError::expected("exponent after 'p'", self.position()));
        }
        exponent_text.push_str(&exponent_digits);
        let exponent: i32 = exponent_text
            .parse()
            .map_err(|_| ParseError::expected("a representable exponent", start))?;

        let integer_value = if integer_part.is_empty() {
            0
        } else {
            i64::from_str_radix(&integer_part, 16)
                .map_err(|_| ParseError::expected("a representable hexadecimal literal", start))?
        };
        let mantissa = if fractional_part.is_empty() {
            0.0
        } else {
            let fraction = i64::from_str_radix(&fractional_part, 16)
                .map_err(|_| ParseError::expected("a representable hexadecimal literal", start))?;
            fraction as f64 / 16f64.powi(fractional_part.len() as i32)
        };

        let value = (integer_value as f64 + mantissa) * 2f64.powi(exponent);

        if matches!(self.peek(0), Some('f' | 'F')) {
            self.consume();
            Ok(Token::new(
                TokenKind::FloatLit,
                (value as f32).to_string(),
                start,
            ))
        } else {
            Ok(Token::new(TokenKind::DoubleLit, value.to_string(), start))
        }
    }

    /// Octal literals behind a leading `0`.
    fn consume_octal_literal(&mut self, start: FilePosition) -> Result<Token, ParseError> {
        let digits = self.consume_digits(8);
        if matches!(self.peek(0), Some('l' | 'L')) {
            self.consume();
            Ok(Token::new(
                TokenKind::LongLit,
                self.normalize_int(&digits, 8, start)?,
                start,
            ))
        } else {
            Ok(Token::new(
                TokenKind::IntLit,
                self.normalize_int(&digits, 8, start)?,
                start,
            ))
        }
    }

    /// Binary literals behind `0b`/`0B` (radix fixed at 2).
    fn consume_radix_literal(
        &mut self,
        radix: u32,
        expected: &'static str,
        start: FilePosition,
    ) -> Result<Token, ParseError> {
        let digits = self.consume_digits(radix);
        if digits.is_empty() {
            return Err(ParseError::expected(expected, self.position()));
        }
        if matches!(self.peek(0), Some('l' | 'L')) {
            self.consume();
            Ok(Token::new(
                TokenKind::LongLit,
                self.normalize_int(&digits, radix, start)?,
                start,
            ))
        } else {
            Ok(Token::new(
                TokenKind::IntLit,
                self.normalize_int(&digits, radix, start)?,
                start,
            ))
        }
    }

    /// Consumes a run of digits legal in `radix`.
    fn consume_digits(&mut self, radix: u32) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek(0) {
            if c.is_digit(radix) {
                digits.push(c);
                self.consume();
            } else {
                break;
            }
        }
        digits
    }

    /// Re-renders an integer literal as canonical decimal text.
    fn normalize_int(
        &self,
        digits: &str,
        radix: u32,
        start: FilePosition,
    ) -> Result<String, ParseError> {
        i64::from_str_radix(digits, radix)
            .map(|v| v.to_string())
            .map_err(|_| ParseError::expected("a representable integer literal", start))
    }

    /// Re-renders a double literal as shortest round-trip text.
    fn normalize_double(&self, digits: &str, start: FilePosition) -> Result<String, ParseError> {
        digits
            .parse::<f64>()
            .map(|v| v.to_string())
            .map_err(|_| ParseError::expected("a valid double literal", start))
    }

    /// Re-renders a float literal as shortest round-trip text.
    fn normalize_float(&self, digits: &str, start: FilePosition) -> Result<String, ParseError> {
        digits
            .parse::<f32>()
            .map(|v| v.to_string())
            .map_err(|_| ParseError::expected("a valid float literal", start))
    }

    /// Keywords and identifiers share one consumer; the accumulated word
    /// decides which token comes out.
    fn consume_word(&mut self, first: char, start: FilePosition) -> Token {
        let mut word = String::from(first);
        while let Some(c) = self.peek(0) {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                word.push(c);
                self.consume();
            } else {
                break;
            }
        }

        let kind = match word.as_str() {
            "private" => TokenKind::Private,
            "public" => TokenKind::Public,
            "protected" => TokenKind::Protected,

            "void" => TokenKind::Void,
            "byte" => TokenKind::Byte,
            "short" => TokenKind::Short,
            "int" => TokenKind::Int,
            "long" => TokenKind::Long,
            "float" => TokenKind::Float,
            "double" => TokenKind::Double,
            "char" => TokenKind::Char,
            "boolean" => TokenKind::Boolean,
            "String" => TokenKind::StringType,
            "var" => TokenKind::Var,

            "static" => TokenKind::Static,
            "final" => TokenKind::Final,
            "abstract" => TokenKind::Abstract,
            "strictfp" => TokenKind::Strictfp,
            "default" => TokenKind::Default,
            "transient" => TokenKind::Transient,
            "synchronized" => TokenKind::Synchronized,
            "volatile" => TokenKind::Volatile,
            "native" => TokenKind::Native,

            "class" => TokenKind::Class,
            "interface" => TokenKind::Interface,
            "enum" => TokenKind::Enum,
            "record" => TokenKind::Record,
            "extends" => TokenKind::Extends,
            "implements" => TokenKind::Implements,
            "package" => TokenKind::Package,
            "import" => TokenKind::Import,
            "throws" => TokenKind::Throws,

            "return" => TokenKind::Return,
            "throw" => TokenKind::Throw,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "finally" => TokenKind::Finally,
            "new" => TokenKind::New,
            "this" => TokenKind::This,
            "super" => TokenKind::Super,
            "instanceof" => TokenKind::Instanceof,
            "assert" => TokenKind::Assert,

            "true" | "false" => TokenKind::BooleanLit,
            "null" => TokenKind::NullLit,

            _ => TokenKind::Ident,
        };

        Token::new(kind, word, start)
    }
}
