//! Hidden-text lexer (tokenizer).
//!
//! DjVu hidden text is stored as S-expressions, as printed by
//! `djvused -e print-txt`:
//!
//! ```text
//! (page 0 0 2550 3300
//!  (line 100 3000 900 3050
//!   (word 100 3000 400 3050 "Hello")
//!   (word 450 3000 900 3050 "world")))
//! ```
//!
//! Token types:
//! - Delimiters: `(` and `)`
//! - Numbers: integers and decimals (`42`, `-7`, `12.5`)
//! - Symbols: zone kinds and any other bare identifier (`page`, `word`)
//! - Strings: double-quoted text with C-style escapes (`"caf\303\251"`)
//!
//! Whitespace and `;` comments (to end of line) are skipped.

use crate::error::{Error, Result};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, take, take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace1, one_of, satisfy},
    combinator::{map, map_res, not, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, terminated, tuple},
};

/// Token types recognized by the hidden-text lexer.
#[derive(Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// List start delimiter `(`
    Open,

    /// List end delimiter `)`
    Close,

    /// Number (coordinates are integers in practice, decimals are accepted)
    Number(f64),

    /// Bare symbol such as `page` or `word`
    Symbol(&'a str),

    /// Raw string contents between the quotes.
    /// Note: escape sequences are NOT decoded at lexer level
    Str(&'a str),
}

/// A token with the byte offset where it starts.
#[derive(Debug, PartialEq, Clone)]
pub struct Spanned<'a> {
    /// Byte offset of the token in the input
    pub offset: usize,
    /// The token
    pub token: Token<'a>,
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || "_-+*/.:<>=!?$%&~^#@".contains(c)
}

/// Parse a comment (`;` to end of line).
fn comment(input: &str) -> IResult<&str, ()> {
    value((), pair(char(';'), take_while(|c: char| c != '\n')))(input)
}

/// Skip all whitespace and comments.
fn skip_ws(input: &str) -> &str {
    let mut remaining = input;
    while let Ok((rest, _)) = alt((value((), multispace1), comment))(remaining) {
        remaining = rest;
    }
    remaining
}

/// Parse an integer or decimal number.
///
/// The number must not run straight into symbol characters, so `12abc` is
/// rejected here and lexed as a symbol instead.
fn parse_number(input: &str) -> IResult<&str, Token<'_>> {
    map_res(
        terminated(
            recognize(tuple((opt(one_of("+-")), digit1, opt(pair(char('.'), digit0))))),
            not(satisfy(is_symbol_char)),
        ),
        |digits: &str| digits.parse::<f64>().map(Token::Number),
    )(input)
}

fn parse_symbol(input: &str) -> IResult<&str, Token<'_>> {
    map(take_while1(is_symbol_char), Token::Symbol)(input)
}

/// Parse a double-quoted string, keeping escapes undecoded.
fn parse_string(input: &str) -> IResult<&str, Token<'_>> {
    map(
        delimited(
            char('"'),
            recognize(many0(alt((is_not("\"\\"), recognize(pair(char('\\'), take(1usize))))))),
            char('"'),
        ),
        Token::Str,
    )(input)
}

/// Parse a single token at the start of `input` (no leading whitespace).
pub fn parse_token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        value(Token::Open, char('(')),
        value(Token::Close, char(')')),
        parse_string,
        parse_number,
        parse_symbol,
    ))(input)
}

/// Split a hidden-text source into tokens.
///
/// # Examples
///
/// ```
/// use djvu_text::lexer::{tokenize, Token};
///
/// let tokens = tokenize(r#"(word 1 2 3 4 "hi")"#).unwrap();
/// assert_eq!(tokens.len(), 8);
/// assert_eq!(tokens[1].token, Token::Symbol("word"));
/// assert_eq!(tokens[6].token, Token::Str("hi"));
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = skip_ws(input);

    while !rest.is_empty() {
        let offset = input.len() - rest.len();
        match parse_token(rest) {
            Ok((remaining, token)) => {
                tokens.push(Spanned { offset, token });
                rest = skip_ws(remaining);
            },
            Err(_) if rest.starts_with('"') => return Err(Error::UnexpectedEof),
            Err(_) => {
                return Err(Error::ParseError {
                    offset,
                    reason: format!("unexpected character {:?}", rest.chars().next().unwrap_or('?')),
                });
            },
        }
    }

    Ok(tokens)
}

/// Decode the escape sequences of a raw string token into bytes.
///
/// Handles `\n \t \r \b \f \v \a`, escaped quotes and backslashes, octal
/// escapes of one to three digits and `\x` hex escapes. djvused writes
/// non-ASCII text as octal-escaped UTF-8, which is why this yields bytes.
/// Unknown escapes keep the escaped character; a backslash before a newline
/// continues the line.
///
/// # Examples
///
/// ```
/// # use djvu_text::lexer::decode_string_escapes;
/// assert_eq!(decode_string_escapes(r"a\tb"), b"a\tb");
/// assert_eq!(decode_string_escapes(r"caf\303\251"), "café".as_bytes());
/// assert_eq!(decode_string_escapes(r#"say \"hi\""#), br#"say "hi""#);
/// ```
pub fn decode_string_escapes(raw: &str) -> Vec<u8> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        pos += 1;
        if b != b'\\' || pos >= bytes.len() {
            out.push(b);
            continue;
        }

        let escaped = bytes[pos];
        pos += 1;
        match escaped {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'v' => out.push(0x0B),
            b'a' => out.push(0x07),
            b'\n' => {},
            b'0'..=b'7' => {
                let mut code = u32::from(escaped - b'0');
                let mut digits = 1;
                while digits < 3 && pos < bytes.len() && (b'0'..=b'7').contains(&bytes[pos]) {
                    code = code * 8 + u32::from(bytes[pos] - b'0');
                    pos += 1;
                    digits += 1;
                }
                out.push((code & 0xFF) as u8);
            },
            b'x' => {
                let mut code = 0u32;
                let mut digits = 0;
                while digits < 2 && pos < bytes.len() && bytes[pos].is_ascii_hexdigit() {
                    code = code * 16 + char::from(bytes[pos]).to_digit(16).unwrap_or(0);
                    pos += 1;
                    digits += 1;
                }
                if digits == 0 {
                    out.push(b'x');
                } else {
                    out.push(code as u8);
                }
            },
            other => out.push(other),
        }
    }

    out
}

/// Escape text for writing inside a hidden-text string.
///
/// Quotes, backslashes and control characters are escaped; everything else,
/// including non-ASCII text, is written as-is.
pub fn encode_string_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
