//! Hidden-text parser.
//!
//! Builds a [`PageText`] arena from the token stream produced by the
//! [lexer](crate::lexer). A zone is a list whose head is a symbol, followed by
//! four coordinates and then either a text string (leaf) or nested zones.
//!
//! Parsing is iterative: open lists live on an explicit stack, which makes
//! the nesting limit a simple length check.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::lexer::{decode_string_escapes, tokenize, Spanned, Token};
use crate::parser_config::ParseOptions;
use crate::zone::{NodeId, PageText, PageTextBuilder, ZoneKind};

/// An element of a list that is still open.
#[derive(Debug)]
enum Item<'a> {
    Symbol(&'a str),
    Number(f64),
    Text(String),
    Zone(NodeId),
    Dropped,
}

#[derive(Debug)]
struct OpenList<'a> {
    offset: usize,
    items: Vec<Item<'a>>,
}

/// Parse the hidden text of one page.
///
/// Input containing only whitespace or comments yields an empty page.
pub fn parse_page_text(input: &str, options: &ParseOptions) -> Result<PageText> {
    let tokens = tokenize(input)?;

    let mut builder = PageTextBuilder::new();
    let mut stack: Vec<OpenList<'_>> = Vec::new();
    let mut root: Option<NodeId> = None;
    let mut seen_top_level = false;
    let mut dropped = 0usize;
    // Depth of a list being skipped because it nests too deeply.
    let mut skipping = 0usize;

    for Spanned { offset, token } in tokens {
        if skipping > 0 {
            match token {
                Token::Open => skipping += 1,
                Token::Close => {
                    skipping -= 1;
                    if skipping == 0 {
                        if let Some(parent) = stack.last_mut() {
                            parent.items.push(Item::Dropped);
                        }
                    }
                },
                _ => {},
            }
            continue;
        }

        match token {
            Token::Open => {
                if stack.is_empty() && seen_top_level {
                    return Err(Error::ParseError {
                        offset,
                        reason: "unexpected input after the page zone".to_string(),
                    });
                }
                if stack.len() >= options.max_nesting {
                    if options.strict {
                        return Err(Error::RecursionLimitExceeded(options.max_nesting as u32));
                    }
                    log::warn!(
                        "Zone at byte {} nested deeper than {} levels, dropping it",
                        offset,
                        options.max_nesting
                    );
                    skipping = 1;
                    continue;
                }
                stack.push(OpenList {
                    offset,
                    items: Vec::new(),
                });
            },
            Token::Close => {
                let Some(list) = stack.pop() else {
                    return Err(Error::ParseError {
                        offset,
                        reason: "unbalanced ')'".to_string(),
                    });
                };

                let item = match finish_zone(&mut builder, list.items) {
                    Ok(id) => Item::Zone(id),
                    Err(reason) => {
                        if !options.should_continue(dropped) {
                            return Err(Error::ParseError {
                                offset: list.offset,
                                reason,
                            });
                        }
                        dropped += 1;
                        log::debug!("Dropping malformed zone at byte {}: {}", list.offset, reason);
                        Item::Dropped
                    },
                };

                match stack.last_mut() {
                    Some(parent) => parent.items.push(item),
                    None => {
                        seen_top_level = true;
                        if let Item::Zone(id) = item {
                            root = Some(id);
                        }
                    },
                }
            },
            Token::Number(value) => push_atom(&mut stack, offset, Item::Number(value))?,
            Token::Symbol(symbol) => push_atom(&mut stack, offset, Item::Symbol(symbol))?,
            Token::Str(raw) => {
                let text = decode_text(raw, options)?;
                push_atom(&mut stack, offset, Item::Text(text))?;
            },
        }
    }

    if !stack.is_empty() || skipping > 0 {
        return Err(Error::UnexpectedEof);
    }

    if dropped > 0 {
        log::debug!("Dropped {} malformed zones", dropped);
    }

    Ok(match root {
        Some(root) => builder.build(root),
        None => PageText::empty(),
    })
}

fn push_atom<'a>(stack: &mut [OpenList<'a>], offset: usize, item: Item<'a>) -> Result<()> {
    match stack.last_mut() {
        Some(list) => {
            list.items.push(item);
            Ok(())
        },
        None => Err(Error::ParseError {
            offset,
            reason: "expected '(' at top level".to_string(),
        }),
    }
}

/// Decode a raw string token. Invalid UTF-8 is replaced in lenient mode.
fn decode_text(raw: &str, options: &ParseOptions) -> Result<String> {
    match String::from_utf8(decode_string_escapes(raw)) {
        Ok(text) => Ok(text),
        Err(e) if options.strict => Err(Error::Utf8Error(e.utf8_error())),
        Err(e) => {
            log::debug!("Replacing invalid UTF-8 in hidden text: {}", e);
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        },
    }
}

/// Turn the items of a closed list into a zone.
fn finish_zone(builder: &mut PageTextBuilder, items: Vec<Item<'_>>) -> std::result::Result<NodeId, String> {
    let mut items = items.into_iter();

    let kind = match items.next() {
        Some(Item::Symbol(symbol)) => ZoneKind::from_symbol(symbol),
        Some(_) => return Err("zone does not start with a symbol".to_string()),
        None => return Err("empty list".to_string()),
    };

    let mut coords = [0.0f64; 4];
    for slot in coords.iter_mut() {
        match items.next() {
            Some(Item::Number(value)) => *slot = value,
            _ => return Err(format!("{} zone needs four coordinates", kind)),
        }
    }
    let rect = Rect::new(coords[0], coords[1], coords[2], coords[3]);

    let mut text: Option<String> = None;
    let mut children = Vec::new();
    for item in items {
        match item {
            Item::Text(fragment) if text.is_none() => text = Some(fragment),
            Item::Text(fragment) => {
                log::debug!("Ignoring extra text {:?} in {} zone", fragment, kind);
            },
            Item::Zone(id) => children.push(id),
            Item::Dropped => {},
            Item::Number(_) | Item::Symbol(_) => {
                log::debug!("Ignoring stray atom in {} zone", kind);
            },
        }
    }

    match text {
        Some(text) => {
            if !children.is_empty() {
                log::debug!("{} zone has both text and {} children, keeping the text", kind, children.len());
            }
            Ok(builder.leaf(kind, rect, text))
        },
        None => Ok(builder.zone(kind, rect, children)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::TextTree;

    fn lenient(input: &str) -> PageText {
        parse_page_text(input, &ParseOptions::lenient()).unwrap()
    }

    #[test]
    fn test_parse_nested_page() {
        let page = lenient(
            r#"(page 0 0 100 20
                 (line 0 0 100 20
                   (word 0 0 40 20 "cat")
                   (word 60 0 100 20 "dog")))"#,
        );
        let root = page.root().unwrap();
        assert_eq!(page.kind(root), Some(ZoneKind::Page));
        let line = page.child(root, 0).unwrap();
        assert_eq!(page.kind(line), Some(ZoneKind::Line));
        let dog = page.child(line, 1).unwrap();
        assert_eq!(page.text(dog), Some("dog"));
        assert_eq!(page.rect(dog), Some(Rect::new(60.0, 0.0, 100.0, 20.0)));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(lenient("").is_empty());
        assert!(lenient("  ; nothing here\n").is_empty());
    }

    #[test]
    fn test_parse_octal_utf8() {
        let page = lenient(r#"(word 0 0 1 1 "caf\303\251")"#);
        assert_eq!(page.text(page.root().unwrap()), Some("café"));
    }

    #[test]
    fn test_lenient_drops_malformed_zone() {
        let page = lenient(
            r#"(line 0 0 100 10 (word 0 0 "bad") (word 50 0 100 10 "good"))"#,
        );
        let root = page.root().unwrap();
        assert_eq!(page.child_count(root), 1);
        let good = page.child(root, 0).unwrap();
        assert_eq!(page.text(good), Some("good"));
    }

    #[test]
    fn test_strict_rejects_malformed_zone() {
        let err = parse_page_text(
            r#"(line 0 0 100 10 (word 0 0 "bad"))"#,
            &ParseOptions::strict(),
        )
        .unwrap_err();
        match err {
            Error::ParseError { offset, reason } => {
                assert_eq!(offset, 17);
                assert!(reason.contains("four coordinates"));
            },
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_non_symbol_head_dropped() {
        let page = lenient(r#"(line 0 0 10 10 ("word" 0 0 1 1 "x") (word 0 0 1 1 "y"))"#);
        let root = page.root().unwrap();
        assert_eq!(page.child_count(root), 1);
    }

    #[test]
    fn test_unknown_symbol_is_other() {
        let page = lenient(r#"(figure 0 0 10 10 "caption")"#);
        assert_eq!(page.kind(page.root().unwrap()), Some(ZoneKind::Other));
    }

    #[test]
    fn test_unbalanced_close() {
        let err = parse_page_text("(page 0 0 1 1))", &ParseOptions::lenient()).unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn test_missing_close() {
        let err = parse_page_text("(page 0 0 1 1 (line 0 0 1 1", &ParseOptions::lenient()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof));
    }

    #[test]
    fn test_top_level_atom_rejected() {
        let err = parse_page_text("page", &ParseOptions::lenient()).unwrap_err();
        assert!(matches!(err, Error::ParseError { offset: 0, .. }));
    }

    #[test]
    fn test_trailing_zone_rejected() {
        let err = parse_page_text("(page 0 0 1 1) (page 0 0 1 1)", &ParseOptions::lenient()).unwrap_err();
        assert!(matches!(err, Error::ParseError { offset: 15, .. }));
    }

    #[test]
    fn test_nesting_limit() {
        let input = r#"(page 0 0 9 9 (line 0 0 9 9 (word 0 0 9 9 (char 0 0 9 9 "x"))))"#;

        let err = parse_page_text(input, &ParseOptions::strict().with_max_nesting(3)).unwrap_err();
        assert!(matches!(err, Error::RecursionLimitExceeded(3)));

        let page = parse_page_text(input, &ParseOptions::lenient().with_max_nesting(3)).unwrap();
        let word = page.child(page.child(page.root().unwrap(), 0).unwrap(), 0).unwrap();
        assert_eq!(page.child_count(word), 0);
    }

    #[test]
    fn test_extra_text_keeps_first() {
        let page = lenient(r#"(word 0 0 1 1 "first" "second")"#);
        assert_eq!(page.text(page.root().unwrap()), Some("first"));
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        let source = r#"(page 0 0 100 20 (line 0 0 100 20 (word 0 0 40 20 "say \"hi\"")))"#;
        let page = lenient(source);
        let again = lenient(&page.to_string());
        assert_eq!(again, page);
    }
}
