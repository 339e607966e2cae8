//! Markup parser for the in-memory host.
//!
//! Parses the markup produced at mount time (and raw markup handed to
//! `set_inner_html`) into a forest of [`Fragment`]s. Uses the logos-based
//! tokenizers from [`crate::host::tokenizer`].

use logos::{Lexer, Logos};

use crate::host::tokenizer::{ContentToken, StyleToken, TagToken};

/// Errors from markup parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("mismatched closing tag: expected `</{expected}>`, found `</{found}>`")]
    MismatchedClose { expected: String, found: String },
    #[error("markup contains no element")]
    NoElement,
}

/// A parsed piece of markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Text kept exactly as written (entities are not decoded).
    Text(String),
    Element {
        tag: String,
        /// Attribute values with entities decoded, in source order.
        attributes: Vec<(String, String)>,
        children: Vec<Fragment>,
    },
}

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// Whether `tag` is a void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// An element whose closing tag has not been seen yet.
struct OpenElement {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Fragment>,
}

/// Parse markup into a forest of fragments.
pub fn parse_markup(input: &str) -> Result<Vec<Fragment>, MarkupError> {
    let mut roots = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut lexer = ContentToken::lexer(input);

    loop {
        let Some(token) = lexer.next() else {
            break;
        };
        let token = token.map_err(|()| MarkupError::UnexpectedToken {
            position: lexer.span().start,
            message: "unrecognised content".into(),
        })?;

        match token {
            ContentToken::Text => {
                let text = Fragment::Text(lexer.slice().to_owned());
                append(&mut stack, &mut roots, text);
            }
            ContentToken::TagStart => {
                let mut tag_lexer = lexer.morph::<TagToken>();
                let (tag, attributes, self_closing) = read_open_tag(&mut tag_lexer)?;
                lexer = tag_lexer.morph();
                if self_closing || is_void_element(&tag) {
                    let element = Fragment::Element {
                        tag,
                        attributes,
                        children: Vec::new(),
                    };
                    append(&mut stack, &mut roots, element);
                } else {
                    stack.push(OpenElement {
                        tag,
                        attributes,
                        children: Vec::new(),
                    });
                }
            }
            ContentToken::CloseTagStart => {
                let position = lexer.span().start;
                let mut tag_lexer = lexer.morph::<TagToken>();
                let name = read_close_tag(&mut tag_lexer)?;
                lexer = tag_lexer.morph();
                let open = stack.pop().ok_or_else(|| MarkupError::UnexpectedToken {
                    position,
                    message: format!("closing tag `</{name}>` without an open element"),
                })?;
                if !open.tag.eq_ignore_ascii_case(&name) {
                    return Err(MarkupError::MismatchedClose {
                        expected: open.tag,
                        found: name,
                    });
                }
                let element = Fragment::Element {
                    tag: open.tag,
                    attributes: open.attributes,
                    children: open.children,
                };
                append(&mut stack, &mut roots, element);
            }
        }
    }

    match stack.last() {
        Some(open) => Err(MarkupError::UnexpectedEof(format!("unclosed `<{}>`", open.tag))),
        None => Ok(roots),
    }
}

/// Append a finished fragment to the innermost open element, or the roots.
fn append(stack: &mut [OpenElement], roots: &mut Vec<Fragment>, fragment: Fragment) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(fragment),
        None => roots.push(fragment),
    }
}

fn next_tag_token(lexer: &mut Lexer<'_, TagToken>) -> Result<TagToken, MarkupError> {
    match lexer.next() {
        Some(Ok(token)) => Ok(token),
        Some(Err(())) => Err(MarkupError::UnexpectedToken {
            position: lexer.span().start,
            message: format!("unrecognised input `{}` inside tag", lexer.slice()),
        }),
        None => Err(MarkupError::UnexpectedEof("inside tag".into())),
    }
}

/// Read `name attr="v" ... >` after `<`. Returns the self-closing flag last.
fn read_open_tag(
    lexer: &mut Lexer<'_, TagToken>,
) -> Result<(String, Vec<(String, String)>, bool), MarkupError> {
    let tag = match next_tag_token(lexer)? {
        TagToken::Name => lexer.slice().to_owned(),
        _ => {
            return Err(MarkupError::UnexpectedToken {
                position: lexer.span().start,
                message: "expected tag name".into(),
            })
        }
    };

    let mut attributes = Vec::new();
    let mut pending: Option<String> = None;
    loop {
        match next_tag_token(lexer)? {
            TagToken::Name => {
                if let Some(name) = pending.replace(lexer.slice().to_owned()) {
                    attributes.push((name, String::new()));
                }
            }
            TagToken::Equals => {
                let name = pending.take().ok_or_else(|| MarkupError::UnexpectedToken {
                    position: lexer.span().start,
                    message: "`=` without an attribute name".into(),
                })?;
                let value = match next_tag_token(lexer)? {
                    TagToken::DoubleQuoted | TagToken::SingleQuoted => {
                        let quoted = lexer.slice();
                        unescape(&quoted[1..quoted.len() - 1])
                    }
                    _ => {
                        return Err(MarkupError::UnexpectedToken {
                            position: lexer.span().start,
                            message: format!("expected quoted value for `{name}`"),
                        })
                    }
                };
                attributes.push((name, value));
            }
            end @ (TagToken::End | TagToken::SelfClose) => {
                if let Some(name) = pending.take() {
                    attributes.push((name, String::new()));
                }
                return Ok((tag, attributes, end == TagToken::SelfClose));
            }
            TagToken::DoubleQuoted | TagToken::SingleQuoted => {
                return Err(MarkupError::UnexpectedToken {
                    position: lexer.span().start,
                    message: "attribute value without a name".into(),
                })
            }
        }
    }
}

/// Read `name>` after `</`.
fn read_close_tag(lexer: &mut Lexer<'_, TagToken>) -> Result<String, MarkupError> {
    let name = match next_tag_token(lexer)? {
        TagToken::Name => lexer.slice().to_owned(),
        _ => {
            return Err(MarkupError::UnexpectedToken {
                position: lexer.span().start,
                message: "expected closing tag name".into(),
            })
        }
    };
    match next_tag_token(lexer)? {
        TagToken::End => Ok(name),
        _ => Err(MarkupError::UnexpectedToken {
            position: lexer.span().start,
            message: format!("expected `>` after `</{name}`"),
        }),
    }
}

/// Decode the entities produced by markup escaping.
pub fn unescape(input: &str) -> String {
    if !input.contains('&') {
        return input.to_owned();
    }
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Parse inline style text into `(name, value)` pairs in source order.
///
/// Names are returned as written (hyphenated). Declarations without a colon
/// are skipped; colons inside a value are kept.
pub fn parse_style_text(input: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    let mut lexer = StyleToken::lexer(input);
    let mut name: Option<&str> = None;
    let mut value_start: Option<usize> = None;

    while let Some(token) = lexer.next() {
        match token {
            Ok(StyleToken::Word) if value_start.is_none() => name = Some(lexer.slice()),
            Ok(StyleToken::Colon) if name.is_some() && value_start.is_none() => {
                value_start = Some(lexer.span().end);
            }
            Ok(StyleToken::Semicolon) => {
                if let (Some(n), Some(start)) = (name.take(), value_start.take()) {
                    let value = input[start..lexer.span().start].trim();
                    declarations.push((n.to_owned(), value.to_owned()));
                }
                name = None;
            }
            _ => {}
        }
    }
    if let (Some(n), Some(start)) = (name, value_start) {
        declarations.push((n.to_owned(), input[start..].trim().to_owned()));
    }
    declarations
}
