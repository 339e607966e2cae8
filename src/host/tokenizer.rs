//! logos-based markup tokenizers.
//!
//! Markup is lexed in two modes. [`ContentToken`] covers the text between
//! tags; after `<` or `</` the parser morphs the lexer into [`TagToken`] to
//! read the tag name and attributes, and morphs back after `>` or `/>`.
//!
//! [`StyleToken`] lexes inline `style` attribute text.

use logos::Logos;

/// Token produced between tags.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentToken {
    /// `</`: start of a closing tag.
    #[token("</")]
    CloseTagStart,

    /// `<`: start of an opening tag.
    #[token("<")]
    TagStart,

    /// A run of text up to the next `<`.
    #[regex(r"[^<]+")]
    Text,
}

/// Token produced inside a tag.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum TagToken {
    /// `/>`: end of a self-closing tag.
    #[token("/>")]
    SelfClose,

    /// `>`: end of a tag.
    #[token(">")]
    End,

    /// `=` between attribute name and value.
    #[token("=")]
    Equals,

    /// Double-quoted attribute value.
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// Single-quoted attribute value.
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Tag or attribute name.
    #[regex(r"[a-zA-Z_:][a-zA-Z0-9_:.-]*")]
    Name,
}

/// Token produced inside inline style text like `display:none;left:1px`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum StyleToken {
    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    /// Any run of non-separator characters.
    #[regex(r"[^:;\s]+")]
    Word,
}
