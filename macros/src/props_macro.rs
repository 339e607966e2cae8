//! props! macro: parse `name: value` entries and generate a `Props` builder chain.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Expr, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// The value side of one entry.
#[derive(Debug)]
pub(crate) enum EntryValue {
    /// `{ .. }`: a nested property map.
    Map(PropsInput),
    /// Any other expression.
    Expr(Expr),
}

/// A single `name: value` entry.
#[derive(Debug)]
pub(crate) struct Entry {
    /// The property name as written, kebab-case joined with `-`.
    pub name: String,
    pub name_span: Span,
    pub value: EntryValue,
}

/// A comma-separated list of entries.
#[derive(Debug)]
pub(crate) struct PropsInput {
    pub entries: Vec<Entry>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for PropsInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut entries: Vec<Entry> = Vec::new();
        while !input.is_empty() {
            let entry = parse_entry(input)?;
            if entries.iter().any(|e| e.name == entry.name) {
                return Err(Error::new(
                    entry.name_span,
                    format!("duplicate property `{}`", entry.name),
                ));
            }
            entries.push(entry);
            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }
        Ok(PropsInput { entries })
    }
}

/// Parse `name: value`.
fn parse_entry(input: ParseStream) -> Result<Entry> {
    let (name, name_span) = parse_name(input)?;
    input.parse::<Token![:]>()?;

    let value = if input.peek(syn::token::Brace) {
        let content;
        braced!(content in input);
        EntryValue::Map(content.parse()?)
    } else {
        EntryValue::Expr(input.parse()?)
    };

    Ok(Entry {
        name,
        name_span,
        value,
    })
}

/// A string literal, or identifiers joined by `-` (`data-node-id`).
fn parse_name(input: ParseStream) -> Result<(String, Span)> {
    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        if lit.value().is_empty() {
            return Err(Error::new(lit.span(), "property name cannot be empty"));
        }
        return Ok((lit.value(), lit.span()));
    }

    let first = input.call(Ident::parse_any)?;
    let span = first.span();
    let mut name = first.to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        let part = input.call(Ident::parse_any)?;
        name.push('-');
        name.push_str(&part.to_string());
    }
    Ok((name, span))
}

/// `on` followed by an uppercase letter.
fn is_event_name(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn generate_map(input: &PropsInput) -> TokenStream {
    let calls = input.entries.iter().map(|entry| {
        let name = &entry.name;
        let value = match &entry.value {
            EntryValue::Map(nested) => generate_map(nested),
            EntryValue::Expr(Expr::Closure(closure)) if is_event_name(name) => {
                quote! { ::reconcile_dom::props::Listener::new(#closure) }
            }
            EntryValue::Expr(expr) => quote! { #expr },
        };
        quote! { .set(#name, #value) }
    });

    quote! {
        ::reconcile_dom::props::Props::new() #(#calls)*
    }
}

/// Entry point for the props! macro.
pub(crate) fn props_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: PropsInput = syn::parse2(input)?;
    Ok(generate_map(&parsed))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse(tokens: TokenStream) -> Result<PropsInput> {
        syn::parse2(tokens)
    }

    fn names(input: &PropsInput) -> Vec<&str> {
        input.entries.iter().map(|e| e.name.as_str()).collect()
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parse_flat_entries() {
        let input = parse(quote! { className: "a", height: 17, checked: true }).unwrap();
        assert_eq!(names(&input), vec!["className", "height", "checked"]);
        assert!(input
            .entries
            .iter()
            .all(|e| matches!(e.value, EntryValue::Expr(_))));
    }

    #[test]
    fn parse_nested_map() {
        let input = parse(quote! { style: { display: "none", left: 1 } }).unwrap();
        let EntryValue::Map(nested) = &input.entries[0].value else {
            panic!("expected nested map");
        };
        assert_eq!(names(nested), vec!["display", "left"]);
    }

    #[test]
    fn parse_kebab_and_literal_names() {
        let input = parse(quote! { data-node-id: "1", "aria-label": "x", for: "y" }).unwrap();
        assert_eq!(names(&input), vec!["data-node-id", "aria-label", "for"]);
    }

    #[test]
    fn parse_trailing_comma() {
        let input = parse(quote! { a: 1, }).unwrap();
        assert_eq!(input.entries.len(), 1);
    }

    #[test]
    fn parse_empty() {
        assert!(parse(quote! {}).unwrap().entries.is_empty());
    }

    #[test]
    fn duplicate_name_is_error() {
        let err = parse(quote! { a: 1, a: 2 }).unwrap_err();
        assert!(err.to_string().contains("duplicate property `a`"));
    }

    #[test]
    fn missing_colon_is_error() {
        assert!(parse(quote! { a 1 }).is_err());
    }

    #[test]
    fn empty_literal_name_is_error() {
        assert!(parse(quote! { "": 1 }).is_err());
    }

    // -----------------------------------------------------------------------
    // Code generation
    // -----------------------------------------------------------------------

    #[test]
    fn event_closure_is_wrapped() {
        let code = props_impl(quote! { onClick: || {} }).unwrap().to_string();
        assert!(code.contains("Listener :: new"));
    }

    #[test]
    fn non_event_closure_is_not_wrapped() {
        let code = props_impl(quote! { render: || {} }).unwrap().to_string();
        assert!(!code.contains("Listener"));
    }

    #[test]
    fn nested_map_generates_nested_builder() {
        let code = props_impl(quote! { style: { left: 1 } }).unwrap().to_string();
        assert_eq!(code.matches("Props :: new ()").count(), 2);
    }

    #[test]
    fn event_name_detection() {
        assert!(is_event_name("onClick"));
        assert!(!is_event_name("one"));
        assert!(!is_event_name("on"));
    }
}
