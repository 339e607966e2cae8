//! Proc macros for reconcile-dom: the `props!` property-map literal.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature
//! on `reconcile-dom`.

use proc_macro::TokenStream;

mod props_macro;

/// Property-map literal.
///
/// Expands to a chain of `Props::new().set(..)` calls.
///
/// # Syntax
///
/// - `name: expr` becomes `.set("name", expr)`
/// - `name: { .. }` becomes a nested map (used for `style`)
/// - kebab-case names (`data-id`) and string-literal names are accepted
/// - a closure given to an event key (`onClick: || ..`) is wrapped in a
///   `Listener`
///
/// # Example
///
/// ```ignore
/// let props = props! {
///     className: "menu",
///     style: { display: "none", left: 10 },
///     data-id: "7",
///     onClick: || println!("clicked"),
/// };
/// ```
#[proc_macro]
pub fn props(input: TokenStream) -> TokenStream {
    props_macro::props_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
