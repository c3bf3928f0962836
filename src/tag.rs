//! Field-annotation extraction.
//!
//! Grammar (v1, a versioned contract): a field annotation is an attribute
//! whose path is the recognized key and whose single argument is a string
//! literal, `#[key("...")]` or `#[key = "..."]`. The literal holds a
//! `;`-delimited attribute list; the only attribute this tool interprets is
//! `column:<identifier>`, where the identifier is the maximal run of
//! `[A-Za-z0-9_]` characters following the first matching `column:` marker.
//! Everything else in the list is ignored.

use syn::{Attribute, Expr, Lit, Meta};

/// Returns the raw annotation value for `key` among a field's attributes.
///
/// An absent key, or an attribute whose argument is not a string literal,
/// yields `None` rather than an error.
pub fn raw_tag_value(attrs: &[Attribute], key: &str) -> Option<String> {
    attrs.iter().find_map(|attr| {
        if !attr.path().is_ident(key) {
            return None;
        }
        match &attr.meta {
            Meta::List(list) => syn::parse2::<syn::LitStr>(list.tokens.clone())
                .ok()
                .map(|lit| lit.value()),
            Meta::NameValue(pair) => match &pair.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(lit) => Some(lit.value()),
                    _ => None,
                },
                _ => None,
            },
            Meta::Path(_) => None,
        }
    })
}

/// Extracts the `column:<identifier>` sub-attribute from a raw tag value.
///
/// A value without a matching marker yields `None`, never an error.
pub fn column_attribute(raw: &str) -> Option<String> {
    let mut rest = raw;
    while let Some((_, after)) = rest.split_once("column:") {
        let ident: String = after
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if !ident.is_empty() {
            return Some(ident);
        }
        rest = after;
    }
    None
}
