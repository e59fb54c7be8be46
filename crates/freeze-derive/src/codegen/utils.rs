//! Shared utility functions for code generation.

use crate::field_kind::FieldKind;
use crate::parse::{FieldInput, ReplicateInput};
use darling::ast::Data;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::spanned::Spanned;
use syn::Ident;

/// Span used for diagnostics about a field.
pub fn field_span(field: &FieldInput) -> Span {
    match &field.ident {
        Some(ident) => ident.span(),
        None => field.ty.span(),
    }
}

/// Readable rendering of a type, e.g. `Box<dyn Greeter>`.
pub fn type_label(ty: &syn::Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let prev = out.chars().last();
            let next = chars.peek().copied();
            let glued = matches!(prev, Some('<' | '&' | ':' | '(' | '[' | '\''))
                || matches!(next, Some('<' | '>' | ',' | ':' | ')' | ']' | ';'));
            if glued {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Binding name for a field matched out of an enum variant.
pub fn binding(position: usize) -> Ident {
    format_ident!("__field{}", position)
}

/// Whether any field that will be copied is declared with a trait object.
pub fn has_interface_field(input: &ReplicateInput) -> bool {
    input
        .all_fields()
        .iter()
        .any(|field| !field.skip && FieldKind::from_type(&field.ty).is_interface())
}

/// Whether the input is an enum whose variants carry no data.
pub fn is_fieldless_enum(input: &ReplicateInput) -> bool {
    match &input.data {
        Data::Enum(variants) => variants.iter().all(|variant| variant.fields.fields.is_empty()),
        Data::Struct(_) => false,
    }
}

/// Whether a field is exposed through the member table.
pub fn is_member(field: &FieldInput) -> bool {
    !field.skip && !FieldKind::from_type(&field.ty).is_interface()
}

/// Expression constructing a skipped field.
pub fn default_expr(field: &FieldInput) -> syn::Result<TokenStream> {
    match &field.default {
        Some(expr) => {
            let expr: syn::Expr = syn::parse_str(expr)?;
            Ok(quote! { #expr })
        }
        None => Ok(quote! { ::core::default::Default::default() }),
    }
}
