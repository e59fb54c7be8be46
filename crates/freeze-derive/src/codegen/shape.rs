//! `Replicate::shape` code generation.

use super::utils;
use crate::field_kind::FieldKind;
use crate::parse::{FieldInput, ReplicateInput};
use darling::ast::Data;
use proc_macro2::TokenStream;
use quote::quote;

/// Generate the body of `shape()`.
pub fn generate(input: &ReplicateInput) -> TokenStream {
    let type_name = quote! { ::core::any::type_name::<Self>() };

    if input.value || utils::is_fieldless_enum(input) {
        return quote! { ::freeze::Shape::value(#type_name) };
    }

    match &input.data {
        Data::Struct(fields) => {
            let fields = field_shapes(fields.iter());
            quote! { ::freeze::Shape::composite(#type_name, ::std::vec![#(#fields),*]) }
        }
        Data::Enum(variants) => {
            let variants = variants.iter().map(|variant| {
                let name = variant.ident.to_string();
                let fields = field_shapes(variant.fields.iter());
                quote! { ::freeze::VariantShape::new(#name, ::std::vec![#(#fields),*]) }
            });
            quote! { ::freeze::Shape::variants(#type_name, ::std::vec![#(#variants),*]) }
        }
    }
}

fn field_shapes<'a>(fields: impl Iterator<Item = &'a FieldInput>) -> Vec<TokenStream> {
    fields
        .enumerate()
        .map(|(position, field)| {
            let name = field.member_name(position);
            let ty = &field.ty;
            if field.skip {
                quote! { ::freeze::FieldShape::skipped(#name) }
            } else if FieldKind::from_type(ty).is_interface() {
                let label = utils::type_label(ty);
                quote! { ::freeze::FieldShape::new(#name, || ::freeze::Shape::interface(#label)) }
            } else {
                quote! { ::freeze::FieldShape::new(#name, <#ty as ::freeze::Replicate>::shape) }
            }
        })
        .collect()
}
