//! Parsing logic for the Replicate derive macro.

use darling::{ast, FromDeriveInput, FromField, FromVariant};
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{Generics, Ident, Index, Type};

/// Parsed container-level options.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(freeze), supports(struct_any, enum_any))]
pub struct ReplicateInput {
    /// The type identifier.
    pub ident: Ident,

    /// Generic parameters.
    pub generics: Generics,

    /// Struct fields or enum variants.
    pub data: ast::Data<VariantInput, FieldInput>,

    /// Copy the whole value with `Clone` instead of field by field.
    #[darling(default)]
    pub value: bool,
}

impl ReplicateInput {
    /// Every field of a struct, or of every variant of an enum.
    pub fn all_fields(&self) -> Vec<&FieldInput> {
        match &self.data {
            ast::Data::Struct(fields) => fields.iter().collect(),
            ast::Data::Enum(variants) => variants.iter().flat_map(|v| v.fields.iter()).collect(),
        }
    }
}

/// Parsed enum variant.
#[derive(Debug, FromVariant)]
#[darling(attributes(freeze))]
pub struct VariantInput {
    /// Variant identifier.
    pub ident: Ident,

    /// Variant payload.
    pub fields: ast::Fields<FieldInput>,
}

/// Parsed field-level options.
#[derive(Debug, FromField)]
#[darling(attributes(freeze))]
pub struct FieldInput {
    /// Field identifier, `None` for tuple fields.
    pub ident: Option<Ident>,

    /// Field type.
    pub ty: Type,

    /// Member name used for lookups.
    #[darling(default)]
    pub rename: Option<String>,

    /// Expression constructing a skipped field.
    #[darling(default)]
    pub default: Option<String>,

    /// Construct this field in its default form instead of copying it.
    #[darling(default)]
    pub skip: bool,
}

impl FieldInput {
    /// Member name for lookups: the rename, the identifier, or the position.
    pub fn member_name(&self, position: usize) -> String {
        match (&self.rename, &self.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => ident.to_string(),
            (None, None) => position.to_string(),
        }
    }

    /// The field as it appears in a braced struct expression or pattern.
    pub fn member(&self, position: usize) -> TokenStream {
        match &self.ident {
            Some(ident) => ident.to_token_stream(),
            None => Index::from(position).to_token_stream(),
        }
    }
}
