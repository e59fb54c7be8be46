//! Field type analysis for code generation.

use syn::{GenericArgument, PathArguments, ReturnType, Type, TypePath};

/// How a field takes part in the generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Copied through its own `Replicate` implementation.
    Replicated,

    /// Declared with a trait object or `impl Trait` somewhere in its type.
    ///
    /// The concrete shape is unknown, so the field is described as an interface and the
    /// routine compiler refuses the type.
    Interface,
}

impl FieldKind {
    /// Analyze a field type.
    pub fn from_type(ty: &Type) -> Self {
        if mentions_trait_object(ty) {
            FieldKind::Interface
        } else {
            FieldKind::Replicated
        }
    }

    /// Check if this is an interface field.
    pub fn is_interface(&self) -> bool {
        matches!(self, FieldKind::Interface)
    }
}

fn mentions_trait_object(ty: &Type) -> bool {
    match ty {
        Type::TraitObject(_) | Type::ImplTrait(_) => true,
        Type::Path(type_path) => path_mentions_trait_object(type_path),
        Type::Reference(reference) => mentions_trait_object(&reference.elem),
        Type::Ptr(ptr) => mentions_trait_object(&ptr.elem),
        Type::Array(array) => mentions_trait_object(&array.elem),
        Type::Slice(slice) => mentions_trait_object(&slice.elem),
        Type::Paren(paren) => mentions_trait_object(&paren.elem),
        Type::Group(group) => mentions_trait_object(&group.elem),
        Type::Tuple(tuple) => tuple.elems.iter().any(mentions_trait_object),
        _ => false,
    }
}

fn path_mentions_trait_object(type_path: &TypePath) -> bool {
    if let Some(qself) = &type_path.qself {
        if mentions_trait_object(&qself.ty) {
            return true;
        }
    }

    type_path
        .path
        .segments
        .iter()
        .any(|segment| match &segment.arguments {
            PathArguments::AngleBracketed(ab) => ab.args.iter().any(|arg| match arg {
                GenericArgument::Type(ty) => mentions_trait_object(ty),
                _ => false,
            }),
            PathArguments::Parenthesized(args) => {
                args.inputs.iter().any(mentions_trait_object)
                    || matches!(&args.output, ReturnType::Type(_, ty) if mentions_trait_object(ty))
            }
            PathArguments::None => false,
        })
}
