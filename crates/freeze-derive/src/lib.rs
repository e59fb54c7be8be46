//! Derive macro for the freeze `Replicate` trait.
//!
//! This crate provides `#[derive(Replicate)]`, which generates at compile time:
//! - `replicate()`: a deep copy that rebuilds every field through its own `Replicate` impl
//! - `shape()`: the static shape descriptor validated by the routine compiler
//! - `member_names()` / `visit_member()`: the member table used for name-indexed reads
//!
//! # Usage
//!
//! ```ignore
//! use freeze::Replicate;
//!
//! #[derive(Replicate)]
//! struct User {
//!     name: String,
//!     profile: Rc<RefCell<Profile>>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod field_kind;
mod parse;

/// Derive the `Replicate` trait for a struct or enum.
///
/// Structs become composite shapes and are rebuilt field by field. Enums with data become
/// variant shapes and are rebuilt as the same variant. Enums without data are value shapes.
/// Type parameters receive a `Replicate` bound.
///
/// Fields declared with a trait object (`Box<dyn Trait>`, `impl Trait`, ...) are described
/// as interfaces; the routine compiler refuses such types unless the field is skipped.
///
/// # Panics
///
/// The generated `replicate()` of a type with an unskipped interface field panics. Routines
/// are never compiled for such types, so this is only reached by calling `replicate()`
/// directly, including through the element-wise copy of a rejected collection.
///
/// # Attributes
///
/// ## Container Attributes
///
/// - `#[freeze(value)]`: Copy the whole value with `Clone`. Handles inside are shared
///   between the original and the copy, not rebuilt.
///
/// ## Field Attributes
///
/// - `#[freeze(rename = "name")]`: Use a different member name for lookups
/// - `#[freeze(skip)]`: Construct the field with `Default::default()` instead of copying it;
///   the field is left out of the shape traversal and the member table
/// - `#[freeze(skip, default = "expr")]`: Construct a skipped field from `expr`
///
/// # Examples
///
/// ```ignore
/// use freeze::{wrap, Replicate};
///
/// #[derive(Replicate)]
/// enum Attachment {
///     Missing,
///     Inline { bytes: Box<[u8]> },
///     Linked(Rc<RefCell<Document>>),
/// }
///
/// #[derive(Replicate)]
/// struct Message {
///     #[freeze(rename = "from")]
///     sender: String,
///     attachment: Attachment,
///     #[freeze(skip)]
///     render_cache: Option<Box<String>>,
/// }
///
/// let message = wrap(message)?;
/// let sender: String = message.value("from")?;
/// ```
#[proc_macro_derive(Replicate, attributes(freeze))]
pub fn derive_replicate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match codegen::expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
