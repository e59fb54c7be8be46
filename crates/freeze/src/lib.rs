//! Deep-copy routines and immutable snapshots for values with shared mutable state.
//!
//! `freeze` hands callers read-only views of a value that can never be used to observe or
//! cause a mutation of the data behind it. Types opt in with `#[derive(Replicate)]`, which
//! generates a copy function that allocates fresh handles (`Rc<RefCell<_>>`,
//! `Arc<Mutex<_>>`, ...) instead of aliasing them.
//!
//! # Core Concepts
//!
//! - **Replicate**: Trait for types with a generated deep-copy function and shape
//! - **Shape**: Static description of a type's copy structure, validated before use
//! - **CloneRoutine**: A validated copy function for one type
//! - **RoutineCache**: Compiles each type's routine once and shares it across threads
//! - **Immutable**: Wrapper holding the original and a snapshot, handing out copies only
//! - **DynImmutable**: Type-erased, name-indexed access to a wrapped value
//!
//! # Quick Start
//!
//! ```
//! use freeze::{wrap, Replicate};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Debug, PartialEq, Replicate)]
//! struct Settings {
//!     theme: String,
//!     retries: u8,
//! }
//!
//! #[derive(Debug, PartialEq, Replicate)]
//! struct Session {
//!     user: String,
//!     settings: Rc<RefCell<Settings>>,
//! }
//!
//! let settings = Rc::new(RefCell::new(Settings { theme: "dark".into(), retries: 3 }));
//! let session = wrap(Session { user: "ada".into(), settings }).unwrap();
//!
//! // Emitted copies are independent of each other and of the original
//! let copy = session.emit();
//! copy.settings.borrow_mut().retries = 0;
//! assert_eq!(session.emit().settings.borrow().retries, 3);
//!
//! // Nested members come back as their own immutables
//! let nested = session.reference::<Rc<RefCell<Settings>>>("settings").unwrap();
//! assert_eq!(nested.value::<String>("theme").unwrap(), "dark");
//! ```
//!
//! # Restrictions
//!
//! Routines are refused for trait objects, open-ended collections (`Vec`, `HashMap`, ...),
//! borrowed composites, and graphs nested deeper than [`FreezeConfig::max_depth`]
//! composite/array boundaries. Use arrays, boxed slices and enums with data instead.

extern crate self as freeze;

mod cache;
mod compile;
mod config;
mod dynamic;
mod error;
mod immutable;
mod impls;
mod replicate;
mod shape;
mod store;

pub use cache::{clear_routines, routine, RoutineCache};
pub use compile::{compile, CloneRoutine};
pub use config::{FreezeConfig, DEFAULT_MAX_DEPTH};
pub use dynamic::DynImmutable;
pub use error::{FreezeError, FreezeResult};
pub use immutable::{wrap, Immutable};
pub use replicate::{ImmutableExt, Replicate, Slot};
pub use shape::{
    short_type_name, FieldShape, MemberKind, Rejection, Shape, ShapeFn, ShapeKind, VariantShape,
};
pub use store::ImmutableStore;

// Re-export derive macro when feature is enabled
#[cfg(feature = "derive")]
pub use freeze_derive::Replicate;

#[doc(hidden)]
pub mod __private {
    /// Body of the copy function generated for types with trait-object fields.
    ///
    /// The routine compiler rejects such types, so only a direct `replicate()` call gets here.
    #[cold]
    pub fn unreachable_shape(type_name: &str) -> ! {
        panic!("'{type_name}' has a trait-object field and cannot be replicated")
    }
}
