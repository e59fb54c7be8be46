//! Shape descriptors for replicable types.
//!
//! A [`Shape`] is the static description the routine compiler walks before it hands out a
//! clone routine. Children are referenced through [`ShapeFn`] pointers and built lazily, so a
//! self-referential type produces a finite descriptor that only unfolds as far as the
//! compiler asks.

use std::fmt;

/// Lazily builds the shape of a child type.
pub type ShapeFn = fn() -> Shape;

/// Static description of how a type is copied.
#[derive(Debug, Clone)]
pub struct Shape {
    type_name: &'static str,
    kind: ShapeKind,
}

/// Classification of a type for deep copying.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    /// Copied by assignment; never traversed.
    Value,
    /// Fixed-length sequence of a single element type.
    Array {
        /// Element shape.
        element: ShapeFn,
        /// Length when known statically (`[T; N]`).
        len: Option<usize>,
    },
    /// A struct or tuple rebuilt field by field.
    Composite {
        /// Declared fields in order.
        fields: Vec<FieldShape>,
    },
    /// An enum with data, rebuilt as the same variant.
    Variants {
        /// Declared variants in order.
        variants: Vec<VariantShape>,
    },
    /// A smart pointer or cell owning exactly one target.
    Handle {
        /// Target shape.
        target: ShapeFn,
    },
    /// `Option<T>`: `None` short-circuits.
    Nullable {
        /// Inner shape.
        inner: ShapeFn,
    },
    /// A shape the compiler refuses.
    Rejected(Rejection),
}

/// Rule that rejects a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A trait object or opaque `impl Trait`: the concrete shape is unknown.
    Interface,
    /// An open-ended list (`Vec`, `VecDeque`, ...).
    ListLike,
    /// A keyed collection (`HashMap`, `BTreeSet`, ...).
    MapLike,
    /// Borrowed data with no owner to construct an independent copy into.
    Unconstructible,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Interface => f.write_str(
                "unable to clone interfaces. Use concrete types and implementations instead.",
            ),
            Rejection::ListLike => {
                f.write_str("unable to clone list-like types. Consider using an array instead.")
            }
            Rejection::MapLike => f.write_str(
                "unable to clone map-like types. Consider moving these objects to their own state.",
            ),
            Rejection::Unconstructible => {
                f.write_str("borrowed data cannot be rebuilt as an owned copy.")
            }
        }
    }
}

/// A declared field of a composite or variant.
#[derive(Debug, Clone)]
pub struct FieldShape {
    name: &'static str,
    shape: Option<ShapeFn>,
}

impl FieldShape {
    /// A field copied from the original through its own routine.
    pub fn new(name: &'static str, shape: ShapeFn) -> Self {
        Self {
            name,
            shape: Some(shape),
        }
    }

    /// A field constructed in its default form instead of being copied.
    pub fn skipped(name: &'static str) -> Self {
        Self { name, shape: None }
    }

    /// The member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's shape, `None` when skipped.
    pub fn shape(&self) -> Option<Shape> {
        self.shape.map(|build| build())
    }

    /// Whether the field is constructed in its default form.
    pub fn is_skipped(&self) -> bool {
        self.shape.is_none()
    }
}

/// A declared variant of an enum with data.
#[derive(Debug, Clone)]
pub struct VariantShape {
    name: &'static str,
    fields: Vec<FieldShape>,
}

impl VariantShape {
    /// Create a variant shape.
    pub fn new(name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self { name, fields }
    }

    /// The variant name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The variant's payload fields.
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }
}

impl Shape {
    /// A value shape.
    pub fn value(type_name: &'static str) -> Self {
        Self::new(type_name, ShapeKind::Value)
    }

    /// An array shape.
    pub fn array(type_name: &'static str, element: ShapeFn, len: Option<usize>) -> Self {
        Self::new(type_name, ShapeKind::Array { element, len })
    }

    /// A composite shape.
    pub fn composite(type_name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self::new(type_name, ShapeKind::Composite { fields })
    }

    /// A tagged-variant shape.
    pub fn variants(type_name: &'static str, variants: Vec<VariantShape>) -> Self {
        Self::new(type_name, ShapeKind::Variants { variants })
    }

    /// A handle shape.
    pub fn handle(type_name: &'static str, target: ShapeFn) -> Self {
        Self::new(type_name, ShapeKind::Handle { target })
    }

    /// A nullable shape.
    pub fn nullable(type_name: &'static str, inner: ShapeFn) -> Self {
        Self::new(type_name, ShapeKind::Nullable { inner })
    }

    /// A rejected shape.
    pub fn rejected(type_name: &'static str, rejection: Rejection) -> Self {
        Self::new(type_name, ShapeKind::Rejected(rejection))
    }

    /// The shape of a field declared with a trait object or `impl Trait` type.
    pub fn interface(declared: &'static str) -> Self {
        Self::rejected(declared, Rejection::Interface)
    }

    fn new(type_name: &'static str, kind: ShapeKind) -> Self {
        Self { type_name, kind }
    }

    /// The full type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The type name with module paths stripped.
    pub fn display_name(&self) -> String {
        short_type_name(self.type_name)
    }

    /// The classification.
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Whether this shape is copied by assignment.
    pub fn is_value(&self) -> bool {
        matches!(self.kind, ShapeKind::Value)
    }

    /// Whether this shape is an array.
    pub fn is_array(&self) -> bool {
        matches!(self.kind, ShapeKind::Array { .. })
    }

    /// Peel handles and nullables down to the shape that determines the access kind.
    pub fn resolved(&self) -> Shape {
        let mut current = self.clone();
        loop {
            match current.kind {
                ShapeKind::Handle { target } => current = target(),
                ShapeKind::Nullable { inner } => current = inner(),
                _ => return current,
            }
        }
    }

    /// How a member of this shape is read through an immutable.
    pub fn member_kind(&self) -> MemberKind {
        match self.resolved().kind {
            ShapeKind::Value => MemberKind::Value,
            ShapeKind::Array { .. } => MemberKind::Array,
            _ => MemberKind::Reference,
        }
    }
}

/// The access kind of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Returned by copy.
    Value,
    /// Re-wrapped in a nested immutable.
    Reference,
    /// Re-wrapped element by element.
    Array,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Value => f.write_str("value"),
            MemberKind::Reference => f.write_str("reference"),
            MemberKind::Array => f.write_str("array"),
        }
    }
}

/// Strip module paths from a `std::any::type_name` string.
///
/// `alloc::vec::Vec<app::model::Item>` becomes `Vec<Item>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}
