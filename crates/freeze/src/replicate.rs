//! The `Replicate` trait and its type-erased member view.
//!
//! `Replicate` is normally implemented with `#[derive(Replicate)]`, which generates the copy
//! function, the shape descriptor and the member table at compile time.

use crate::{DynImmutable, FreezeResult, Immutable, RoutineCache, Shape};
use std::any::Any;

/// A type with a derived deep-copy function and a static shape description.
///
/// # Examples
///
/// ```
/// use freeze::Replicate;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// #[derive(Debug, PartialEq, Replicate)]
/// struct Profile {
///     bio: String,
/// }
///
/// #[derive(Debug, PartialEq, Replicate)]
/// struct User {
///     name: String,
///     profile: Rc<RefCell<Profile>>,
/// }
///
/// let user = User {
///     name: "Alice".into(),
///     profile: Rc::new(RefCell::new(Profile { bio: "hi".into() })),
/// };
/// let copy = user.replicate();
/// copy.profile.borrow_mut().bio = "changed".into();
///
/// assert_eq!(user.profile.borrow().bio, "hi");
/// assert!(!Rc::ptr_eq(&user.profile, &copy.profile));
/// ```
pub trait Replicate: Sized + 'static {
    /// Describe how this type is copied.
    fn shape() -> Shape;

    /// Produce a structurally independent copy.
    ///
    /// Prefer going through a [`CloneRoutine`](crate::CloneRoutine): a routine only exists
    /// for types whose whole shape graph was accepted by the compiler.
    ///
    /// # Panics
    ///
    /// Panics when a `RefCell` on the way is mutably borrowed, and when the type has an
    /// unskipped trait-object field. A `Mutex` already locked by the calling thread
    /// deadlocks.
    fn replicate(&self) -> Self;

    /// Names of the members readable through [`Replicate::visit_member`].
    fn member_names() -> Vec<&'static str> {
        Vec::new()
    }

    /// Look up a declared member by name and hand it to `visit`.
    ///
    /// Returns `false` when no such member exists.
    fn visit_member(&self, name: &str, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        let _ = (name, visit);
        false
    }

    /// Number of elements when this value is an array, `None` otherwise.
    fn element_count(&self) -> Option<usize> {
        None
    }

    /// Hand the element at `index` to `visit`; `false` when out of bounds or not an array.
    fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        let _ = (index, visit);
        false
    }

    /// Whether this value is a null (`None`) reference.
    fn is_null(&self) -> bool {
        false
    }
}

/// Object-safe view of a member value found by name or index.
///
/// Every [`Replicate`] type is a `Slot`.
pub trait Slot {
    /// Shape of the member's declared type.
    fn slot_shape(&self) -> Shape;

    /// The member as `Any`, for downcasting to its declared type.
    fn slot_any(&self) -> &dyn Any;

    /// A boxed independent copy of the member.
    fn slot_replica(&self) -> Box<dyn Any>;

    /// Whether the member is null.
    fn slot_is_null(&self) -> bool;

    /// Element count when the member is an array.
    fn slot_len(&self) -> Option<usize>;

    /// Visit one element of an array member.
    fn slot_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool;

    /// Wrap a copy of the member in a new immutable.
    fn slot_wrap(&self, cache: &RoutineCache) -> FreezeResult<Box<dyn DynImmutable>>;
}

impl<T: Replicate> Slot for T {
    fn slot_shape(&self) -> Shape {
        T::shape()
    }

    fn slot_any(&self) -> &dyn Any {
        self
    }

    fn slot_replica(&self) -> Box<dyn Any> {
        Box::new(self.replicate())
    }

    fn slot_is_null(&self) -> bool {
        self.is_null()
    }

    fn slot_len(&self) -> Option<usize> {
        self.element_count()
    }

    fn slot_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        self.visit_element(index, visit)
    }

    fn slot_wrap(&self, cache: &RoutineCache) -> FreezeResult<Box<dyn DynImmutable>> {
        Ok(Box::new(Immutable::with_cache(self.replicate(), cache)?))
    }
}

/// Extension trait making any [`Replicate`] value immutable.
pub trait ImmutableExt: Replicate {
    /// Wrap this value in an [`Immutable`] using the global routine cache.
    fn make_immutable(self) -> FreezeResult<Immutable<Self>> {
        Immutable::new(self)
    }
}

impl<T: Replicate> ImmutableExt for T {}
