//! The immutable wrapper.
//!
//! An [`Immutable`] owns the original value, one snapshot taken when it was built, and the
//! clone routine for the value's type. Nothing it hands out aliases the original: `emit`
//! and the value accessors return copies, nested members come back as new wrappers built
//! from copies, and `extract`/`check` run against a private copy rebuilt from the snapshot.

use crate::shape::short_type_name;
use crate::{CloneRoutine, FreezeError, FreezeResult, MemberKind, Replicate, RoutineCache, Slot};
use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A read-only view over a value that never exposes the value itself.
///
/// # Examples
///
/// ```
/// use freeze::{wrap, Replicate};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// #[derive(Debug, PartialEq, Replicate)]
/// struct Account {
///     owner: String,
///     balance: Rc<RefCell<i64>>,
/// }
///
/// let account = wrap(Account {
///     owner: "ada".into(),
///     balance: Rc::new(RefCell::new(100)),
/// })
/// .unwrap();
///
/// let copy = account.emit();
/// *copy.balance.borrow_mut() = 0;
///
/// assert_eq!(*account.emit().balance.borrow(), 100);
/// assert_eq!(account.value::<String>("owner").unwrap(), "ada");
/// ```
pub struct Immutable<T: Replicate> {
    original: T,
    snapshot: T,
    routine: CloneRoutine<T>,
    cache: RoutineCache,
}

/// Wrap `value` using the global routine cache.
pub fn wrap<T: Replicate>(value: T) -> FreezeResult<Immutable<T>> {
    Immutable::new(value)
}

impl<T: Replicate> Immutable<T> {
    /// Wrap `value`, resolving its routine from the global cache.
    ///
    /// Fails the first time an unsupported type is wrapped.
    pub fn new(value: T) -> FreezeResult<Self> {
        Self::with_cache(value, RoutineCache::global())
    }

    /// Wrap `value`, resolving its routine (and those of nested values) from `cache`.
    pub fn with_cache(value: T, cache: &RoutineCache) -> FreezeResult<Self> {
        let routine = cache.routine::<T>()?;
        let snapshot = routine.apply(&value);
        tracing::trace!(
            type_name = routine.type_name(),
            routine_id = routine.id(),
            "wrapped immutable value"
        );
        Ok(Self {
            original: value,
            snapshot,
            routine,
            cache: cache.clone(),
        })
    }

    /// A fresh, independent copy of the wrapped value.
    ///
    /// # Panics
    ///
    /// The original is read under its cells and locks. This panics if a caller holds a
    /// mutable borrow of a `RefCell` inside it, and deadlocks if the calling thread holds
    /// one of its `Mutex` guards.
    pub fn emit(&self) -> T {
        self.routine.apply(&self.original)
    }

    /// Run `selector` against a private copy and return an independent copy of its result.
    ///
    /// Mutations made by `selector` land on a scratch copy rebuilt from the snapshot and
    /// are never seen by this wrapper or by later calls.
    pub fn extract<V, F>(&self, selector: F) -> FreezeResult<V>
    where
        V: Replicate,
        F: FnOnce(&mut T) -> V,
    {
        let mut scratch = self.routine.apply(&self.snapshot);
        let selected = selector(&mut scratch);
        let routine = self.cache.routine::<V>()?;
        Ok(routine.apply(&selected))
    }

    /// Evaluate `predicate` against a private copy.
    pub fn check<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&T) -> bool,
    {
        let scratch = self.routine.apply(&self.snapshot);
        predicate(&scratch)
    }

    /// Copy of a value member.
    pub fn value<V: Replicate>(&self, name: &str) -> FreezeResult<V> {
        self.with_member(name, MemberKind::Value, |slot| {
            downcast::<V>(slot, name).map(V::replicate)
        })
    }

    /// A reference member, wrapped in a new immutable built from a copy.
    ///
    /// A `None` member produces a null wrapper.
    pub fn reference<R: Replicate>(&self, name: &str) -> FreezeResult<Immutable<R>> {
        self.with_member(name, MemberKind::Reference, |slot| {
            let member = downcast::<R>(slot, name)?;
            Immutable::with_cache(member.replicate(), &self.cache)
        })
    }

    /// An array member, each element wrapped in a new immutable built from a copy.
    pub fn array<E: Replicate>(&self, name: &str) -> FreezeResult<Vec<Immutable<E>>> {
        self.with_member(name, MemberKind::Array, |slot| {
            if slot.slot_is_null() {
                return Err(FreezeError::null_member(self.display_name(), name));
            }
            let len = slot.slot_len().unwrap_or(0);
            (0..len)
                .map(|index| {
                    let label = format!("{name}[{index}]");
                    with_element(slot, index, |element| {
                        let element = downcast::<E>(element, &label)?;
                        Immutable::with_cache(element.replicate(), &self.cache)
                    })
                    .unwrap_or_else(|| {
                        Err(FreezeError::index_out_of_bounds(
                            short_type_name(slot.slot_shape().type_name()),
                            index,
                            len,
                        ))
                    })
                })
                .collect()
        })
    }

    /// The element at `index` when the wrapped value is an array.
    pub fn element<E: Replicate>(&self, index: usize) -> FreezeResult<Immutable<E>> {
        self.with_index(index, |element| {
            let element = downcast::<E>(element, &format!("[{index}]"))?;
            Immutable::with_cache(element.replicate(), &self.cache)
        })
    }

    /// Number of elements when the wrapped value is a non-null array.
    pub fn len(&self) -> Option<usize> {
        self.original.element_count()
    }

    /// Whether the wrapped value is an array with no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Whether the wrapped value is accessed as an array.
    pub fn is_array(&self) -> bool {
        self.kind() == MemberKind::Array
    }

    /// Whether the wrapped value is a value shape.
    pub fn is_value(&self) -> bool {
        self.kind() == MemberKind::Value
    }

    /// Whether the wrapped value is `None`.
    pub fn is_null(&self) -> bool {
        self.original.is_null()
    }

    /// How the wrapped value is accessed.
    pub fn kind(&self) -> MemberKind {
        T::shape().member_kind()
    }

    /// Full name of the wrapped type.
    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    /// Names of the members readable by name.
    pub fn member_names(&self) -> Vec<&'static str> {
        T::member_names()
    }

    /// The routine this wrapper copies with.
    pub fn routine(&self) -> &CloneRoutine<T> {
        &self.routine
    }

    /// The cache nested wrappers resolve their routines from.
    pub fn cache(&self) -> &RoutineCache {
        &self.cache
    }

    pub(crate) fn display_name(&self) -> String {
        short_type_name(type_name::<T>())
    }

    /// Find a member by name, check its access kind and hand it to `read`.
    pub(crate) fn with_member<R>(
        &self,
        name: &str,
        expected: MemberKind,
        read: impl FnOnce(&dyn Slot) -> FreezeResult<R>,
    ) -> FreezeResult<R> {
        let mut read = Some(read);
        let mut result = None;
        let found = self.original.visit_member(name, &mut |slot: &dyn Slot| {
            if let Some(read) = read.take() {
                let actual = slot.slot_shape().member_kind();
                result = Some(if actual == expected {
                    read(slot)
                } else {
                    Err(FreezeError::member_kind_mismatch(
                        self.display_name(),
                        name,
                        expected,
                        actual,
                    ))
                });
            }
        });

        match result {
            Some(result) => result,
            None if !found && T::member_names().contains(&name) => {
                if self.original.is_null() {
                    Err(FreezeError::null_member(self.display_name(), name))
                } else {
                    Err(FreezeError::inactive_member(self.display_name(), name))
                }
            }
            None => Err(FreezeError::member_not_found(self.display_name(), name)),
        }
    }

    /// Bounds-check `index` against the wrapped array and hand the element to `read`.
    pub(crate) fn with_index<R>(
        &self,
        index: usize,
        read: impl FnOnce(&dyn Slot) -> FreezeResult<R>,
    ) -> FreezeResult<R> {
        let label = format!("[{index}]");
        if !self.is_array() {
            return Err(FreezeError::member_kind_mismatch(
                self.display_name(),
                label,
                MemberKind::Array,
                self.kind(),
            ));
        }
        let len = match self.len() {
            Some(len) => len,
            None => return Err(FreezeError::null_member(self.display_name(), label)),
        };
        if index >= len {
            return Err(FreezeError::index_out_of_bounds(self.display_name(), index, len));
        }

        let mut read = Some(read);
        let mut result = None;
        self.original.visit_element(index, &mut |slot: &dyn Slot| {
            if let Some(read) = read.take() {
                result = Some(read(slot));
            }
        });
        result.unwrap_or_else(|| {
            Err(FreezeError::index_out_of_bounds(
                self.display_name(),
                index,
                len,
            ))
        })
    }
}

/// Visit one element of an array slot, returning `None` when it does not exist.
pub(crate) fn with_element<R>(
    slot: &dyn Slot,
    index: usize,
    read: impl FnOnce(&dyn Slot) -> R,
) -> Option<R> {
    let mut read = Some(read);
    let mut result = None;
    slot.slot_element(index, &mut |element: &dyn Slot| {
        if let Some(read) = read.take() {
            result = Some(read(element));
        }
    });
    result
}

fn downcast<'a, V: Replicate>(slot: &'a dyn Slot, member: &str) -> FreezeResult<&'a V> {
    slot.slot_any().downcast_ref::<V>().ok_or_else(|| {
        FreezeError::type_mismatch(
            member,
            short_type_name(type_name::<V>()),
            short_type_name(slot.slot_shape().type_name()),
        )
    })
}

impl<T: Replicate> Clone for Immutable<T> {
    fn clone(&self) -> Self {
        Self {
            original: self.routine.apply(&self.original),
            snapshot: self.routine.apply(&self.snapshot),
            routine: self.routine.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<T: Replicate + PartialEq> PartialEq for Immutable<T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.original == other.original
    }
}

impl<T: Replicate + PartialEq> PartialEq<T> for Immutable<T> {
    fn eq(&self, other: &T) -> bool {
        self.original == *other
    }
}

impl<T: Replicate + Eq> Eq for Immutable<T> {}

impl<T: Replicate + Hash> Hash for Immutable<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original.hash(state);
    }
}

impl<T: Replicate + fmt::Debug> fmt::Debug for Immutable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Immutable").field(&self.original).finish()
    }
}

impl<T: Replicate + fmt::Display> fmt::Display for Immutable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.original, f)
    }
}
