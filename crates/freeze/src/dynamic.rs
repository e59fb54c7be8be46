//! Type-erased access to immutables.
//!
//! [`DynImmutable`] lets callers walk a wrapped value by member name and index without
//! knowing its concrete type. Value members come back as boxed copies for downcasting.

use crate::immutable::with_element;
use crate::shape::short_type_name;
use crate::{FreezeError, FreezeResult, Immutable, MemberKind, Replicate};
use std::any::Any;

/// Object-safe face of an [`Immutable`].
pub trait DynImmutable {
    /// Full name of the wrapped type.
    fn type_name(&self) -> &'static str;

    /// How the wrapped value is accessed.
    fn kind(&self) -> MemberKind;

    /// Whether the wrapped value is `None`.
    fn is_null(&self) -> bool;

    /// Number of elements when the wrapped value is a non-null array.
    fn len(&self) -> Option<usize>;

    /// Names of the members readable by name.
    fn member_names(&self) -> Vec<&'static str>;

    /// A boxed copy of the wrapped value.
    fn emit_any(&self) -> Box<dyn Any>;

    /// A boxed copy of a value member.
    fn value_any(&self, name: &str) -> FreezeResult<Box<dyn Any>>;

    /// A reference member wrapped in a new immutable.
    fn reference_dyn(&self, name: &str) -> FreezeResult<Box<dyn DynImmutable>>;

    /// An array member, element by element.
    fn array_dyn(&self, name: &str) -> FreezeResult<Vec<Box<dyn DynImmutable>>>;

    /// The element at `index` when the wrapped value is an array.
    fn at(&self, index: usize) -> FreezeResult<Box<dyn DynImmutable>>;

    /// Downcast support, e.g. back to `Immutable<T>`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Replicate> DynImmutable for Immutable<T> {
    fn type_name(&self) -> &'static str {
        Immutable::type_name(self)
    }

    fn kind(&self) -> MemberKind {
        Immutable::kind(self)
    }

    fn is_null(&self) -> bool {
        Immutable::is_null(self)
    }

    fn len(&self) -> Option<usize> {
        Immutable::len(self)
    }

    fn member_names(&self) -> Vec<&'static str> {
        Immutable::member_names(self)
    }

    fn emit_any(&self) -> Box<dyn Any> {
        Box::new(self.emit())
    }

    fn value_any(&self, name: &str) -> FreezeResult<Box<dyn Any>> {
        self.with_member(name, MemberKind::Value, |slot| Ok(slot.slot_replica()))
    }

    fn reference_dyn(&self, name: &str) -> FreezeResult<Box<dyn DynImmutable>> {
        self.with_member(name, MemberKind::Reference, |slot| {
            slot.slot_wrap(self.cache())
        })
    }

    fn array_dyn(&self, name: &str) -> FreezeResult<Vec<Box<dyn DynImmutable>>> {
        self.with_member(name, MemberKind::Array, |slot| {
            if slot.slot_is_null() {
                return Err(FreezeError::null_member(self.display_name(), name));
            }
            let len = slot.slot_len().unwrap_or(0);
            (0..len)
                .map(|index| {
                    with_element(slot, index, |element| element.slot_wrap(self.cache()))
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

    fn at(&self, index: usize) -> FreezeResult<Box<dyn DynImmutable>> {
        self.with_index(index, |element| element.slot_wrap(self.cache()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoutineCache;
    use std::rc::Rc;

    #[test]
    fn test_untyped_walk() {
        let cache = RoutineCache::new();
        let wrapper = Immutable::with_cache((7_u16, [Rc::new(1_u8), Rc::new(2)]), &cache).unwrap();
        let erased: &dyn DynImmutable = &wrapper;

        assert_eq!(erased.kind(), MemberKind::Reference);
        let first = erased.value_any("0").unwrap();
        assert_eq!(first.downcast_ref::<u16>(), Some(&7));

        let items = erased.array_dyn("1").unwrap();
        assert_eq!(items.len(), 2);
        let second = items[1].emit_any();
        assert_eq!(**second.downcast_ref::<Rc<u8>>().unwrap(), 2);
    }

    #[test]
    fn test_at_on_array_root() {
        let cache = RoutineCache::new();
        let wrapper = Immutable::with_cache([(1_u8,), (2_u8,)], &cache).unwrap();
        let erased: Box<dyn DynImmutable> = Box::new(wrapper);

        let second = erased.at(1).unwrap();
        assert_eq!(second.kind(), MemberKind::Reference);
        assert_eq!(second.value_any("0").unwrap().downcast_ref::<u8>(), Some(&2));
        assert!(erased.at(2).is_err());

        let typed = erased.as_any().downcast_ref::<Immutable<[(u8,); 2]>>().unwrap();
        assert_eq!(typed.len(), Some(2));
    }

    #[test]
    fn test_reference_dyn_kind_mismatch() {
        let cache = RoutineCache::new();
        let wrapper = Immutable::with_cache((1_u8, (2_u8,)), &cache).unwrap();
        assert!(wrapper.reference_dyn("1").is_ok());
        assert!(matches!(
            wrapper.reference_dyn("0").err(),
            Some(FreezeError::MemberKindMismatch { .. })
        ));
    }
}
