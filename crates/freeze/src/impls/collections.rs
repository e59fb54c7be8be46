//! Open-ended collections.
//!
//! These are rejected by the routine compiler: their length is unbounded and their
//! element graph cannot be validated ahead of time. The copies below are still correct,
//! element-wise deep copies for callers that use `Replicate` directly.

use crate::{Rejection, Replicate, Shape};
use std::any::type_name;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

macro_rules! list_like {
    ($($list:ident $(: $bound:path)?),* $(,)?) => {
        $(
            impl<T: Replicate $(+ $bound)?> Replicate for $list<T> {
                fn shape() -> Shape {
                    Shape::rejected(type_name::<Self>(), Rejection::ListLike)
                }

                fn replicate(&self) -> Self {
                    self.iter().map(T::replicate).collect()
                }
            }
        )*
    };
}

list_like!(Vec, VecDeque, LinkedList, BinaryHeap: Ord);

impl<T: Replicate + Ord> Replicate for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::rejected(type_name::<Self>(), Rejection::MapLike)
    }

    fn replicate(&self) -> Self {
        self.iter().map(T::replicate).collect()
    }
}

impl<T, S> Replicate for HashSet<T, S>
where
    T: Replicate + Eq + Hash,
    S: BuildHasher + Default + 'static,
{
    fn shape() -> Shape {
        Shape::rejected(type_name::<Self>(), Rejection::MapLike)
    }

    fn replicate(&self) -> Self {
        self.iter().map(T::replicate).collect()
    }
}

impl<K: Replicate + Ord, V: Replicate> Replicate for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::rejected(type_name::<Self>(), Rejection::MapLike)
    }

    fn replicate(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.replicate(), value.replicate()))
            .collect()
    }
}

impl<K, V, S> Replicate for HashMap<K, V, S>
where
    K: Replicate + Eq + Hash,
    V: Replicate,
    S: BuildHasher + Default + 'static,
{
    fn shape() -> Shape {
        Shape::rejected(type_name::<Self>(), Rejection::MapLike)
    }

    fn replicate(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.replicate(), value.replicate()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Rejection, Replicate, ShapeKind};
    use std::collections::{BTreeSet, HashMap, VecDeque};

    fn rejection_of<T: Replicate>() -> Option<Rejection> {
        match T::shape().kind() {
            ShapeKind::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }

    #[test]
    fn test_collections_are_rejected() {
        assert_eq!(rejection_of::<Vec<i32>>(), Some(Rejection::ListLike));
        assert_eq!(rejection_of::<VecDeque<String>>(), Some(Rejection::ListLike));
        assert_eq!(rejection_of::<HashMap<String, i32>>(), Some(Rejection::MapLike));
        assert_eq!(rejection_of::<BTreeSet<u8>>(), Some(Rejection::MapLike));
    }

    #[test]
    fn test_direct_copy_is_element_wise() {
        let original = vec![String::from("a"), String::from("b")];
        assert_eq!(original.replicate(), original);
    }
}
