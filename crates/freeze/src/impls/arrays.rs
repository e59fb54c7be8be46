//! Array shapes: fixed-length sequences copied element by element.

use crate::{Rejection, Replicate, Shape, Slot};
use std::any::type_name;
use std::rc::Rc;
use std::sync::Arc;

fn visit_slice<T: Replicate>(
    items: &[T],
    index: usize,
    visit: &mut dyn FnMut(&dyn Slot),
) -> bool {
    match items.get(index) {
        Some(item) => {
            visit(item);
            true
        }
        None => false,
    }
}

impl<T: Replicate, const N: usize> Replicate for [T; N] {
    fn shape() -> Shape {
        Shape::array(type_name::<Self>(), T::shape, Some(N))
    }

    fn replicate(&self) -> Self {
        std::array::from_fn(|index| self[index].replicate())
    }

    fn element_count(&self) -> Option<usize> {
        Some(N)
    }

    fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        visit_slice(self, index, visit)
    }
}

macro_rules! owned_slice {
    ($($owner:ident),* $(,)?) => {
        $(
            impl<T: Replicate> Replicate for $owner<[T]> {
                fn shape() -> Shape {
                    Shape::array(type_name::<Self>(), T::shape, None)
                }

                fn replicate(&self) -> Self {
                    self.iter().map(T::replicate).collect()
                }

                fn element_count(&self) -> Option<usize> {
                    Some(self.len())
                }

                fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
                    visit_slice(self, index, visit)
                }
            }
        )*
    };
}

owned_slice!(Box, Rc, Arc);

/// Borrowed slices of values are arrays whose copy shares the same elements; anything
/// else would need a fresh owner the copy cannot provide.
impl<T: Replicate> Replicate for &'static [T] {
    fn shape() -> Shape {
        if T::shape().is_value() {
            Shape::array(type_name::<Self>(), T::shape, None)
        } else {
            Shape::rejected(type_name::<Self>(), Rejection::Unconstructible)
        }
    }

    fn replicate(&self) -> Self {
        *self
    }

    fn element_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        visit_slice(self, index, visit)
    }
}
