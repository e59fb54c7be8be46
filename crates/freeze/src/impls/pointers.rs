//! Handle and nullable shapes.
//!
//! Copying a handle never clones the pointer: the copy owns a fresh allocation (and a fresh
//! cell or lock) around a copy of the target, so no two values share mutable state.

use crate::{Replicate, Shape, Slot};
use std::any::type_name;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

impl<T: Replicate> Replicate for Option<T> {
    fn shape() -> Shape {
        Shape::nullable(type_name::<Self>(), T::shape)
    }

    fn replicate(&self) -> Self {
        self.as_ref().map(T::replicate)
    }

    fn member_names() -> Vec<&'static str> {
        T::member_names()
    }

    fn visit_member(&self, name: &str, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        self.as_ref()
            .is_some_and(|inner| inner.visit_member(name, visit))
    }

    fn element_count(&self) -> Option<usize> {
        self.as_ref().and_then(T::element_count)
    }

    fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        self.as_ref()
            .is_some_and(|inner| inner.visit_element(index, visit))
    }

    fn is_null(&self) -> bool {
        self.as_ref().map_or(true, T::is_null)
    }
}

/// Handles whose target is reachable through `Deref`.
macro_rules! deref_handle {
    ($($handle:ident),* $(,)?) => {
        $(
            impl<T: Replicate> Replicate for $handle<T> {
                fn shape() -> Shape {
                    Shape::handle(type_name::<Self>(), T::shape)
                }

                fn replicate(&self) -> Self {
                    $handle::new((**self).replicate())
                }

                fn member_names() -> Vec<&'static str> {
                    T::member_names()
                }

                fn visit_member(&self, name: &str, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
                    (**self).visit_member(name, visit)
                }

                fn element_count(&self) -> Option<usize> {
                    (**self).element_count()
                }

                fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
                    (**self).visit_element(index, visit)
                }

                fn is_null(&self) -> bool {
                    (**self).is_null()
                }
            }
        )*
    };
}

deref_handle!(Box, Rc, Arc);

/// Cells and locks: the target is read under a guard.
macro_rules! guarded_handle {
    ($($handle:ident => |$cell:ident| $guard:expr),* $(,)?) => {
        $(
            impl<T: Replicate> Replicate for $handle<T> {
                fn shape() -> Shape {
                    Shape::handle(type_name::<Self>(), T::shape)
                }

                fn replicate(&self) -> Self {
                    let $cell = self;
                    $handle::new($guard.replicate())
                }

                fn member_names() -> Vec<&'static str> {
                    T::member_names()
                }

                fn visit_member(&self, name: &str, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
                    let $cell = self;
                    $guard.visit_member(name, visit)
                }

                fn element_count(&self) -> Option<usize> {
                    let $cell = self;
                    $guard.element_count()
                }

                fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
                    let $cell = self;
                    $guard.visit_element(index, visit)
                }

                fn is_null(&self) -> bool {
                    let $cell = self;
                    $guard.is_null()
                }
            }
        )*
    };
}

guarded_handle!(
    RefCell => |cell| cell.borrow(),
    Mutex => |cell| cell.lock().unwrap_or_else(PoisonError::into_inner),
    RwLock => |cell| cell.read().unwrap_or_else(PoisonError::into_inner),
);

impl<T: Replicate + Copy> Replicate for Cell<T> {
    fn shape() -> Shape {
        Shape::handle(type_name::<Self>(), T::shape)
    }

    fn replicate(&self) -> Self {
        Cell::new(self.get().replicate())
    }

    fn member_names() -> Vec<&'static str> {
        T::member_names()
    }

    fn visit_member(&self, name: &str, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        self.get().visit_member(name, visit)
    }

    fn element_count(&self) -> Option<usize> {
        self.get().element_count()
    }

    fn visit_element(&self, index: usize, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
        self.get().visit_element(index, visit)
    }

    fn is_null(&self) -> bool {
        self.get().is_null()
    }
}
