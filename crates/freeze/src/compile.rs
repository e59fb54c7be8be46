//! Clone routine compiler.
//!
//! The copy code of every type is generated ahead of time by `#[derive(Replicate)]`. What
//! remains for runtime is validation: the compiler walks the type's shape graph, refuses
//! disallowed shapes, and bounds nesting with a depth counter. A routine only exists for a
//! type whose entire graph was accepted.
//!
//! Depth is counted in composite/array boundaries starting at 1 for the root. Value shapes
//! are never depth-checked, and handles and nullables are transparent. There is no visited
//! set: a self-referential type unfolds until the limit and fails with
//! [`FreezeError::DepthExceeded`].

use crate::{FreezeConfig, FreezeError, FreezeResult, Rejection, Replicate, Shape, ShapeKind};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ROUTINE_ID: AtomicU64 = AtomicU64::new(1);

/// A validated, type-specialized deep-copy function.
///
/// Cheap to clone; clones share the same routine instance.
pub struct CloneRoutine<T> {
    inner: Arc<RoutineInner<T>>,
}

struct RoutineInner<T> {
    id: u64,
    type_name: &'static str,
    copy: fn(&T) -> T,
    depth: usize,
    nodes: usize,
}

impl<T> CloneRoutine<T> {
    fn new(type_name: &'static str, copy: fn(&T) -> T, depth: usize, nodes: usize) -> Self {
        Self {
            inner: Arc::new(RoutineInner {
                id: NEXT_ROUTINE_ID.fetch_add(1, Ordering::Relaxed),
                type_name,
                copy,
                depth,
                nodes,
            }),
        }
    }

    /// Produce an independent copy of `value`.
    #[inline]
    pub fn apply(&self, value: &T) -> T {
        (self.inner.copy)(value)
    }

    /// Process-unique id of this routine.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Name of the type this routine copies.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    /// Deepest composite/array boundary reached during validation (0 for value types).
    pub fn depth(&self) -> usize {
        self.inner.depth
    }

    /// Number of shape nodes visited during validation.
    pub fn nodes_visited(&self) -> usize {
        self.inner.nodes
    }

    /// Whether both handles refer to the same routine instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for CloneRoutine<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for CloneRoutine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloneRoutine")
            .field("id", &self.inner.id)
            .field("type_name", &self.inner.type_name)
            .field("depth", &self.inner.depth)
            .field("nodes", &self.inner.nodes)
            .finish()
    }
}

/// Validate `T`'s shape graph and package its generated copy function.
///
/// Most callers go through [`RoutineCache::routine`](crate::RoutineCache::routine), which
/// compiles each type at most once.
pub fn compile<T: Replicate>(config: &FreezeConfig) -> FreezeResult<CloneRoutine<T>> {
    let shape = T::shape();
    let mut walk = Traversal::new(config.max_depth);

    if shape.is_value() {
        walk.nodes = 1;
    } else {
        walk.visit(&shape, 1)?;
    }

    let routine = CloneRoutine::new(shape.type_name(), T::replicate, walk.deepest, walk.nodes);
    tracing::debug!(
        type_name = routine.type_name(),
        depth = routine.depth(),
        nodes = routine.nodes_visited(),
        routine_id = routine.id(),
        "compiled clone routine"
    );
    Ok(routine)
}

struct Traversal {
    max_depth: usize,
    deepest: usize,
    nodes: usize,
}

impl Traversal {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            deepest: 0,
            nodes: 0,
        }
    }

    fn visit(&mut self, shape: &Shape, depth: usize) -> FreezeResult<()> {
        self.nodes += 1;
        match shape.kind() {
            ShapeKind::Value => Ok(()),
            ShapeKind::Rejected(Rejection::Unconstructible) => {
                Err(FreezeError::construction_unavailable(shape.display_name()))
            }
            ShapeKind::Rejected(rejection) => Err(FreezeError::shape_rejected(
                shape.display_name(),
                *rejection,
            )),
            ShapeKind::Handle { target } => self.visit(&target(), depth),
            ShapeKind::Nullable { inner } => self.visit(&inner(), depth),
            ShapeKind::Array { element, .. } => {
                self.enter(shape, depth)?;
                self.visit(&element(), depth + 1)
            }
            ShapeKind::Composite { fields } => {
                self.enter(shape, depth)?;
                for field in fields {
                    if let Some(child) = field.shape() {
                        self.visit(&child, depth + 1)?;
                    }
                }
                Ok(())
            }
            ShapeKind::Variants { variants } => {
                self.enter(shape, depth)?;
                for field in variants.iter().flat_map(|variant| variant.fields()) {
                    if let Some(child) = field.shape() {
                        self.visit(&child, depth + 1)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn enter(&mut self, shape: &Shape, depth: usize) -> FreezeResult<()> {
        if depth > self.max_depth {
            return Err(FreezeError::depth_exceeded(
                shape.display_name(),
                depth,
                self.max_depth,
            ));
        }
        self.deepest = self.deepest.max(depth);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldShape;
    use std::any::type_name;

    struct Leaf(i32);

    impl Replicate for Leaf {
        fn shape() -> Shape {
            Shape::composite(type_name::<Self>(), vec![FieldShape::new("0", i32::shape)])
        }

        fn replicate(&self) -> Self {
            Leaf(self.0)
        }
    }

    struct Chain {
        next: Option<Box<Chain>>,
    }

    impl Replicate for Chain {
        fn shape() -> Shape {
            Shape::composite(
                type_name::<Self>(),
                vec![FieldShape::new("next", <Option<Box<Chain>>>::shape)],
            )
        }

        fn replicate(&self) -> Self {
            Chain {
                next: self.next.replicate(),
            }
        }
    }

    struct Holder {
        items: Vec<i32>,
    }

    impl Replicate for Holder {
        fn shape() -> Shape {
            Shape::composite(
                type_name::<Self>(),
                vec![FieldShape::new("items", <Vec<i32>>::shape)],
            )
        }

        fn replicate(&self) -> Self {
            Holder {
                items: self.items.replicate(),
            }
        }
    }

    #[test]
    fn test_value_root_skips_traversal() {
        let routine = compile::<String>(&FreezeConfig::with_max_depth(0)).unwrap();
        assert_eq!(routine.depth(), 0);
        assert_eq!(routine.nodes_visited(), 1);
        assert_eq!(routine.apply(&"x".to_string()), "x");
    }

    #[test]
    fn test_handles_are_transparent() {
        let routine = compile::<std::rc::Rc<Box<Leaf>>>(&FreezeConfig::default()).unwrap();
        assert_eq!(routine.depth(), 1);
        assert_eq!(routine.apply(&std::rc::Rc::new(Box::new(Leaf(4)))).0, 4);
    }

    #[test]
    fn test_zero_depth_rejects_composite_root() {
        let err = compile::<Leaf>(&FreezeConfig::with_max_depth(0)).unwrap_err();
        assert!(matches!(err, FreezeError::DepthExceeded { depth: 1, max_depth: 0, .. }));
    }

    #[test]
    fn test_self_reference_hits_depth_limit() {
        let err = compile::<Chain>(&FreezeConfig::default()).unwrap_err();
        match err {
            FreezeError::DepthExceeded {
                type_name,
                depth,
                max_depth,
            } => {
                assert_eq!(type_name, "Chain");
                assert_eq!(depth, 6);
                assert_eq!(max_depth, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejected_field_names_offending_type() {
        let err = compile::<Holder>(&FreezeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            FreezeError::ShapeRejected {
                rejection: Rejection::ListLike,
                ..
            }
        ));
        assert!(err.to_string().starts_with("'Vec<i32>'"));
    }

    #[test]
    fn test_borrowed_slice_of_composites_is_unconstructible() {
        let err = compile::<[&'static [Leaf]; 1]>(&FreezeConfig::default()).unwrap_err();
        assert!(matches!(err, FreezeError::ConstructionUnavailable { .. }));
        compile::<[&'static [u8]; 1]>(&FreezeConfig::default()).unwrap();
    }

    #[test]
    fn test_each_compile_produces_a_new_routine() {
        let first = compile::<Leaf>(&FreezeConfig::default()).unwrap();
        let second = compile::<Leaf>(&FreezeConfig::default()).unwrap();
        assert!(!first.ptr_eq(&second));
        assert!(first.ptr_eq(&first.clone()));
        assert_ne!(first.id(), second.id());
    }
}
