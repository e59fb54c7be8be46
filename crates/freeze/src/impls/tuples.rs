//! Tuples are composites whose members are named by position.

use crate::{FieldShape, Replicate, Shape, Slot};
use std::any::type_name;

macro_rules! tuple_composite {
    ($(($($name:ident $index:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Replicate),+> Replicate for ($($name,)+) {
                fn shape() -> Shape {
                    Shape::composite(
                        type_name::<Self>(),
                        vec![$(FieldShape::new(stringify!($index), $name::shape)),+],
                    )
                }

                fn replicate(&self) -> Self {
                    ($(self.$index.replicate(),)+)
                }

                fn member_names() -> Vec<&'static str> {
                    vec![$(stringify!($index)),+]
                }

                fn visit_member(&self, name: &str, visit: &mut dyn FnMut(&dyn Slot)) -> bool {
                    match name {
                        $(stringify!($index) => {
                            visit(&self.$index);
                            true
                        })+
                        _ => false,
                    }
                }
            }
        )*
    };
}

tuple_composite!(
    (A 0),
    (A 0, B 1),
    (A 0, B 1, C 2),
    (A 0, B 1, C 2, D 3),
);
