//! Integration tests for `#[derive(Replicate)]`.
//!
//! These tests verify that generated copies, shapes and member tables line up for every
//! supported input form: named, tuple and unit structs, enums with and without data,
//! generic types, and the `freeze` attributes.

use freeze::{wrap, FieldShape, FreezeError, MemberKind, Replicate, ShapeKind};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

// ============================================================================
// Test types
// ============================================================================

#[derive(Debug, PartialEq, Replicate)]
struct Profile {
    bio: String,
    visits: u32,
}

#[derive(Debug, PartialEq, Replicate)]
struct User {
    name: String,
    #[freeze(rename = "details")]
    profile: Rc<RefCell<Profile>>,
    #[freeze(skip)]
    session_hits: u64,
    #[freeze(skip, default = "String::from(\"n/a\")")]
    token: String,
}

#[derive(Debug, Replicate)]
struct Pair(u8, Arc<Mutex<String>>);

#[derive(Debug, PartialEq, Replicate)]
struct Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Replicate)]
enum Status {
    Active,
    Suspended,
}

#[derive(Debug, PartialEq, Replicate)]
enum Attachment {
    Missing,
    Inline { bytes: Box<[u8]> },
    Linked(Rc<RefCell<Profile>>),
}

#[derive(Debug, PartialEq, Replicate)]
struct Labeled<T> {
    label: String,
    item: T,
}

#[derive(Debug, Clone, PartialEq, Replicate)]
#[freeze(value)]
struct SharedCounter {
    count: Rc<RefCell<u32>>,
}

fn shared_profile(bio: &str) -> Rc<RefCell<Profile>> {
    Rc::new(RefCell::new(Profile {
        bio: bio.to_string(),
        visits: 1,
    }))
}

fn field_names(fields: &[FieldShape]) -> Vec<&'static str> {
    fields.iter().map(FieldShape::name).collect()
}

// ============================================================================
// Struct forms
// ============================================================================

#[test]
fn test_named_struct_replicates_handles() {
    let user = User {
        name: "alice".into(),
        profile: shared_profile("hello"),
        session_hits: 42,
        token: "secret".into(),
    };

    let copy = user.replicate();
    assert_eq!(copy.name, "alice");
    assert_eq!(*copy.profile.borrow(), *user.profile.borrow());
    assert!(!Rc::ptr_eq(&copy.profile, &user.profile));

    copy.profile.borrow_mut().visits = 99;
    assert_eq!(user.profile.borrow().visits, 1);
}

#[test]
fn test_skipped_fields_use_defaults() {
    let user = User {
        name: "bob".into(),
        profile: shared_profile(""),
        session_hits: 7,
        token: "secret".into(),
    };

    let copy = user.replicate();
    assert_eq!(copy.session_hits, 0);
    assert_eq!(copy.token, "n/a");
}

#[test]
fn test_named_struct_shape_and_members() {
    let shape = User::shape();
    match shape.kind() {
        ShapeKind::Composite { fields } => {
            assert_eq!(
                field_names(fields),
                vec!["name", "details", "session_hits", "token"]
            );
            assert!(!fields[1].is_skipped());
            assert!(fields[2].is_skipped());
            assert!(fields[3].is_skipped());
        }
        other => panic!("unexpected shape: {other:?}"),
    }
    assert_eq!(User::member_names(), vec!["name", "details"]);
    assert_eq!(shape.display_name(), "User");
}

#[test]
fn test_tuple_struct_members_are_positional() {
    let pair = Pair(3, Arc::new(Mutex::new("x".into())));
    let copy = pair.replicate();

    assert_eq!(copy.0, 3);
    assert_eq!(*copy.1.lock().unwrap(), "x");
    assert!(!Arc::ptr_eq(&copy.1, &pair.1));
    assert_eq!(Pair::member_names(), vec!["0", "1"]);

    let mut seen = None;
    assert!(pair.visit_member("1", &mut |slot| seen = Some(slot.slot_shape().member_kind())));
    assert_eq!(seen, Some(MemberKind::Value));
}

#[test]
fn test_unit_struct_is_empty_composite() {
    assert_eq!(Marker.replicate(), Marker);
    assert!(matches!(
        Marker::shape().kind(),
        ShapeKind::Composite { fields } if fields.is_empty()
    ));
    assert!(Marker::member_names().is_empty());
}

// ============================================================================
// Enum forms
// ============================================================================

#[test]
fn test_fieldless_enum_is_value() {
    assert!(Status::shape().is_value());
    assert_eq!(Status::Suspended.replicate(), Status::Suspended);
    assert!(Status::member_names().is_empty());
}

#[test]
fn test_data_enum_keeps_variant() {
    let inline = Attachment::Inline {
        bytes: vec![1, 2, 3].into_boxed_slice(),
    };
    assert_eq!(inline.replicate(), inline);

    let profile = shared_profile("linked");
    let linked = Attachment::Linked(Rc::clone(&profile));
    match linked.replicate() {
        Attachment::Linked(copy) => {
            assert!(!Rc::ptr_eq(&copy, &profile));
            assert_eq!(*copy.borrow(), *profile.borrow());
        }
        other => panic!("variant changed: {other:?}"),
    }

    assert_eq!(Attachment::Missing.replicate(), Attachment::Missing);
}

#[test]
fn test_data_enum_shape_and_active_members() {
    match Attachment::shape().kind() {
        ShapeKind::Variants { variants } => {
            let names: Vec<_> = variants.iter().map(|v| v.name()).collect();
            assert_eq!(names, vec!["Missing", "Inline", "Linked"]);
            assert!(variants[0].fields().is_empty());
            assert_eq!(field_names(variants[1].fields()), vec!["bytes"]);
        }
        other => panic!("unexpected shape: {other:?}"),
    }
    assert_eq!(Attachment::member_names(), vec!["bytes", "0"]);

    let inline = Attachment::Inline {
        bytes: vec![9].into_boxed_slice(),
    };
    assert!(inline.visit_member("bytes", &mut |_| {}));
    assert!(!inline.visit_member("0", &mut |_| {}));
    assert!(!Attachment::Missing.visit_member("bytes", &mut |_| {}));
}

#[test]
fn test_inactive_variant_member_is_reported() {
    let wrapper = wrap(Attachment::Inline {
        bytes: vec![4, 5].into_boxed_slice(),
    })
    .unwrap();
    assert_eq!(wrapper.array::<u8>("bytes").unwrap().len(), 2);

    let err = wrapper
        .reference::<Rc<RefCell<Profile>>>("0")
        .unwrap_err();
    assert!(matches!(err, FreezeError::InactiveMember { ref member, .. } if member == "0"));
    assert_eq!(
        err.to_string(),
        "member '0' on 'Attachment' belongs to a variant that is not active"
    );

    let missing = wrap(Attachment::Missing).unwrap();
    assert!(matches!(
        missing.array::<u8>("bytes").unwrap_err(),
        FreezeError::InactiveMember { .. }
    ));
    assert!(matches!(
        missing.value::<u8>("nothing").unwrap_err(),
        FreezeError::MemberNotFound { .. }
    ));
}

// ============================================================================
// Generics and value containers
// ============================================================================

#[test]
fn test_generic_struct() {
    let labeled = Labeled {
        label: "boxed".into(),
        item: Box::new(Profile {
            bio: "x".into(),
            visits: 2,
        }),
    };
    assert_eq!(labeled.replicate(), labeled);
    assert_eq!(
        <Labeled<Box<Profile>>>::member_names(),
        vec!["label", "item"]
    );
}

#[test]
fn test_value_container_shares_handles() {
    // Value shapes are copied with `Clone`: shared cells inside stay shared.
    let counter = SharedCounter {
        count: Rc::new(RefCell::new(1)),
    };
    assert!(SharedCounter::shape().is_value());

    let copy = counter.replicate();
    assert!(Rc::ptr_eq(&copy.count, &counter.count));
    *copy.count.borrow_mut() = 5;
    assert_eq!(*counter.count.borrow(), 5);
}
