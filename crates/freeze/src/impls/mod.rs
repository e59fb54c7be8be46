//! `Replicate` implementations for standard library (and optional third-party) types.

mod arrays;
mod collections;
mod pointers;
mod primitives;
mod tuples;
