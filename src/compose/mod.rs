//! The composition engine.
//!
//! Data flows one way: a sealed protocol is flattened by the closure walker,
//! the closure is checked against the target, and only then, in `mixin`, is
//! the target mutated.

mod closure;
mod conformance;
mod mixin;

pub use closure::{collect, Closure};
pub use conformance::{conforms, is_implemented_by, unimplemented};
pub use mixin::{apply_all, mixin};
