//! Model families: closed-form evaluators and the per-family catalog.
//!
//! Models are implemented as small, pure functions so that fitting/selection
//! code can stay generic.

pub mod catalog;
pub mod model;

pub use catalog::{Axis, Form, ModelDef, lookup};
pub use model::*;
