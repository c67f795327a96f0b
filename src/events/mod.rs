//! Event data model: categories, events and targets.
//!
//! ## Contents
//! - [`Category`] opaque event classification with well-known constants
//! - [`Event`] category + payload + once-resolved origin
//! - [`Target`] an origin or listener context (dispatcher or shared object)

mod category;
mod event;
mod target;

pub use category::Category;
pub use event::Event;
pub use target::{Object, Target};
