//! Common types and traits
//!
//! This module holds the request context and the collaborator traits the
//! engine is written against, keeping the dispatcher and registry free of any
//! concrete data client or settings backend.

pub mod context;
pub mod traits;

pub use context::Context;
pub use traits::*;
