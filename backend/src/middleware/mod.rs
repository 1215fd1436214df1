//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently the
//! per-request trace scope.

pub mod trace;

pub use trace::Trace;
