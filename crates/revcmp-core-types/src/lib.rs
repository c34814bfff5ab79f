//! Core types shared across revcmp facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
