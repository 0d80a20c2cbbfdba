//! Core types shared across plcdiff facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error and logging facilities, so that every layer emits the same field
//! keys and event names.

pub mod schema;
