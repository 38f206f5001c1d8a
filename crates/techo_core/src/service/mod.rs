//! Use-case services for UI callers.
//!
//! # Responsibility
//! - Combine calendar annotations with stored events into view-ready data.
//! - Validate user input before it reaches the store.

pub mod calendar_service;
