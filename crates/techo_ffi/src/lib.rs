//! Flutter-facing bindings for Techo core.

pub mod api;
