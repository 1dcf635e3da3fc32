//! Flutter-facing bindings for the RoomDemo core.

pub mod api;
