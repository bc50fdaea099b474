//! Application lifecycle: startup wiring, the HTTP server and shutdown

pub mod lifetime;
pub mod modes;
