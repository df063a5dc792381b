//! Tether Agent daemon library.
//!
//! Startup identity resolution for the remote-control agent: the conductor
//! carries externally supplied connection context, and the device init
//! service resolves the managing server and organization branding.

pub mod conductor;
pub mod device_init;
