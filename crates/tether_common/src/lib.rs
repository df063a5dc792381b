//! Shared types for the Tether remote support agent.
//!
//! Persisted server identity, organization branding, and the protocol
//! constants used by the daemon and tooling.

pub mod agent_config;
pub mod branding;
pub mod constants;
