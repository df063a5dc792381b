//! Protocol constants shared across the agent.

/// Number of characters in a bare relay code (the part between the brackets).
pub const RELAY_CODE_LENGTH: usize = 4;

/// Well-known discovery endpoint that exchanges a relay code for the managing
/// server's host and organization id.
pub const DEVICE_INIT_URL: &str = "https://init.tether.dev/api/relay";
