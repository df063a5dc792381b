//! Process-lifetime connection context.
//!
//! Holds the server identity handed to the agent before resolution runs.
//! Today this comes from the command line; the resolver only ever reads it.

/// Connection context supplied at process start
#[derive(Debug, Clone, Default)]
pub struct Conductor {
    /// Managing server base URL, when already known
    pub host: String,

    /// Organization the session belongs to, when already known
    pub organization_id: String,
}

impl Conductor {
    /// Build from optional command-line values; absent flags become empty
    pub fn from_args(host: Option<String>, organization_id: Option<String>) -> Self {
        Self {
            host: host.unwrap_or_default(),
            organization_id: organization_id.unwrap_or_default(),
        }
    }

    /// True when both host and organization id are usable
    pub fn has_server_identity(&self) -> bool {
        !self.host.trim().is_empty() && !self.organization_id.trim().is_empty()
    }
}
