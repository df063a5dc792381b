//! Organization branding fetched from the managing server.

use serde::{Deserialize, Serialize};

/// Branding metadata for the organization that manages this agent.
///
/// Servers send PascalCase field names; lowercase spellings are accepted as
/// aliases so the record tolerates either casing. The agent treats the
/// contents as opaque display data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrandingInfo {
    /// Product name shown in window titles
    #[serde(default, alias = "product")]
    pub product: Option<String>,

    /// Base64-encoded logo image
    #[serde(default, alias = "logo")]
    pub logo: Option<String>,

    /// Title bar foreground color (hex, e.g. "#FFFFFF")
    #[serde(default, alias = "titleForeground", alias = "title_foreground")]
    pub title_foreground: Option<String>,

    /// Title bar background color
    #[serde(default, alias = "titleBackground", alias = "title_background")]
    pub title_background: Option<String>,

    /// Button foreground color
    #[serde(default, alias = "buttonForeground", alias = "button_foreground")]
    pub button_foreground: Option<String>,
}
