use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// In-memory configuration record for the component.
///
/// The record is always a total shallow merge of the defaults and the
/// top-level keys present on disk: serde `default` attributes fill keys
/// absent from the file, and keys this crate does not know about are
/// carried in `extra` so they survive a load/save round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Gates whether the owning process performs any work.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Component-specific settings; no internal structure imposed here.
    #[serde(default)]
    pub settings: Map<String, Value>,
    /// Top-level keys not named above, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            settings: Map::new(),
            extra: Map::new(),
        }
    }
}
