//! Selection options with TOML file support.
//!
//! Every sub-struct uses `#[serde(default)]`, so a partial TOML file
//! (e.g. only a `[highlight]` table) fills the rest with defaults.

mod gesture;
mod highlight;
mod origin_id;
mod picking;

use std::path::Path;

pub use gesture::GestureOptions;
pub use highlight::HighlightOptions;
pub use origin_id::{OriginIdOptions, OriginIdStamp, DEFAULT_CUTOVER_MS};
pub use picking::PickingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SelectError;

/// Top-level options container for the selection engine.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct SelectionOptions {
    /// Overlay appearance.
    pub highlight: HighlightOptions,
    /// Click vs drag interpretation.
    pub gesture: GestureOptions,
    /// Hit-testing parameters.
    pub picking: PickingOptions,
    /// Legacy `originID` overlay metadata.
    pub origin_id: OriginIdOptions,
}

impl SelectionOptions {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(SelectionOptions)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SelectError> {
        let content = std::fs::read_to_string(path).map_err(SelectError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| SelectError::OptionsParse(e.to_string()))?;
        log::info!("Loaded selection options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SelectError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SelectError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SelectError::Io)?;
        }
        std::fs::write(path, content).map_err(SelectError::Io)
    }
}
