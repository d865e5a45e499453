use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

/// Cutover instant after which the legacy `originID` stamp stops being
/// written in [`OriginIdStamp::UntilCutover`] mode (2025-10-14T16:00:00Z).
pub const DEFAULT_CUTOVER_MS: u64 = 1_760_457_600_000;

/// Whether overlays carry an `originID` metadata field pointing back at
/// the object they highlight.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum OriginIdStamp {
    /// Never write the field.
    #[default]
    Omit,
    /// Write the field only while the wall clock is before the cutover.
    UntilCutover,
    /// Always write the field.
    Always,
}

/// Legacy overlay metadata for consumers that look overlays up by
/// `originID`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Origin Id", inline)]
#[serde(default)]
pub struct OriginIdOptions {
    /// Stamping policy.
    #[schemars(title = "Stamp")]
    pub stamp: OriginIdStamp,
    /// Cutover instant in milliseconds since the Unix epoch.
    #[schemars(skip)]
    pub cutover_ms: u64,
}

impl Default for OriginIdOptions {
    fn default() -> Self {
        Self {
            stamp: OriginIdStamp::Omit,
            cutover_ms: DEFAULT_CUTOVER_MS,
        }
    }
}

impl OriginIdOptions {
    /// Whether an overlay created at `now_ms` gets the stamp.
    #[must_use]
    pub fn stamps_at(&self, now_ms: u64) -> bool {
        match self.stamp {
            OriginIdStamp::Omit => false,
            OriginIdStamp::UntilCutover => now_ms < self.cutover_ms,
            OriginIdStamp::Always => true,
        }
    }

    /// Whether an overlay created now gets the stamp.
    #[must_use]
    pub fn stamps_now(&self) -> bool {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| {
                u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
            });
        self.stamps_at(now_ms)
    }
}
