//! The banner entity and its ordinal enumerations.
//!
//! A `Banner` is the in-memory form of one global message banner. Its message
//! field always holds the markdown dialect; the HTML subset only exists on the
//! wire (see [`crate::codec`]). Priority and message id never live in the
//! entity body - they are carried by the composite storage key.

use chrono::{DateTime, Utc};

/// Storage namespace under which all banner entries live.
pub const NAMESPACE: &str = "GlobalMessageBanners";

/// Largest integer a JavaScript number represents exactly. Fresh message ids
/// are timestamps reduced modulo this bound so they stay interchangeable with
/// ids minted by the original web client.
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Precedence among simultaneously active banners. Lower ordinal wins; the
/// precedence policy itself belongs to the store, not to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    P0,
    P1,
    #[default]
    P2,
}

/// Name table for [`Priority`]. Wire names are lower-case by contract.
const PRIORITY_NAMES: [(Priority, &str); 3] = [
    (Priority::P0, "p0"),
    (Priority::P1, "p1"),
    (Priority::P2, "p2"),
];

impl Priority {
    /// The lower-case name used inside composite storage keys.
    pub fn wire_name(self) -> &'static str {
        PRIORITY_NAMES
            .iter()
            .find(|(priority, _)| *priority == self)
            .map(|(_, name)| *name)
            .expect("priority name table covers every variant")
    }

    /// Reverse lookup of a wire name. Returns `None` for unknown prefixes.
    pub fn from_wire_name(name: &str) -> Option<Priority> {
        PRIORITY_NAMES
            .iter()
            .find(|(_, wire)| *wire == name)
            .map(|(priority, _)| *priority)
    }
}

/// Visual severity of a banner. Drives the icon in the consuming UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Info,
    Warning,
    Error,
}

/// Name table for [`Level`]. Wire casing is first-letter-capital by contract.
const LEVEL_NAMES: [(Level, &str); 3] = [
    (Level::Info, "Info"),
    (Level::Warning, "Warning"),
    (Level::Error, "Error"),
];

impl Level {
    /// The canonical name emitted on the wire (`Info`, `Warning`, `Error`).
    pub fn wire_name(self) -> &'static str {
        LEVEL_NAMES
            .iter()
            .find(|(level, _)| *level == self)
            .map(|(_, name)| *name)
            .expect("level name table covers every variant")
    }

    /// Look up a stored level name, tolerating arbitrary input casing.
    ///
    /// The name is lower-cased entirely, re-capitalized on the first character
    /// and then matched against the canonical table.
    pub fn from_wire_name(name: &str) -> Option<Level> {
        let canonical = fix_name_case(name);
        LEVEL_NAMES
            .iter()
            .find(|(_, wire)| *wire == canonical)
            .map(|(level, _)| *level)
    }
}

/// Lower-case a name and re-capitalize only its first character.
fn fix_name_case(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}

/// One global message banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub priority: Priority,
    pub level: Level,
    /// Opaque identifier, minted at creation and immutable afterwards except
    /// when round-tripped out of a composite key.
    pub message_id: String,
    /// Message body in the markdown dialect.
    pub message: String,
    /// `None` means the banner is shown indefinitely.
    pub expiration_date: Option<DateTime<Utc>>,
}

impl Banner {
    /// Create a fresh, unsaved banner with default priority and level.
    pub fn new() -> Self {
        Banner {
            priority: Priority::default(),
            level: Level::default(),
            message_id: (Utc::now().timestamp_millis() % MAX_SAFE_INTEGER).to_string(),
            message: String::new(),
            expiration_date: None,
        }
    }

    /// The composite key this banner occupies in the settings store.
    ///
    /// The key is derived from current field values, so changing `priority`
    /// before saving effectively creates a new row; deleting the old one is
    /// the caller's responsibility.
    pub fn storage_key(&self) -> String {
        format!(
            "{NAMESPACE}/{}-{}",
            self.priority.wire_name(),
            self.message_id
        )
    }

    /// Number of whitespace-separated tokens in the message.
    ///
    /// The word limit itself is enforced by callers, not by the codec.
    pub fn message_word_count(&self) -> usize {
        self.message.split_whitespace().count()
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new()
    }
}
