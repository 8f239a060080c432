use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

const FALLBACK_ICON: &str = "🎁";
const FALLBACK_LABEL: &str = "Other";
const FALLBACK_COLOR: &str = "#64748b";

/// Spending classification attached to every expense.
///
/// The set of known tags is closed. Tags that are not recognised (for example
/// from data written by a newer build) are preserved verbatim in `Unknown`
/// and presented with the `other` icon, label and colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Study,
    Food,
    Transport,
    Entertainment,
    Clothing,
    Health,
    Tech,
    Other,
    Unknown(String),
}

impl Category {
    pub const KNOWN: [Category; 8] = [
        Category::Study,
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Clothing,
        Category::Health,
        Category::Tech,
        Category::Other,
    ];

    /// Maps a tag to its category, keeping unrecognised tags as `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "study" => Category::Study,
            "food" => Category::Food,
            "transport" => Category::Transport,
            "entertainment" => Category::Entertainment,
            "clothing" => Category::Clothing,
            "health" => Category::Health,
            "tech" => Category::Tech,
            "other" => Category::Other,
            unknown => Category::Unknown(unknown.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Category::Study => "study",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Clothing => "clothing",
            Category::Health => "health",
            Category::Tech => "tech",
            Category::Other => "other",
            Category::Unknown(tag) => tag,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Study => "📚",
            Category::Food => "🍔",
            Category::Transport => "🚌",
            Category::Entertainment => "🎮",
            Category::Clothing => "👕",
            Category::Health => "💊",
            Category::Tech => "📱",
            Category::Other | Category::Unknown(_) => FALLBACK_ICON,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Study => "Study",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Clothing => "Clothing",
            Category::Health => "Health",
            Category::Tech => "Tech",
            Category::Other | Category::Unknown(_) => FALLBACK_LABEL,
        }
    }

    /// Chart colour as a CSS hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Study => "#6366f1",
            Category::Food => "#f59e0b",
            Category::Transport => "#10b981",
            Category::Entertainment => "#ec4899",
            Category::Clothing => "#8b5cf6",
            Category::Health => "#ef4444",
            Category::Tech => "#06b6d4",
            Category::Other | Category::Unknown(_) => FALLBACK_COLOR,
        }
    }

    pub fn known_tags() -> Vec<&'static str> {
        vec![
            "study",
            "food",
            "transport",
            "entertainment",
            "clothing",
            "health",
            "tech",
            "other",
        ]
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match Category::from_tag(&tag) {
            Category::Unknown(_) => Category::Unknown(tag),
            known => known,
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unknown(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

/// Strict parse used for user input: unknown tags are rejected.
impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match Category::from_tag(&normalized) {
            Category::Unknown(_) => Err(LedgerError::validation(format!(
                "unknown category `{}` (expected one of: {})",
                s.trim(),
                Category::known_tags().join(", ")
            ))),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
