//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier assigned by the remote API
pub type TaskId = i64;

/// Neutral color used when a task carries none
pub const NEUTRAL_COLOR: &str = "#21262d";

/// A presentation color token, either a name (`green`) or hex (`#008000`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Self::neutral()
        } else {
            Self(token)
        }
    }

    pub fn neutral() -> Self {
        Self(NEUTRAL_COLOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_neutral(&self) -> bool {
        self.0 == NEUTRAL_COLOR
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::neutral()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Color {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

// null and "" both decode to the neutral color
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = Option::<String>::deserialize(deserializer)?;
        Ok(token.map(Color::new).unwrap_or_default())
    }
}

/// The fixed 8-value palettes offered by the two views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Color names, offered by the creation view
    Named,
    /// Hex codes, offered by the edit dialog
    Hex,
}

const NAMED_COLORS: [&str; 8] = [
    "red", "orange", "yellow", "green", "blue", "purple", "pink", "brown",
];

const HEX_COLORS: [&str; 8] = [
    "#FF0000", "#FFA500", "#FFFF00", "#008000", "#0000FF", "#800080", "#FFC0CB", "#A52A2A",
];

impl Palette {
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            Self::Named => &NAMED_COLORS,
            Self::Hex => &HEX_COLORS,
        }
    }

    pub fn colors(self) -> Vec<Color> {
        self.tokens().iter().map(|token| Color::new(*token)).collect()
    }

    /// Case-insensitive palette membership
    pub fn contains(self, color: &Color) -> bool {
        self.tokens()
            .iter()
            .any(|token| token.eq_ignore_ascii_case(color.as_str()))
    }

    /// The color preselected when the palette is first shown
    pub fn initial(self) -> Color {
        match self {
            Self::Named => Color::new(NAMED_COLORS[0]),
            Self::Hex => Color::neutral(),
        }
    }
}

/// A task as returned by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Copy of this task with the completed flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Copy of this task with new title, color and completed flag
    ///
    /// Id and timestamps are carried over untouched.
    pub fn edited(&self, title: impl Into<String>, color: Color, completed: bool) -> Self {
        Self {
            title: title.into(),
            color,
            completed,
            ..self.clone()
        }
    }
}

/// Draft sent to the remote API to create a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub completed: bool,
}

impl NewTask {
    /// Create a draft with the given title and the neutral color
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: Color::neutral(),
            completed: false,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }
}

/// A title with nothing but whitespace is rejected before any request.
///
/// Accepted titles are sent as typed, surrounding whitespace included.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}
