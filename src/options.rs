//! Typed option values accepted on the command line.
//!
//! Every value is parsed case-insensitively after trimming. Parsing failures
//! are [`ValidationError`]s raised before any network call is attempted.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::{NOTE_HEIGHT, NOTE_WIDTH};

/// Caller-side input that cannot be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(String);

impl ValidationError {
    /// Creates a validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Physical display variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    /// Full-size board (6 rows x 22 columns).
    #[default]
    Flagship,
    /// Small board with a fixed 3 x 15 grid.
    Note,
}

/// Fixed grid size sent to the compose service for constrained models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    /// Rows.
    pub height: u8,
    /// Columns.
    pub width: u8,
}

impl Model {
    /// Resolves the model from the flag, then the configured default.
    ///
    /// Blank values are treated as absent; with nothing set the result is
    /// [`Model::Flagship`].
    pub fn resolve(flag: Option<&str>, fallback: Option<&str>) -> Result<Self, ValidationError> {
        let flag = flag.map(str::trim).filter(|v| !v.is_empty());
        let fallback = fallback.map(str::trim).filter(|v| !v.is_empty());
        match flag.or(fallback) {
            Some(value) => value.parse(),
            None => Ok(Self::default()),
        }
    }

    /// Grid override the compose service needs for this model, if any.
    pub fn dimensions(self) -> Option<Dimensions> {
        match self {
            Self::Flagship => None,
            Self::Note => Some(Dimensions {
                height: NOTE_HEIGHT,
                width: NOTE_WIDTH,
            }),
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flagship => "flagship",
            Self::Note => "note",
        }
    }
}

impl FromStr for Model {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "flagship" => Ok(Self::Flagship),
            "note" => Ok(Self::Note),
            _ => Err(ValidationError::new(format!(
                "invalid --model {:?} (expected \"flagship\" or \"note\")",
                value
            ))),
        }
    }
}

/// Vertical placement of composed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// First rows.
    Top,
    /// Vertically centered.
    #[default]
    Center,
    /// Last rows.
    Bottom,
}

impl FromStr for Align {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "center" => Ok(Self::Center),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ValidationError::new(format!(
                "invalid --align {:?} (expected \"top\", \"center\", or \"bottom\")",
                value
            ))),
        }
    }
}

/// Horizontal placement of composed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
    /// Spread across the row.
    Justified,
}

impl FromStr for Justify {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "center" => Ok(Self::Center),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "justified" => Ok(Self::Justified),
            _ => Err(ValidationError::new(format!(
                "invalid --justify {:?} (expected \"left\", \"center\", \"right\", or \"justified\")",
                value
            ))),
        }
    }
}

/// Animation used when the board flips to a new message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionType {
    /// Every flap cycles in place.
    Classic,
    /// Flaps ripple across the board.
    Wave,
    /// Flaps drift column by column.
    Drift,
    /// Flaps drop like a curtain.
    Curtain,
}

impl FromStr for TransitionType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "wave" => Ok(Self::Wave),
            "drift" => Ok(Self::Drift),
            "curtain" => Ok(Self::Curtain),
            _ => Err(ValidationError::new(format!(
                "invalid --type {:?} (expected \"classic\", \"wave\", \"drift\", or \"curtain\")",
                value
            ))),
        }
    }
}

/// Transition pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionSpeed {
    /// Quick flip.
    Fast,
    /// Slow flip.
    Gentle,
}

impl FromStr for TransitionSpeed {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "gentle" => Ok(Self::Gentle),
            _ => Err(ValidationError::new(format!(
                "invalid --speed {:?} (expected \"fast\" or \"gentle\")",
                value
            ))),
        }
    }
}

/// Unvalidated layout flags shared by `send`, `format` and `clear`.
#[derive(Debug, Clone, Default)]
pub struct StyleFlags {
    /// `--model`, if given.
    pub model: Option<String>,
    /// `--align`.
    pub align: String,
    /// `--justify`.
    pub justify: String,
}

/// Validated compose settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComposeStyle {
    /// Display model.
    pub model: Model,
    /// Vertical alignment.
    pub align: Align,
    /// Horizontal justification.
    pub justify: Justify,
}

impl StyleFlags {
    /// Validates the flags, falling back to `default_model` for the model.
    pub fn resolve(&self, default_model: Option<&str>) -> Result<ComposeStyle, ValidationError> {
        Ok(ComposeStyle {
            model: Model::resolve(self.model.as_deref(), default_model)?,
            align: self.align.parse()?,
            justify: self.justify.parse()?,
        })
    }
}
