//! Request and response bodies for the board and compose services.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_CHARACTER_CODE;
use crate::options::{Align, ComposeStyle, Dimensions, Justify, TransitionSpeed, TransitionType};

/// Row-major grid of character codes, one inner vector per display line.
///
/// Rows are not required to have equal length; the board service enforces
/// its own shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterMatrix(Vec<Vec<i64>>);

impl CharacterMatrix {
    /// Wraps rows of character codes.
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self(rows)
    }

    /// Borrows the rows.
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.0
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.0.len()
    }

    /// Codes outside `0..=71`. The board service is the final judge, so
    /// these are reported rather than rejected.
    pub fn out_of_range_codes(&self) -> Vec<i64> {
        self.0
            .iter()
            .flatten()
            .copied()
            .filter(|code| !(0..=MAX_CHARACTER_CODE).contains(code))
            .collect()
    }

    /// Consumes the matrix, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<i64>> {
        self.0
    }
}

impl From<Vec<Vec<i64>>> for CharacterMatrix {
    fn from(rows: Vec<Vec<i64>>) -> Self {
        Self(rows)
    }
}

/// Board write body for a raw matrix.
#[derive(Debug, Clone, Serialize)]
pub struct WriteRequest<'a> {
    /// Matrix to display.
    pub characters: &'a CharacterMatrix,
}

/// Board write body for plain text rendered by the board service.
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest<'a> {
    /// Text to display.
    pub text: &'a str,
}

/// Style of a single compose component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentStyle {
    /// Vertical alignment.
    pub align: Align,
    /// Horizontal justification.
    pub justify: Justify,
}

/// One templated block in a compose request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Template text with alias tokens already resolved.
    pub template: String,
    /// Placement of the text.
    pub style: ComponentStyle,
}

/// Body of `POST /compose`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    /// Components to lay out; the CLI always sends exactly one.
    pub components: Vec<Component>,
    /// Grid override, present only for fixed-size models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Dimensions>,
}

impl RenderRequest {
    /// Builds a single-component request shaped for `style.model`.
    pub fn new(template: impl Into<String>, style: ComposeStyle) -> Self {
        Self {
            components: vec![Component {
                template: template.into(),
                style: ComponentStyle {
                    align: style.align,
                    justify: style.justify,
                },
            }],
            style: style.model.dimensions(),
        }
    }
}

#[derive(Deserialize)]
struct WrappedCharacters {
    characters: CharacterMatrix,
}

/// Decoded compose response.
///
/// The compose service answers either `{"characters": [[...]]}` or a bare
/// `[[...]]`; both carry the same matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeResponse {
    /// `{"characters": [[...]]}`
    Wrapped(CharacterMatrix),
    /// `[[...]]`
    Bare(CharacterMatrix),
}

impl ComposeResponse {
    /// Tries the wrapped shape, then the bare shape. Empty matrices do not
    /// count as a match.
    pub fn decode(body: &[u8]) -> Option<Self> {
        if let Ok(wrapped) = serde_json::from_slice::<WrappedCharacters>(body) {
            if !wrapped.characters.is_empty() {
                return Some(Self::Wrapped(wrapped.characters));
            }
        }
        match serde_json::from_slice::<CharacterMatrix>(body) {
            Ok(characters) if !characters.is_empty() => Some(Self::Bare(characters)),
            _ => None,
        }
    }

    /// The decoded matrix, whichever shape it arrived in.
    pub fn into_characters(self) -> CharacterMatrix {
        match self {
            Self::Wrapped(characters) | Self::Bare(characters) => characters,
        }
    }
}

/// Body of `PUT /transition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    /// Animation type.
    pub transition: TransitionType,
    /// Animation speed.
    pub transition_speed: TransitionSpeed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Model;
    use serde_json::json;

    #[test]
    fn test_write_request_serialization() {
        let matrix = CharacterMatrix::new(vec![vec![68, 69], vec![70, 71]]);
        let body = serde_json::to_value(WriteRequest { characters: &matrix }).unwrap();
        assert_eq!(body, json!({"characters": [[68, 69], [70, 71]]}));
    }

    #[test]
    fn test_render_request_note_has_dimensions() {
        let style = ComposeStyle {
            model: Model::Note,
            align: Align::Top,
            justify: Justify::Left,
        };
        let body = serde_json::to_value(RenderRequest::new("hi", style)).unwrap();
        assert_eq!(
            body,
            json!({
                "components": [{"template": "hi", "style": {"align": "top", "justify": "left"}}],
                "style": {"height": 3, "width": 15}
            })
        );
    }

    #[test]
    fn test_render_request_flagship_omits_style() {
        let body = serde_json::to_value(RenderRequest::new("hi", ComposeStyle::default())).unwrap();
        assert!(body.get("style").is_none());
        assert_eq!(body["components"][0]["style"]["align"], "center");
    }

    #[test]
    fn test_compose_response_shapes_agree() {
        let wrapped = ComposeResponse::decode(br#"{"characters":[[1,2],[3,4]]}"#).unwrap();
        let bare = ComposeResponse::decode(b"[[1,2],[3,4]]").unwrap();
        assert!(matches!(wrapped, ComposeResponse::Wrapped(_)));
        assert!(matches!(bare, ComposeResponse::Bare(_)));
        assert_eq!(wrapped.into_characters(), bare.into_characters());
    }

    #[test]
    fn test_compose_response_rejects_empty_and_garbage() {
        assert!(ComposeResponse::decode(br#"{"characters":[]}"#).is_none());
        assert!(ComposeResponse::decode(b"[]").is_none());
        assert!(ComposeResponse::decode(br#"{"message":"nope"}"#).is_none());
        assert!(ComposeResponse::decode(b"").is_none());
    }

    #[test]
    fn test_out_of_range_codes() {
        let matrix = CharacterMatrix::new(vec![vec![0, 71, 72], vec![-1]]);
        assert_eq!(matrix.out_of_range_codes(), vec![72, -1]);
        assert_eq!(matrix.height(), 2);
    }

    #[test]
    fn test_transition_request_serialization() {
        let body = serde_json::to_value(TransitionRequest {
            transition: TransitionType::Wave,
            transition_speed: TransitionSpeed::Gentle,
        })
        .unwrap();
        assert_eq!(body, json!({"transition": "wave", "transitionSpeed": "gentle"}));
    }
}
