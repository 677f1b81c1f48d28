//! Message preparation for the board.
//!
//! Input text goes through three steps before it reaches the network:
//!
//! 1. [`escape`] turns `\n` and friends into literal characters
//! 2. [`aliases`] rewrites `{green}` style tokens into numeric codes
//! 3. [`raw`] decides whether the input is already a character matrix
//!
//! [`MessageInput::classify`] runs the raw check on the untouched input and
//! only prepares template text when composition is needed.

pub mod aliases;
pub mod escape;
pub mod raw;

pub use aliases::{canonical_alias, AliasResolver, AliasTable};
pub use escape::decode_escapes;
pub use raw::{looks_like_raw_characters, parse_characters};

/// What a `send` input turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    /// Already a character matrix; skip composition.
    Raw(String),
    /// Template text, escape-decoded and alias-resolved.
    Template(String),
}

impl MessageInput {
    /// Classifies `input`, preparing template text with `resolver`.
    pub fn classify(input: &str, resolver: &AliasResolver<'_>) -> Self {
        if looks_like_raw_characters(input) {
            return Self::Raw(input.to_string());
        }
        Self::Template(prepare_template(input, resolver))
    }
}

/// Decodes escapes, then resolves alias tokens.
pub fn prepare_template(input: &str, resolver: &AliasResolver<'_>) -> String {
    resolver.resolve(&decode_escapes(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(input: &str) -> MessageInput {
        MessageInput::classify(input, &AliasResolver::new(AliasTable::builtin()))
    }

    #[test]
    fn test_alias_template() {
        assert_eq!(
            classify("hello {green}"),
            MessageInput::Template("hello {66}".to_string())
        );
    }

    #[test]
    fn test_escaped_newline_template() {
        assert_eq!(
            classify(r"Hello\nworld"),
            MessageInput::Template("Hello\nworld".to_string())
        );
    }

    #[test]
    fn test_raw_matrix_bypasses_preparation() {
        assert_eq!(
            classify("[[72,69],[0,0]]"),
            MessageInput::Raw("[[72,69],[0,0]]".to_string())
        );
    }

    #[test]
    fn test_escape_then_alias() {
        assert_eq!(
            classify(r"{red}\t{blue}"),
            MessageInput::Template("{63}\t{67}".to_string())
        );
    }
}
