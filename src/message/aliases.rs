//! Alias tokens for template text.
//!
//! Users write `{green}` or `{question mark}` instead of remembering the
//! numeric character code. [`AliasResolver`] rewrites those tokens into the
//! `{66}` form the compose service understands while leaving numeric tokens,
//! unknown tokens and `{{ expression }}` blocks exactly as written.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in aliases: colors, punctuation and symbols.
const BUILTIN_ALIASES: &[(&str, u8)] = &[
    ("blank", 0),
    ("space", 0),
    ("exclamation", 37),
    ("exclamation mark", 37),
    ("at", 38),
    ("pound", 39),
    ("hash", 39),
    ("dollar", 40),
    ("left parenthesis", 41),
    ("open parenthesis", 41),
    ("right parenthesis", 42),
    ("close parenthesis", 42),
    ("hyphen", 44),
    ("dash", 44),
    ("plus", 46),
    ("ampersand", 47),
    ("equal", 48),
    ("equals", 48),
    ("semicolon", 49),
    ("colon", 50),
    ("single quote", 52),
    ("apostrophe", 52),
    ("double quote", 53),
    ("percent", 54),
    ("comma", 55),
    ("period", 56),
    ("dot", 56),
    ("slash", 59),
    ("forward slash", 59),
    ("question", 60),
    ("question mark", 60),
    ("degree", 62),
    ("heart", 62),
    ("red", 63),
    ("orange", 64),
    ("yellow", 65),
    ("green", 66),
    ("blue", 67),
    ("violet", 68),
    ("purple", 68),
    ("white", 69),
    ("black", 70),
    ("filled", 71),
];

static BUILTIN: LazyLock<AliasTable> =
    LazyLock::new(|| AliasTable::from_entries(BUILTIN_ALIASES.iter().copied()));

/// Immutable map from canonical alias name to character code.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    codes: HashMap<String, u8>,
}

impl AliasTable {
    /// The table of aliases shipped with the CLI.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builds a table, canonicalizing each name.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, u8)>) -> Self {
        let codes = entries
            .into_iter()
            .map(|(name, code)| (canonical_alias(name), code))
            .collect();
        Self { codes }
    }

    /// Looks up an alias in any spelling that canonicalizes to a known name.
    pub fn lookup(&self, alias: &str) -> Option<u8> {
        self.codes.get(&canonical_alias(alias)).copied()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates over `(canonical name, code)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.codes.iter().map(|(name, code)| (name.as_str(), *code))
    }
}

/// Normalizes an alias: lowercase, `_` and `-` as spaces, single spaces.
pub fn canonical_alias(input: &str) -> String {
    input
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rewrites alias tokens in template text.
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    table: &'a AliasTable,
}

impl<'a> AliasResolver<'a> {
    /// Creates a resolver over `table`.
    pub fn new(table: &'a AliasTable) -> Self {
        Self { table }
    }

    /// Returns `input` with every single-brace alias replaced by its code.
    ///
    /// `{{...}}` spans are copied verbatim, including anything inside that
    /// looks like an alias. An unterminated token or expression ends the
    /// scan and the remainder is copied as-is.
    pub fn resolve(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let token = &rest[open..];

            // Expression blocks must be checked first or their leading brace
            // would be read as the start of an alias token.
            if let Some(body) = token.strip_prefix("{{") {
                let Some(close) = body.find("}}") else {
                    out.push_str(token);
                    return out;
                };
                let end = close + 4;
                out.push_str(&token[..end]);
                rest = &token[end..];
                continue;
            }

            let Some(close) = token[1..].find('}') else {
                out.push_str(token);
                return out;
            };
            self.rewrite_token(&token[1..=close], &mut out);
            rest = &token[close + 2..];
        }

        out.push_str(rest);
        out
    }

    fn rewrite_token(&self, interior: &str, out: &mut String) {
        let trimmed = interior.trim();
        out.push('{');
        if trimmed.parse::<i64>().is_ok() {
            out.push_str(trimmed);
        } else if let Some(code) = self.table.lookup(trimmed) {
            out.push_str(&code.to_string());
        } else {
            out.push_str(interior);
        }
        out.push('}');
    }
}
