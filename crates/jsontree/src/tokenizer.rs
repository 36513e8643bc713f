//! Generic ordered-rule tokenizer.
//!
//! A [`Tokenizer`] holds an ordered list of `(kind, pattern)` rules. At each
//! scan offset the rules are tried in registration order and the first one
//! that matches a non-empty slice wins; there is no longest-match
//! reconciliation, so registration order is part of a tokenizer's contract
//! (keyword rules must come before any rule that also matches their prefix).
//!
//! An optional filter hook sees every token before it is appended and can veto
//! it, which is how insignificant tokens such as whitespace are dropped.
//!
//! Every successful run ends with exactly one synthetic token of kind
//! [`Kind::end`] flagged `is_last`, so consumers can detect end of input
//! without bounds checks.
//!
//! # Example
//!
//! ```
//! use jsontree::tokenizer::{Kind, Tokenizer};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Word { Alpha, Digits, Gap, End }
//!
//! impl Kind for Word {
//!     fn end() -> Self { Word::End }
//! }
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer.add_pattern(Word::Alpha, "[a-z]+").unwrap();
//! tokenizer.add_pattern(Word::Digits, "[0-9]+").unwrap();
//! tokenizer.add_pattern(Word::Gap, " +").unwrap();
//! let tokenizer = tokenizer.with_filter(|t| t.kind != Word::Gap);
//!
//! let tokens = tokenizer.tokenize("abc 42").unwrap();
//! let kinds: Vec<Word> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![Word::Alpha, Word::Digits, Word::End]);
//! ```

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::error::{LexError, Result};

/// A token taxonomy usable by [`Tokenizer`].
pub trait Kind: Copy + Eq + fmt::Debug {
    /// Kind assigned to the synthetic end-of-stream token.
    fn end() -> Self;
}

/// One matched slice of the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<K> {
    pub kind: K,
    /// Raw matched text. Empty for the end-of-stream token.
    pub text: String,
    /// Byte offset of the first matched byte.
    pub position: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Set only on the synthetic end-of-stream token.
    pub is_last: bool,
}

impl<K: Kind> Token<K> {
    /// Whether this is the end-of-stream marker.
    pub fn is_end(&self) -> bool {
        self.is_last
    }
}

type TokenFilter<K> = Box<dyn Fn(&Token<K>) -> bool + Send + Sync>;

struct TokenRule<K> {
    kind: K,
    regex: Regex,
}

/// Ordered-rule tokenizer over any token kind.
pub struct Tokenizer<K> {
    rules: Vec<TokenRule<K>>,
    filter: Option<TokenFilter<K>>,
}

impl<K: Kind> Default for Tokenizer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kind> fmt::Debug for Tokenizer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<(K, &str)> = self
            .rules
            .iter()
            .map(|r| (r.kind, r.regex.as_str()))
            .collect();
        f.debug_struct("Tokenizer")
            .field("rules", &rules)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl<K: Kind> Tokenizer<K> {
    /// Create a tokenizer with no rules and no filter.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            filter: None,
        }
    }

    /// Register a rule. The pattern is anchored at the scan offset, so it
    /// should not carry its own `^`.
    pub fn add_pattern(&mut self, kind: K, pattern: &str) -> Result<&mut Self> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})"))?;
        self.rules.push(TokenRule { kind, regex });
        Ok(self)
    }

    /// Install a veto hook. Tokens for which `filter` returns `false` are
    /// dropped from the output.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Token<K>) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Split `text` into tokens.
    ///
    /// Fails on the first offset where no rule matches; nothing is skipped.
    pub fn tokenize(&self, text: &str) -> std::result::Result<Vec<Token<K>>, LexError> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        let mut tracker = LineTracker::default();

        while offset < text.len() {
            let rest = &text[offset..];
            let hit = self.rules.iter().find_map(|rule| {
                rule.regex
                    .find(rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (rule.kind, m.end()))
            });

            let Some((kind, len)) = hit else {
                return Err(LexError {
                    position: offset,
                    line: tracker.line,
                    column: tracker.column,
                    found: rest.chars().next().unwrap_or_default(),
                });
            };

            let matched = &rest[..len];
            let token = Token {
                kind,
                text: matched.to_string(),
                position: offset,
                line: tracker.line,
                column: tracker.column,
                is_last: false,
            };
            if self.keeps(&token) {
                tokens.push(token);
            }
            tracker.consume(matched);
            offset += len;
        }

        tokens.push(Token {
            kind: K::end(),
            text: String::new(),
            position: text.len(),
            line: tracker.line,
            column: tracker.column,
            is_last: true,
        });
        Ok(tokens)
    }

    fn keeps(&self, token: &Token<K>) -> bool {
        self.filter.as_ref().is_none_or(|f| f(token))
    }
}

/// Running line/column position. `\r\n`, `\r` and `\n` each end a line.
#[derive(Debug, Clone, Copy)]
struct LineTracker {
    line: usize,
    column: usize,
    after_cr: bool,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            after_cr: false,
        }
    }
}

impl LineTracker {
    fn consume(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\n' if self.after_cr => {}
                '\n' | '\r' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
            self.after_cr = c == '\r';
        }
    }
}
