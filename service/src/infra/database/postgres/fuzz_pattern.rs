//! [`FuzzPattern`] definition.

use derive_more::Display;
use itertools::Itertools as _;
use postgres_types::{FromSql, ToSql};

/// `SIMILAR TO` pattern matching a text containing any word of a search term.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct FuzzPattern(String);

impl FuzzPattern {
    /// Characters having a special meaning in `SIMILAR TO` patterns.
    const SPECIAL: &'static [char] = &[
        '\\', '%', '_', '|', '*', '+', '?', '{', '}', '(', ')', '[', ']',
    ];

    /// Creates a new [`FuzzPattern`] out of the whitespace-separated words of
    /// the provided `term`.
    #[must_use]
    pub fn new(term: &str) -> Self {
        let words = term.split_whitespace().format_with("|", |word, f| {
            f(&format_args!("%{}%", Self::escape(word)))
        });
        Self(format!("({words})"))
    }

    /// Escapes the [`FuzzPattern::SPECIAL`] characters of the `word`.
    fn escape(word: &str) -> String {
        word.chars().fold(String::with_capacity(word.len()), |mut out, c| {
            if Self::SPECIAL.contains(&c) {
                out.push('\\');
            }
            out.push(c);
            out
        })
    }
}
