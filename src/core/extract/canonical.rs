//! Normalization of a tagged template literal into its canonical key.
//!
//! Every interpolation `${expr}` becomes `${N}` (N = position among the
//! template's interpolations). A trailing format annotation such as `:c` or
//! `:n(2)` is dropped with it, and `\r\n` is normalized to `\n`.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};

/// A template key together with the number of placeholders it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTemplate {
    pub key: String,
    pub placeholders: usize,
}

/// Build the canonical key from the raw template body and the source text of
/// each interpolated expression, in source order.
pub fn canonicalize(body: &str, expressions: &[String]) -> Result<CanonicalTemplate> {
    let mut key = body.to_string();
    for (index, expression) in expressions.iter().enumerate() {
        let regex = expression_regex(expression)?;
        let placeholder = format!("${{{}}}", index);
        key = regex.replacen(&key, 1, NoExpand(&placeholder)).into_owned();
    }

    Ok(CanonicalTemplate {
        key: key.replace("\r\n", "\n"),
        placeholders: expressions.len(),
    })
}

/// Regex matching `${ <expression> }` plus an optional format annotation.
///
/// Whitespace inside the expression matches any whitespace character.
fn expression_regex(expression: &str) -> Result<Regex> {
    let escaped: String = regex::escape(expression)
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                r"\s".to_string()
            } else {
                c.to_string()
            }
        })
        .collect();
    let pattern = format!(r"\$\{{\s*{}\s*\}}(?::[a-z](?:\([^)]+\))?)?", escaped);
    Regex::new(&pattern)
        .with_context(|| format!("Failed to build matcher for expression `{}`", expression))
}
