//! Template resolution.
//!
//! A command template may contain `${...}` placeholders. Each placeholder
//! names a variable and optional arguments (`${variable:args}`, split on the
//! first colon, both sides trimmed) and is resolved through an ordered set of
//! strategies; the first one that applies wins:
//!
//! 1. a predefined binding supplied by the caller,
//! 2. `config` — dotted-key settings lookup,
//! 3. `env` — process environment,
//! 4. `input` — interactive prompt, falling back to the args text,
//! 5. `command` — external command invocation,
//! 6. anything else — context variable lookup.
//!
//! Absent values substitute the empty string; unknown variables never fail.
//! A strategy that returns an error aborts the whole resolution. Placeholders
//! do not nest, and an unterminated `${` is treated as literal text.

use std::collections::HashMap;

use crate::accessor::Accessor;
use crate::error::Result;

const OPEN_MARKER: &str = "${";
const CLOSE_MARKER: char = '}';

/// One parsed `${...}` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderToken<'a> {
    pub variable: &'a str,
    pub args: &'a str,
}

impl<'a> PlaceholderToken<'a> {
    /// Parses the text between the markers: everything before the first
    /// colon is the variable, everything after is the args.
    #[must_use]
    pub fn parse(span: &'a str) -> Self {
        let (variable, args) = match span.split_once(':') {
            Some((variable, args)) => (variable, args),
            None => (span, ""),
        };

        Self {
            variable: variable.trim(),
            args: args.trim(),
        }
    }
}

/// Expands every placeholder in `template`, preserving the left-to-right
/// order of the spans in the output.
///
/// Predefined bindings are matched by presence, so a binding whose value is
/// the empty string still shadows every later strategy.
///
/// # Errors
///
/// Returns the first error raised by a strategy (a failed prompt channel or
/// sub-command invocation); the partial result is discarded.
pub fn resolve<A: Accessor>(
    template: &str,
    predefined: &HashMap<String, String>,
    accessor: &A,
) -> Result<String> {
    if template.is_empty() {
        return Ok(String::new());
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN_MARKER) {
        output.push_str(&rest[..start]);
        let after = &rest[start + OPEN_MARKER.len()..];

        match after.find(CLOSE_MARKER) {
            Some(end) => {
                let token = PlaceholderToken::parse(&after[..end]);
                output.push_str(&resolve_token(&token, predefined, accessor)?);
                rest = &after[end + CLOSE_MARKER.len_utf8()..];
            }
            None => {
                // Unterminated marker stays literal.
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    Ok(output)
}

fn resolve_token<A: Accessor>(
    token: &PlaceholderToken<'_>,
    predefined: &HashMap<String, String>,
    accessor: &A,
) -> Result<String> {
    if let Some(value) = predefined.get(token.variable) {
        return Ok(value.clone());
    }

    let args = token.args;

    let resolved = match token.variable {
        "config" => {
            if args.is_empty() {
                None
            } else {
                accessor.config(args)
            }
        }
        "env" => {
            if args.is_empty() {
                None
            } else {
                accessor.env(args)
            }
        }
        "input" => {
            let entry = accessor.input(args)?;
            Some(match entry {
                Some(value) if !value.is_empty() => value,
                _ => args.to_string(),
            })
        }
        "command" => {
            if args.is_empty() {
                None
            } else {
                accessor.invoke(args)?
            }
        }
        variable => accessor.variable(variable),
    };

    Ok(resolved.unwrap_or_default())
}
