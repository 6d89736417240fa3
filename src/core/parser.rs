// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/parser.rs
//!
//! i3 configuration file parser
//!
//! This module extracts `bindsym` declarations from an i3 config.
//! It handles:
//! - Leading indentation and arbitrary whitespace between fields
//! - Inline `# comment` suffixes
//! - Comments inherited from the line directly above a binding
//! - Line numbers for display
//!
//! # Architecture
//! Single lines are parsed with nom combinators. The file-level pass walks
//! the lines once, keeping the previous line around for comment inheritance.
//! Lines that are not bindings are ignored rather than reported, since the
//! rest of the i3 grammar is out of scope.
//!
//! # Comment inheritance
//! A binding without an inline comment adopts the comment on the line above,
//! unless that comment ends with `:`. Those are section headings:
//!
//! ```text
//! # Launchers:                       <- heading, never adopted
//! # open terminal                    <- adopted by the next line
//! bindsym mod4+Return exec alacritty
//! ```

use nom::{
    bytes::complete::{tag, take_while, take_while1},
    combinator::{map, rest},
    IResult, Offset, Parser,
};

use crate::core::types::{Binding, BINDSYM};

/// Whitespace accepted between binding fields
///
/// Matches the classic regex `\s` class: tab, newline, form feed, carriage
/// return and space.
pub fn is_space(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// A `bindsym` line split into its fields, borrowing from the source line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BindsymLine<'a> {
    /// Key token
    pub key: &'a str,
    /// Trimmed action text
    pub action: &'a str,
    /// Trimmed inline comment, if a `#` marker is present
    pub comment: Option<&'a str>,
    /// Byte offset of the `#` marker in the source line
    pub comment_start: Option<usize>,
}

/// Parse the entire config into bindings
///
/// # Arguments
/// * `lines` - The document lines, in file order
///
/// # Returns
/// Every matched binding in file order, with 1-based line numbers
///
/// # Example
/// ```ignore
/// let lines = vec!["# open terminal", "bindsym mod4+Return exec alacritty"];
/// let bindings = parse_bindings(&lines);
/// assert_eq!(bindings[0].comment, "open terminal");
/// ```
pub fn parse_bindings<S: AsRef<str>>(lines: &[S]) -> Vec<Binding> {
    let mut bindings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        let Some(parsed) = parse_line(line) else {
            continue;
        };

        let mut comment = parsed.comment.unwrap_or("").to_string();

        // Fall back to the annotation on the previous line
        if comment.is_empty() && idx > 0 {
            if let Some(inherited) = annotation(lines[idx - 1].as_ref()) {
                comment = inherited.to_string();
            }
        }

        bindings.push(Binding {
            key: parsed.key.to_string(),
            action: parsed.action.to_string(),
            comment,
            line: idx + 1, // Human-readable numbers start at 1
            raw: line.to_string(),
        });
    }

    bindings
}

/// Parse a single line, returning `None` if it is not a binding
pub fn parse_line(line: &str) -> Option<BindsymLine<'_>> {
    let (_, (key, tail)) = parse_bindsym(line).ok()?;

    let (action, comment_at) = split_comment(tail);
    let action = action.trim_matches(is_space);

    // `bindsym <key>` with nothing after it is not a binding
    if action.is_empty() {
        return None;
    }

    let comment_start = comment_at.map(|at| line.offset(tail) + at);
    let comment = comment_at.map(|at| tail[at + 1..].trim_matches(is_space));

    Some(BindsymLine {
        key,
        action,
        comment,
        comment_start,
    })
}

/// Parse the fixed prefix: `<ws>* bindsym <ws>+ <key> <ws>+ <rest>`
///
/// Returns the key and the unparsed tail (action plus optional comment).
pub fn parse_bindsym(input: &str) -> IResult<&str, (&str, &str)> {
    map(
        (
            take_while(is_space),
            tag(BINDSYM),
            take_while1(is_space),
            take_while1(|c: char| !is_space(c)),
            take_while1(is_space),
            rest,
        ),
        |(_, _, _, key, _, tail)| (key, tail),
    )
    .parse(input)
}

/// Split the action tail at its comment marker
///
/// The action always owns its first character, so the marker is the first
/// `#` after that. Returns the action slice and the marker's byte offset.
pub fn split_comment(tail: &str) -> (&str, Option<usize>) {
    let marker = tail
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '#')
        .map(|(at, _)| at);

    match marker {
        Some(at) => (&tail[..at], Some(at)),
        None => (tail, None),
    }
}

/// Content of a comment line with the `#` and surrounding whitespace removed
///
/// Returns `None` for lines that are not comments.
pub fn comment_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_matches(is_space);
    trimmed
        .strip_prefix('#')
        .map(|content| content.trim_matches(is_space))
}

/// Whether a line is a section heading (a comment ending in `:`)
pub fn is_section_heading(line: &str) -> bool {
    comment_text(line).is_some_and(|content| content.ends_with(':'))
}

/// The annotation a binding below this line would inherit
///
/// Only plain comment lines qualify; headings and non-comments return `None`.
pub fn annotation(line: &str) -> Option<&str> {
    comment_text(line).filter(|content| !content.ends_with(':'))
}
