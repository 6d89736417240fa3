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

//! src/core/editor.rs
//!
//! In-place line edits for adding, removing and annotating bindings
//!
//! Every edit works on a `Document` in memory and either succeeds completely
//! or returns an error with the document untouched. Persisting the result
//! (backup + write) is the caller's job, see `config::ConfigManager`.
//!
//! # Comment persistence
//! Comments are stored on the line **above** a binding, never inline:
//!
//! ```text
//! # open terminal
//! bindsym mod4+Return exec alacritty
//! ```
//!
//! The parser prefers an inline `# ...` suffix over the line above, so
//! `set_comment` drops any inline suffix from the target line. Section
//! headings (comment lines ending in `:`) are never rewritten.
//!
//! # Line matching
//! `remove` and `comment` locate lines with a [`KeyPattern`] rather than by
//! parsed index. The pattern uses the parser's whitespace rules and also
//! requires an action, so it matches exactly the lines the parser would
//! recognise for that key.

use regex::Regex;
use thiserror::Error;

use crate::core::{
    document::Document,
    parser::{annotation, is_space, parse_line},
    query::find_by_key,
    types::{Binding, BINDSYM},
};

/// Errors returned by the line editor
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    /// A binding with the same key (ignoring case) already exists
    #[error("Keybinding {key} already exists")]
    DuplicateKey {
        key: String,
        /// The binding currently holding the key
        existing: Box<Binding>,
    },

    /// No binding uses this key
    #[error("Keybinding {0} not found")]
    KeyNotFound(String),

    /// Key, action or comment text cannot be written safely
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result of a successful `remove_binding`
#[derive(Clone, Debug, PartialEq)]
pub struct Removal {
    /// First binding matched for the key, as it was before removal
    pub binding: Binding,
    /// Number of lines deleted (more than one if the file had duplicates)
    pub lines_removed: usize,
}

/// Where `set_comment` put the annotation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommentPlacement {
    /// An existing per-binding comment line was overwritten
    Replaced,
    /// A new comment line was inserted above the binding
    Inserted,
}

/// Result of a successful `set_comment`
#[derive(Clone, Debug, PartialEq)]
pub struct CommentEdit {
    /// The binding with its new comment
    pub binding: Binding,
    pub placement: CommentPlacement,
    /// Whether an inline `# ...` suffix was dropped from the binding line
    pub stripped_inline: bool,
}

/// Anchored, case-insensitive matcher for the binding line of one key
///
/// Equivalent to `^\s*bindsym\s+<key>\s+\S` with the key escaped and
/// compared ignoring case.
#[derive(Clone, Debug)]
pub struct KeyPattern {
    regex: Regex,
}

impl KeyPattern {
    pub fn new(key: &str) -> Result<Self, EditError> {
        const WS: &str = r"[\t\n\x0C\r ]";
        let pattern = format!(
            r"^{ws}*{kw}{ws}+(?i:{key}){ws}+[^\t\n\x0C\r ]",
            ws = WS,
            kw = BINDSYM,
            key = regex::escape(key),
        );

        // The key is escaped, so only regex's size limit can fail here
        let regex = Regex::new(&pattern)
            .map_err(|e| EditError::InvalidInput(format!("Key '{}' is too long: {}", key, e)))?;

        Ok(Self { regex })
    }

    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// Validates a key token before it is written
pub fn validate_key(key: &str) -> Result<(), EditError> {
    if key.is_empty() {
        return Err(EditError::InvalidInput("Key cannot be empty".to_string()));
    }

    if key.chars().any(|c| c.is_whitespace()) {
        return Err(EditError::InvalidInput(format!(
            "Key '{}' must not contain whitespace",
            key
        )));
    }

    // A leading or embedded '#' would be read back as a comment marker
    if key.contains('#') {
        return Err(EditError::InvalidInput(format!(
            "Key '{}' must not contain '#'",
            key
        )));
    }

    Ok(())
}

/// Validates action text before it is written
pub fn validate_action(action: &str) -> Result<(), EditError> {
    if action.trim().is_empty() {
        return Err(EditError::InvalidInput("Action cannot be empty".to_string()));
    }

    if action.contains(['\n', '\r']) {
        return Err(EditError::InvalidInput(
            "Action must be a single line".to_string(),
        ));
    }

    if action.contains('#') {
        return Err(EditError::InvalidInput(
            "Action must not contain '#' (it starts a comment)".to_string(),
        ));
    }

    Ok(())
}

/// Validates comment text before it is written
///
/// Text ending in `:` is rejected: written as `# text:` it would be a section
/// heading and the binding below would not adopt it.
pub fn validate_comment(text: &str) -> Result<(), EditError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(EditError::InvalidInput("Comment cannot be empty".to_string()));
    }

    if text.contains(['\n', '\r']) {
        return Err(EditError::InvalidInput(
            "Comment must be a single line".to_string(),
        ));
    }

    if text.ends_with(':') {
        return Err(EditError::InvalidInput(
            "Comment must not end with ':' (reserved for section headings)".to_string(),
        ));
    }

    Ok(())
}

/// Adds `bindsym <key> <action>` after the last line mentioning `bindsym`
///
/// # Arguments
/// * `doc` - Document to edit
/// * `key` - Key token, must not collide (ignoring case) with an existing key
/// * `action` - Command text
///
/// # Returns
/// The new binding with its line number in the edited document
///
/// # Errors
/// * `EditError::InvalidInput` - Key or action cannot be written as one line
/// * `EditError::DuplicateKey` - Key already bound
///
/// If the file has no `bindsym` line at all, the binding becomes the last
/// content line (before a trailing newline, if there is one).
pub fn add_binding(doc: &mut Document, key: &str, action: &str) -> Result<Binding, EditError> {
    validate_key(key)?;
    validate_action(action)?;

    let bindings = doc.bindings();
    if let Some(existing) = find_by_key(&bindings, key) {
        return Err(EditError::DuplicateKey {
            key: key.to_string(),
            existing: Box::new(existing.clone()),
        });
    }

    let mut binding = Binding::new(key, action);

    let insert_at = match doc
        .lines()
        .iter()
        .rposition(|line| line.trim_matches(is_space).contains(BINDSYM))
    {
        Some(last) => last + 1,
        None => end_of_content(doc),
    };

    doc.insert_line(insert_at, &binding.to_line());
    binding.line = insert_at + 1;
    binding.raw = doc.lines()[insert_at].clone();

    Ok(binding)
}

/// Removes every line binding `key` (ignoring case)
///
/// # Errors
/// * `EditError::KeyNotFound` - No binding uses the key
pub fn remove_binding(doc: &mut Document, key: &str) -> Result<Removal, EditError> {
    let bindings = doc.bindings();
    let binding = find_by_key(&bindings, key)
        .cloned()
        .ok_or_else(|| EditError::KeyNotFound(key.to_string()))?;

    let pattern = KeyPattern::new(key)?;
    let lines_removed = doc.remove_where(|line| pattern.matches(line));

    Ok(Removal {
        binding,
        lines_removed,
    })
}

/// Sets the comment of the binding for `key`
///
/// Overwrites the per-binding comment line above the binding if there is
/// one, otherwise inserts `# <text>` above it. Headings are left alone. Any
/// inline `# ...` suffix on the binding line is removed so the line above
/// becomes the adopted comment.
///
/// # Errors
/// * `EditError::InvalidInput` - Text is empty, multi-line or ends with `:`
/// * `EditError::KeyNotFound` - No binding uses the key
pub fn set_comment(doc: &mut Document, key: &str, text: &str) -> Result<CommentEdit, EditError> {
    validate_comment(text)?;
    let text = text.trim();

    let bindings = doc.bindings();
    let mut binding = find_by_key(&bindings, key)
        .cloned()
        .ok_or_else(|| EditError::KeyNotFound(key.to_string()))?;

    let pattern = KeyPattern::new(key)?;
    let mut index = doc
        .lines()
        .iter()
        .position(|line| pattern.matches(line))
        .ok_or_else(|| EditError::KeyNotFound(key.to_string()))?;

    let line = doc.lines()[index].clone();
    // The binding line keeps its own terminator state
    let own_ending = if line.ends_with('\r') { "\r" } else { "" };

    let stripped_inline = match parse_line(&line).and_then(|parsed| parsed.comment_start) {
        Some(start) => {
            let body = line[..start].trim_end_matches(is_space);
            doc.replace(index, format!("{}{}", body, own_ending));
            true
        }
        None => false,
    };

    let comment_line = format!("# {}", text);

    let previous = index.checked_sub(1).map(|i| doc.lines()[i].clone());
    let placement = if let Some(previous) = previous.filter(|p| annotation(p).is_some()) {
        let ending = if previous.ends_with('\r') { "\r" } else { "" };
        doc.replace(index - 1, format!("{}{}", comment_line, ending));
        CommentPlacement::Replaced
    } else {
        doc.insert_line(index, &comment_line);
        index += 1;
        CommentPlacement::Inserted
    };

    binding.comment = text.to_string();
    binding.line = index + 1;
    binding.raw = doc.lines()[index].clone();

    Ok(CommentEdit {
        binding,
        placement,
        stripped_inline,
    })
}

/// Index just past the last content line
///
/// A file ending in a newline splits into a final empty line; new content
/// goes before it so the trailing newline is kept.
fn end_of_content(doc: &Document) -> usize {
    match doc.lines().last() {
        Some(last) if last.is_empty() => doc.len() - 1,
        _ => doc.len(),
    }
}
