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

//! src/core/types.rs
//!
//! Core type definitions for keybinding management
//!
//! This module defines the record recovered from an i3 config line:
//! - `Binding`: a `bindsym` declaration with its key, action and annotation
//!
//! Bindings are a derived view of the config file. They are rebuilt on every
//! parse and never written back directly; edits go through line operations in
//! `core::editor`.

use serde::Serialize;
use std::fmt;

/// Keyword that introduces a keybinding declaration in i3 configs.
pub const BINDSYM: &str = "bindsym";

/// A single keybinding recovered from the config file
///
/// Represents one `bindsym` line:
/// - The key token that triggers it (e.g. `mod4+Return`)
/// - The action text i3 runs (e.g. `exec alacritty`)
/// - An optional annotation, either inline or from the line above
///
/// # Example
/// ```ignore
/// let binding = Binding::new("mod4+Return", "exec alacritty");
/// // Renders as: bindsym mod4+Return exec alacritty
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Binding {
    /// Key token as written in the file (case preserved for display)
    pub key: String,

    /// Command text, whitespace-trimmed
    pub action: String,

    /// Annotation text; empty string means no comment
    pub comment: String,

    /// 1-based line number at parse time (display only)
    pub line: usize,

    /// The originating line, verbatim
    pub raw: String,
}

impl Binding {
    /// Create a binding that does not come from a file yet
    ///
    /// `line` is 0 and `raw` holds the rendered line.
    pub fn new(key: &str, action: &str) -> Self {
        let key = key.to_string();
        let action = action.trim().to_string();
        let raw = format!("{} {} {}", BINDSYM, key, action);

        Self {
            key,
            action,
            comment: String::new(),
            line: 0,
            raw,
        }
    }

    /// Renders the binding as a config line: `bindsym <key> <action>`
    ///
    /// Comments are never rendered inline; they live on the line above.
    pub fn to_line(&self) -> String {
        format!("{} {} {}", BINDSYM, self.key, self.action)
    }

    /// Whether the binding carries an annotation
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    /// Case-insensitive key identity check
    pub fn matches_key(&self, key: &str) -> bool {
        keys_equal(&self.key, key)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.key, self.action)?;

        if self.has_comment() {
            write!(f, " # {}", self.comment)?;
        }

        Ok(())
    }
}

/// Compares two key tokens the way i3-bind identifies bindings
///
/// Keys are equal when they match ignoring case, so `mod4+Q` and `Mod4+q`
/// refer to the same binding.
pub fn keys_equal(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
