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

//! In-memory view of a config file as ordered lines
//!
//! The document is the only persisted state. Splitting keeps every byte: a
//! trailing newline yields an empty last line and `\r` stays attached to its
//! line, so `from_content(s).to_content() == s` for any input.

use crate::core::{parser::parse_bindings, types::Binding};

/// A config file split on `\n`
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits file content into lines without dropping trailing structure
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }

    /// Builds a document from already-split lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Joins the lines back with `\n`
    pub fn to_content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `"\r"` when the file uses CRLF line endings, otherwise `""`
    ///
    /// Lines written by the editor carry this suffix so CRLF files stay
    /// consistent.
    pub fn line_ending(&self) -> &'static str {
        let terminated = self.lines.len().saturating_sub(1);
        if self.lines[..terminated].iter().any(|line| line.ends_with('\r')) {
            "\r"
        } else {
            ""
        }
    }

    /// Parses the current lines into bindings (never cached)
    pub fn bindings(&self) -> Vec<Binding> {
        parse_bindings(&self.lines)
    }

    /// Inserts `text` as a new line at `index`, terminated like its neighbours
    ///
    /// Inserting past an unterminated last line terminates that line instead,
    /// so the new line takes over as the file's unterminated tail.
    pub(crate) fn insert_line(&mut self, index: usize, text: &str) {
        let ending = self.line_ending();
        if index >= self.lines.len() {
            if let Some(last) = self.lines.last_mut() {
                last.push_str(ending);
            }
            self.lines.push(text.to_string());
        } else {
            self.lines.insert(index, format!("{}{}", text, ending));
        }
    }

    pub(crate) fn replace(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    /// Removes every line the predicate accepts, returning how many went
    pub(crate) fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.lines.len();
        self.lines.retain(|line| !predicate(line));
        before - self.lines.len()
    }
}
