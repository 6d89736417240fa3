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

//! Fuzzy-picker driver for interactive mode
//!
//! # Architecture
//!
//! - **Records**: Each binding becomes one tab-separated line for the picker
//! - **Selector**: Trait seam around the picker process (`FzfSelector` in
//!   production, scripted selectors in tests)
//! - **Menu**: Follow-up action prompt after a binding is chosen
//!
//! # Record layout
//!
//! ```text
//! key \t action \t comment \t key* \t action* \t comment*
//! ```
//!
//! Fields 1-2 are displayed. Starred fields are escaped for the shell
//! preview command, which fzf interpolates inside double quotes.

pub mod menu;

use std::{
    io::{ErrorKind, Write},
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
};
use thiserror::Error;

use crate::core::{query::find_by_key, Binding};

/// fzf exit code when the user aborts (Ctrl+C / Esc)
pub const EXIT_INTERRUPTED: i32 = 130;

/// fzf exit code when nothing matched the query
pub const EXIT_NO_MATCH: i32 = 1;

#[cfg(unix)]
const SIGINT: i32 = 2;

const HEADER: &str = "i3-bind: Select a keybinding to manage (Ctrl+C to exit)";
const PREVIEW: &str =
    r#"echo "Key: {4}"; echo "Action: {5}"; if [ -n "{6}" ]; then echo "Comment: {6}"; fi"#;

/// Errors from running the picker
#[derive(Debug, Error)]
pub enum PickerError {
    /// fzf is not on PATH
    #[error("Interactive mode requires `fzf` to be installed")]
    NotInstalled,

    /// The picker process could not be started
    #[error("Failed to start fzf: {0}")]
    Spawn(#[source] std::io::Error),

    /// Talking to the picker process failed
    #[error("fzf I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The picker exited with an unexpected status
    #[error("fzf exited with status {0:?}")]
    Failed(Option<i32>),
}

/// Something that lets the user pick one line out of a table
pub trait Selector {
    /// Presents `input` (newline-delimited records) and returns the chosen
    /// record, or `None` if the user made no selection.
    fn select(&self, input: &str) -> Result<Option<String>, PickerError>;
}

/// Runs `fzf` as a blocking subprocess
#[derive(Clone, Debug)]
pub struct FzfSelector {
    program: PathBuf,
}

impl FzfSelector {
    /// Locates `fzf` on PATH
    pub fn locate() -> Result<Self, PickerError> {
        let program = which::which("fzf").map_err(|_| PickerError::NotInstalled)?;
        tracing::debug!(program = %program.display(), "found fzf");

        Ok(Self { program })
    }
}

impl Selector for FzfSelector {
    fn select(&self, input: &str) -> Result<Option<String>, PickerError> {
        let mut child = Command::new(&self.program)
            .arg(format!("--header={}", HEADER))
            .arg("--with-nth=1,2")
            .arg("--delimiter=\t")
            .arg("--preview")
            .arg(PREVIEW)
            .arg("--preview-window=up:3")
            .arg("--bind=enter:accept")
            .arg("--height=40%")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(PickerError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            // fzf may exit before reading everything if the user aborts early
            match stdin.write_all(input.as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
                _ => {}
            }
        }

        let output = child.wait_with_output()?;

        if is_no_selection(output.status) {
            tracing::debug!(status = ?output.status, "picker closed without selection");
            return Ok(None);
        }

        if !output.status.success() {
            tracing::warn!(status = ?output.status, "picker failed");
            return Err(PickerError::Failed(output.status.code()));
        }

        let selected = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if selected.is_empty() {
            None
        } else {
            Some(selected)
        })
    }
}

/// Whether a picker exit status means "the user chose nothing"
///
/// Covers an interrupt (exit 130 or death by SIGINT) and an empty match.
pub fn is_no_selection(status: ExitStatus) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if status.signal() == Some(SIGINT) {
            return true;
        }
    }

    matches!(status.code(), Some(EXIT_INTERRUPTED) | Some(EXIT_NO_MATCH))
}

/// Escapes text for interpolation inside a double-quoted shell string
///
/// Backslash, double quote and dollar sign are backslash-escaped.
pub fn escape_preview(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Replaces record separators inside a field with spaces
fn flatten_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

/// One picker record for a binding (see module docs for the layout)
pub fn picker_record(binding: &Binding) -> String {
    let key = flatten_field(&binding.key);
    let action = flatten_field(&binding.action);
    let comment = flatten_field(&binding.comment);

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        key,
        action,
        comment,
        escape_preview(&key),
        escape_preview(&action),
        escape_preview(&comment),
    )
}

/// Picker input for all bindings, one record per line
pub fn picker_input(bindings: &[Binding]) -> String {
    bindings
        .iter()
        .map(picker_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Key column of a selected record
pub fn selected_key(record: &str) -> Option<&str> {
    record
        .split('\t')
        .next()
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

/// Lets the user pick a binding with `selector`
///
/// # Returns
///
/// * `Ok(Some(binding))` - The chosen binding
/// * `Ok(None)` - No bindings, or the user cancelled
/// * `Err(PickerError)` - The picker itself failed
pub fn choose_binding<S: Selector + ?Sized>(
    selector: &S,
    bindings: &[Binding],
) -> Result<Option<Binding>, PickerError> {
    if bindings.is_empty() {
        return Ok(None);
    }

    let Some(record) = selector.select(&picker_input(bindings))? else {
        return Ok(None);
    };

    Ok(selected_key(&record).and_then(|key| find_by_key(bindings, key).cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Selector that records its input and returns a fixed answer
    struct ScriptedSelector {
        answer: Option<String>,
        seen: RefCell<String>,
    }

    impl ScriptedSelector {
        fn new(answer: Option<&str>) -> Self {
            Self {
                answer: answer.map(str::to_string),
                seen: RefCell::new(String::new()),
            }
        }
    }

    impl Selector for ScriptedSelector {
        fn select(&self, input: &str) -> Result<Option<String>, PickerError> {
            *self.seen.borrow_mut() = input.to_string();
            Ok(self.answer.clone())
        }
    }

    fn binding(key: &str, action: &str, comment: &str) -> Binding {
        let mut binding = Binding::new(key, action);
        binding.comment = comment.to_string();
        binding
    }

    #[test]
    fn test_escape_preview() {
        assert_eq!(escape_preview(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_preview("$mod+Return"), r"\$mod+Return");
        assert_eq!(escape_preview(r"a\b"), r"a\\b");
        assert_eq!(escape_preview("plain"), "plain");
    }

    #[test]
    fn test_picker_record_layout() {
        let record = picker_record(&binding("$mod+d", "exec \"dmenu\"", "launcher"));
        let fields: Vec<&str> = record.split('\t').collect();

        assert_eq!(fields.len(), 6, "Record should have six fields");
        assert_eq!(fields[0], "$mod+d");
        assert_eq!(fields[1], "exec \"dmenu\"");
        assert_eq!(fields[2], "launcher");
        assert_eq!(fields[3], r"\$mod+d");
        assert_eq!(fields[4], r#"exec \"dmenu\""#);
        assert_eq!(fields[5], "launcher");
    }

    #[test]
    fn test_picker_record_flattens_tabs() {
        let record = picker_record(&binding("mod4+x", "exec\tfoo", ""));
        assert_eq!(record.split('\t').count(), 6, "Tabs in fields must not add columns");
    }

    #[test]
    fn test_selected_key() {
        assert_eq!(selected_key("mod4+d\texec dmenu\t\tmod4+d"), Some("mod4+d"));
        assert_eq!(selected_key(""), None);
    }

    #[test]
    fn test_choose_binding_returns_selection() {
        let bindings = vec![
            binding("mod4+d", "exec dmenu_run", ""),
            binding("mod4+Return", "exec alacritty", "terminal"),
        ];
        let selector = ScriptedSelector::new(Some("mod4+Return\texec alacritty\tterminal"));

        let chosen = choose_binding(&selector, &bindings).unwrap();
        assert_eq!(chosen.map(|b| b.action), Some("exec alacritty".to_string()));

        let seen = selector.seen.borrow();
        assert_eq!(seen.lines().count(), 2, "One record per binding");
    }

    #[test]
    fn test_choose_binding_cancelled() {
        let bindings = vec![binding("mod4+d", "exec dmenu_run", "")];
        let selector = ScriptedSelector::new(None);

        assert!(choose_binding(&selector, &bindings).unwrap().is_none());
    }

    #[test]
    fn test_choose_binding_skips_picker_when_empty() {
        let selector = ScriptedSelector::new(Some("mod4+d"));

        assert!(choose_binding(&selector, &[]).unwrap().is_none());
        assert!(selector.seen.borrow().is_empty(), "Picker should not run");
    }

    #[cfg(unix)]
    #[test]
    fn test_interrupt_is_no_selection() {
        use std::os::unix::process::ExitStatusExt;

        // Raw wait status: exit code in the high byte
        assert!(is_no_selection(ExitStatus::from_raw(130 << 8)));
        assert!(is_no_selection(ExitStatus::from_raw(1 << 8)));
        assert!(is_no_selection(ExitStatus::from_raw(SIGINT)));
        assert!(!is_no_selection(ExitStatus::from_raw(0)));
        assert!(!is_no_selection(ExitStatus::from_raw(2 << 8)));
    }
}
