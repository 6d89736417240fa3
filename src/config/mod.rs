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

//! Configuration file management with backups and atomic writes.
//!
//! This module owns every filesystem touch in i3-bind. Key features:
//!
//! - **Whole-file reads**: Each operation re-reads and re-parses the config;
//!   there is no cached index to go stale
//! - **Backups**: Every write first copies the on-disk content to
//!   `<config>.backup`
//! - **Atomic writes**: Temp-file-then-rename, so a failed write leaves the
//!   original untouched
//! - **Symlink warnings**: Logged, but symlinked configs are allowed and the
//!   link itself is preserved
//!
//! # Example
//!
//! ```no_run
//! use i3_bind::config::ConfigManager;
//!
//! let manager = ConfigManager::new("/home/user/.config/i3/config".into());
//!
//! let added = manager.add_binding("mod4+q", "kill")?;
//! println!("Added {} on line {}", added.key, added.line);
//! # Ok::<(), i3_bind::config::ConfigError>(())
//! ```

mod error;

pub use error::ConfigError;

use atomic_write_file::AtomicWriteFile;
use std::{
    ffi::OsString,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::core::{
    editor::{self, CommentEdit, Removal},
    query, Binding, Document,
};

/// Suffix appended to the config path for the pre-write snapshot
pub const BACKUP_SUFFIX: &str = ".backup";

/// Config location relative to the XDG config directory
const I3_CONFIG_RELATIVE: &str = "i3/config";

/// Resolves the config file location
///
/// Uses `explicit` when given (from `--config` or `I3_BIND_CONFIG`), then
/// `$XDG_CONFIG_HOME/i3/config`, then `~/.config/i3/config`. A leading `~`
/// is expanded in every case.
pub fn resolve_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return expand_path(path);
    }

    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => expand_path(&xdg).join(I3_CONFIG_RELATIVE),
        _ => expand_path("~/.config").join(I3_CONFIG_RELATIVE),
    }
}

/// Expands a leading tilde in `path`
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Manages the i3 configuration file.
///
/// The ConfigManager is the explicit context passed to every operation: it
/// knows where the config lives and wraps each edit in load, edit, backup,
/// write. No operation keeps state between calls.
#[derive(Clone, Debug)]
pub struct ConfigManager {
    /// Path to the i3 configuration file.
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the given config file.
    ///
    /// The file is not touched until the first operation, so a missing
    /// config surfaces as `ConfigError::NotFound` from `load()`.
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path to the managed config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Sibling backup path: `<config>.backup`.
    pub fn backup_path(&self) -> PathBuf {
        let mut path = OsString::from(self.config_path.as_os_str());
        path.push(BACKUP_SUFFIX);
        PathBuf::from(path)
    }

    /// Reads the config file into a line-oriented document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist.
    /// Returns `ConfigError::ReadFailed` for any other read error, including
    /// content that is not valid UTF-8.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use i3_bind::config::ConfigManager;
    /// # let manager = ConfigManager::new("/home/user/.config/i3/config".into());
    /// let doc = manager.load()?;
    /// println!("Config has {} lines", doc.len());
    /// # Ok::<(), i3_bind::config::ConfigError>(())
    /// ```
    pub fn load(&self) -> Result<Document, ConfigError> {
        if self.config_path.read_link().is_ok() {
            tracing::warn!(
                path = %self.config_path.display(),
                "config file is a symlink; edits are written to its target"
            );
        }

        let content = fs::read_to_string(&self.config_path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::NotFound(self.config_path.clone())
            } else {
                ConfigError::ReadFailed {
                    path: self.config_path.clone(),
                    source,
                }
            }
        })?;

        let doc = Document::from_content(&content);
        tracing::debug!(
            path = %self.config_path.display(),
            lines = doc.len(),
            "loaded config"
        );

        Ok(doc)
    }

    /// Writes the document back, backing up the current file first.
    ///
    /// The on-disk content (not the new content) is copied to
    /// `backup_path()` before anything else happens. If that copy fails the
    /// config is not written. The write itself is atomic.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the backup that was written
    /// * `Err(ConfigError::BackupFailed)` - Backup failed, config untouched
    /// * `Err(ConfigError::WriteFailed)` - Write failed, backup available
    pub fn save(&self, doc: &Document) -> Result<PathBuf, ConfigError> {
        let backup_path = self.backup_path();

        fs::copy(&self.config_path, &backup_path).map_err(|e| {
            ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e))
        })?;

        // Write through a symlink instead of replacing it
        let target = fs::canonicalize(&self.config_path)
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to resolve path: {}", e)))?;

        let mut file = AtomicWriteFile::options().open(&target).map_err(|e| {
            ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e))
        })?;

        file.write_all(doc.to_content().as_bytes())
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

        file.commit().map_err(|e| {
            ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e))
        })?;

        tracing::info!(
            path = %self.config_path.display(),
            backup = %backup_path.display(),
            "config written"
        );

        Ok(backup_path)
    }

    /// All bindings, sorted by key.
    pub fn list_bindings(&self) -> Result<Vec<Binding>, ConfigError> {
        let bindings = self.load()?.bindings();
        tracing::debug!(count = bindings.len(), "parsed bindings");

        Ok(query::sort_by_key(bindings))
    }

    /// Bindings whose key, action or comment contains `term`, in file order.
    pub fn find_bindings(&self, term: &str) -> Result<Vec<Binding>, ConfigError> {
        let bindings = self.load()?.bindings();

        Ok(query::search(&bindings, term))
    }

    /// The binding for `key` (ignoring case), if any.
    pub fn get_binding(&self, key: &str) -> Result<Option<Binding>, ConfigError> {
        let bindings = self.load()?.bindings();

        Ok(query::find_by_key(&bindings, key).cloned())
    }

    /// Adds `bindsym <key> <action>` and saves.
    ///
    /// # Errors
    ///
    /// `ConfigError::Edit(EditError::DuplicateKey)` if the key is taken; the
    /// file is left byte-identical.
    pub fn add_binding(&self, key: &str, action: &str) -> Result<Binding, ConfigError> {
        let mut doc = self.load()?;
        let binding = editor::add_binding(&mut doc, key, action)?;
        self.save(&doc)?;

        tracing::info!(key = %binding.key, line = binding.line, "binding added");
        Ok(binding)
    }

    /// Removes every line binding `key` and saves.
    pub fn remove_binding(&self, key: &str) -> Result<Removal, ConfigError> {
        let mut doc = self.load()?;
        let removal = editor::remove_binding(&mut doc, key)?;
        self.save(&doc)?;

        tracing::info!(
            key = %removal.binding.key,
            lines = removal.lines_removed,
            "binding removed"
        );
        Ok(removal)
    }

    /// Sets the comment line above the binding for `key` and saves.
    pub fn comment_binding(&self, key: &str, text: &str) -> Result<CommentEdit, ConfigError> {
        let mut doc = self.load()?;
        let edit = editor::set_comment(&mut doc, key, text)?;
        self.save(&doc)?;

        tracing::info!(
            key = %edit.binding.key,
            placement = ?edit.placement,
            "comment updated"
        );
        Ok(edit)
    }
}

#[cfg(test)]
mod tests;
