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

//! i3 Keybinding Manager
//!
//! Add, remove, search and annotate `bindsym` declarations in an i3 config
//! file without disturbing anything else in it.
//!
//! # Features
//!
//! - **Structured view:** Recovers key, action and comment from loose text
//! - **CRUD Operations:** Add, remove and comment keybindings in place
//! - **Duplicate Protection:** Keys are unique (case-insensitively) on add
//! - **Automatic Backups:** `<config>.backup` refreshed before every write
//! - **Atomic Operations:** Safe file writes, the original survives failures
//! - **Interactive Mode:** fzf-driven picker with a follow-up action menu
//!
//! # Architecture
//!
//! - **`core`:** Business logic (types, document, parser, editor, queries)
//! - **`config`:** File operations (reading, backups, atomic writes)
//! - **`picker`:** fzf driver and interactive menu
//!
//! # Examples
//!
//! ## Parsing a config file
//!
//! ```no_run
//! use i3_bind::core::Document;
//!
//! let content = std::fs::read_to_string("/tmp/i3-config")?;
//! let bindings = Document::from_content(&content).bindings();
//! println!("Found {} keybindings", bindings.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Editing through the manager
//!
//! ```no_run
//! use i3_bind::config::ConfigManager;
//!
//! let manager = ConfigManager::new("/home/user/.config/i3/config".into());
//! manager.add_binding("mod4+Return", "exec alacritty")?;
//! manager.comment_binding("mod4+Return", "open terminal")?;
//! # Ok::<(), i3_bind::config::ConfigError>(())
//! ```

pub mod config;
pub mod core;
pub mod picker;

// Re-export commonly used types for convenience
pub use core::{Binding, Document};
