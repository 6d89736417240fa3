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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the data structures and algorithms for keybinding
//! management, including:
//! - Type definitions for recovered bindings
//! - The line-oriented document model
//! - `bindsym` parsing with comment inheritance
//! - Line edits for add, remove and comment
//! - Lookup, search and sorting
//!
//! Nothing here touches the filesystem, so all of it is unit-testable on
//! in-memory documents.

pub mod document;
pub mod editor;
pub mod parser;
pub mod query;
pub mod types;

pub use document::Document;
pub use editor::{CommentEdit, CommentPlacement, EditError, KeyPattern, Removal};
pub use types::*;

#[cfg(test)]
mod tests;
