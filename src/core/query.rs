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

//! Read-only queries over parsed bindings
//!
//! All comparisons on keys are case-insensitive for identity; ordering uses
//! the key exactly as written so `list` output is deterministic.

use crate::core::types::Binding;

/// Sorts bindings by key, ordinal ascending
///
/// The sort is stable, so bindings with equal keys keep file order.
pub fn sort_by_key(mut bindings: Vec<Binding>) -> Vec<Binding> {
    bindings.sort_by(|a, b| a.key.cmp(&b.key));
    bindings
}

/// Finds the first binding whose key matches ignoring case
pub fn find_by_key<'a>(bindings: &'a [Binding], key: &str) -> Option<&'a Binding> {
    bindings.iter().find(|binding| binding.matches_key(key))
}

/// Filters bindings by search term
///
/// Searches in:
/// - Key token (e.g., "mod4+shift")
/// - Action (e.g., "exec firefox")
/// - Comment (e.g., "open browser")
///
/// Search is case-insensitive and results keep file order. An empty term
/// matches every binding.
pub fn search(bindings: &[Binding], term: &str) -> Vec<Binding> {
    let term_lower = term.to_lowercase();

    bindings
        .iter()
        .filter(|binding| {
            binding.key.to_lowercase().contains(&term_lower)
                || binding.action.to_lowercase().contains(&term_lower)
                || binding.comment.to_lowercase().contains(&term_lower)
        })
        .cloned()
        .collect()
}
