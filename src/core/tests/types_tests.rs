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

use crate::core::types::{keys_equal, Binding};

#[test]
fn test_binding_new() {
    let binding = Binding::new("mod4+Return", "  exec alacritty ");

    assert_eq!(binding.action, "exec alacritty", "Action should be trimmed");
    assert_eq!(binding.comment, "");
    assert_eq!(binding.line, 0);
    assert_eq!(binding.raw, "bindsym mod4+Return exec alacritty");
}

#[test]
fn test_binding_to_line() {
    let mut binding = Binding::new("mod4+q", "kill");
    binding.comment = "close window".to_string();

    // Comments are never rendered inline
    assert_eq!(binding.to_line(), "bindsym mod4+q kill");
}

#[test]
fn test_binding_display() {
    let mut binding = Binding::new("mod4+q", "kill");
    assert_eq!(format!("{}", binding), "mod4+q -> kill");

    binding.comment = "close window".to_string();
    assert_eq!(format!("{}", binding), "mod4+q -> kill # close window");
}

#[test]
fn test_keys_equal_ignores_case() {
    assert!(keys_equal("mod4+Q", "MOD4+q"));
    assert!(keys_equal("$mod+Return", "$MOD+return"));
    assert!(!keys_equal("mod4+q", "mod4+qq"));

    let binding = Binding::new("Mod4+Shift+e", "exit");
    assert!(binding.matches_key("mod4+shift+E"));
}

#[test]
fn test_binding_serializes() {
    let binding = Binding::new("mod4+q", "kill");
    let json = serde_json::to_value(&binding).unwrap();

    assert_eq!(json["key"], "mod4+q");
    assert_eq!(json["action"], "kill");
    assert_eq!(json["comment"], "");
}
