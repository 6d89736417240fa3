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

use crate::core::Document;

#[test]
fn test_split_keeps_trailing_empty_line() {
    let doc = Document::from_content("a\nb\n");
    assert_eq!(doc.lines(), &["a", "b", ""]);
    assert_eq!(doc.len(), 3);
}

#[test]
fn test_round_trip_is_byte_exact() {
    for content in ["", "\n", "a", "a\n\n\n", "x\r\ny\r\n", "  indented\t\n# c:\n"] {
        assert_eq!(
            Document::from_content(content).to_content(),
            content,
            "Content should round-trip: {:?}",
            content
        );
    }
}

#[test]
fn test_line_ending_detection() {
    assert_eq!(Document::from_content("a\r\nb\r\n").line_ending(), "\r");
    assert_eq!(Document::from_content("a\nb\n").line_ending(), "");
    // A lone trailing '\r' on an unterminated last line does not count
    assert_eq!(Document::from_content("a\nb\r").line_ending(), "");
    assert_eq!(Document::default().line_ending(), "");
}

#[test]
fn test_bindings_are_recomputed() {
    let doc = Document::from_lines(["bindsym mod4+q kill", "bindsym mod4+d exec dmenu_run"]);
    assert_eq!(doc.bindings().len(), 2);
    assert_eq!(doc.bindings()[1].line, 2);
}

#[test]
fn test_insert_line_terminators() {
    let mut doc = Document::from_content("a\r\nb\r\n");
    doc.insert_line(1, "new");
    assert_eq!(doc.to_content(), "a\r\nnew\r\nb\r\n");

    // Appending past an unterminated tail terminates the old tail
    let mut doc = Document::from_content("a\r\nb");
    doc.insert_line(2, "c");
    assert_eq!(doc.to_content(), "a\r\nb\r\nc");

    let mut doc = Document::from_content("a\nb");
    doc.insert_line(2, "c");
    assert_eq!(doc.to_content(), "a\nb\nc");
}
