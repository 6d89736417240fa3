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

//! Follow-up menu shown after a binding is picked

use std::io::{self, BufRead, Write};

/// Menu entries in display order
pub const MENU_ENTRIES: [&str; 4] = [
    "Remove this keybinding",
    "Add/Update comment",
    "Show details",
    "Cancel",
];

/// What the user chose to do with the selected binding
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MenuChoice {
    Remove,
    Comment,
    Details,
    Cancel,
    /// Anything that is not 1-4
    Invalid(String),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::Remove,
            "2" => MenuChoice::Comment,
            "3" => MenuChoice::Details,
            "4" => MenuChoice::Cancel,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

/// Writes the menu and reads the user's choice
pub fn prompt_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<MenuChoice> {
    writeln!(out, "\nWhat would you like to do?")?;
    for (idx, entry) in MENU_ENTRIES.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, entry)?;
    }
    write!(out, "\nEnter your choice (1-{}): ", MENU_ENTRIES.len())?;
    out.flush()?;

    Ok(MenuChoice::parse(&read_trimmed_line(input)?))
}

/// Prompts for free text, returning `None` when the answer is blank
pub fn prompt_text<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let line = read_trimmed_line(input)?;
    Ok(if line.is_empty() { None } else { Some(line) })
}

/// Reads one line; end of input reads as an empty line
fn read_trimmed_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1\n"), MenuChoice::Remove);
        assert_eq!(MenuChoice::parse(" 2 "), MenuChoice::Comment);
        assert_eq!(MenuChoice::parse("3"), MenuChoice::Details);
        assert_eq!(MenuChoice::parse("4"), MenuChoice::Cancel);
        assert_eq!(MenuChoice::parse("9"), MenuChoice::Invalid("9".to_string()));
    }

    #[test]
    fn test_prompt_choice_prints_menu() {
        let mut input = Cursor::new("3\n");
        let mut out = Vec::new();

        let choice = prompt_choice(&mut input, &mut out).unwrap();
        assert_eq!(choice, MenuChoice::Details);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("1. Remove this keybinding"));
        assert!(printed.contains("4. Cancel"));
    }

    #[test]
    fn test_prompt_choice_at_eof_is_invalid() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let choice = prompt_choice(&mut input, &mut out).unwrap();
        assert_eq!(choice, MenuChoice::Invalid(String::new()));
    }

    #[test]
    fn test_prompt_text_blank_is_none() {
        let mut out = Vec::new();

        let mut blank = Cursor::new("   \n");
        assert_eq!(prompt_text(&mut blank, &mut out, "Enter comment: ").unwrap(), None);

        let mut text = Cursor::new("restart i3\n");
        assert_eq!(
            prompt_text(&mut text, &mut out, "Enter comment: ").unwrap(),
            Some("restart i3".to_string())
        );
    }
}
