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

//! CLI entry point for i3-bind
//!
//! Provides the command-line interface for adding, removing, listing,
//! searching and commenting keybindings, plus the fzf-driven interactive mode.

use clap::{Parser, Subcommand};
use colored::*;
use i3_bind::{
    config::{resolve_config_path, ConfigError, ConfigManager},
    core::{Binding, EditError},
    picker::{
        self,
        menu::{self, MenuChoice},
        FzfSelector, PickerError,
    },
};
use std::{io, process::ExitCode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "i3-bind")]
#[command(author, version, long_about = None)]
#[command(about = "A CLI/TUI utility to manage i3 window manager keybindings")]
struct Cli {
    /// Path to i3 config file (default: ~/.config/i3/config)
    #[arg(short, long, global = true, env = "I3_BIND_CONFIG")]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new keybinding
    #[command(after_help = "Examples:\n  i3-bind add mod4+Return exec alacritty\n  i3-bind add mod4+shift+q kill\n  i3-bind add '$mod+shift+k' exec keepassxc")]
    Add {
        /// Key combination, e.g. mod4+Return
        key: String,

        /// Action to run; remaining words are joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        action: Vec<String>,
    },

    /// Remove a keybinding
    Remove {
        /// Key combination to remove (case-insensitive)
        key: String,
    },

    /// List all keybindings, sorted by key
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Find keybindings by key, action or comment
    Find {
        /// Case-insensitive search term
        term: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add or update the comment for a keybinding
    #[command(after_help = "Examples:\n  i3-bind comment mod4+r \"restart i3\"\n  i3-bind comment '$mod+Return' \"run terminal\"")]
    Comment {
        /// Key combination to annotate
        key: String,

        /// Comment text
        comment: String,
    },

    /// Launch interactive mode (requires fzf)
    #[command(visible_aliases = ["tui", "menu"])]
    Interactive,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose, !cli.no_color);

    let manager = ConfigManager::new(resolve_config_path(cli.config.as_deref()));
    tracing::debug!(path = %manager.config_path().display(), "using config");

    match run(&manager, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the stderr logger; quiet (warn) unless asked otherwise
fn init_logging(verbose: bool, ansi: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(io::stderr)
        .init();
}

fn run(manager: &ConfigManager, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Add { key, action } => add_binding(manager, &key, &action.join(" "))?,
        Commands::Remove { key } => remove_binding(manager, &key)?,
        Commands::List { json } => list_bindings(manager, json)?,
        Commands::Find { term, json } => find_bindings(manager, &term, json)?,
        Commands::Comment { key, comment } => comment_binding(manager, &key, &comment)?,
        Commands::Interactive => interactive_mode(manager)?,
    }

    Ok(())
}

/// Prints an error in red plus any hint that helps the user recover
fn report_error(err: &anyhow::Error) {
    eprintln!("{}", format!("Error: {}", err).red().bold());

    if let Some(ConfigError::Edit(EditError::DuplicateKey { existing, .. })) =
        err.downcast_ref::<ConfigError>()
    {
        eprintln!(
            "Current binding: {} -> {}",
            existing.key.cyan().bold(),
            existing.action.green()
        );
        eprintln!("Use 'i3-bind remove' first or modify the config manually");
    }

    if let Some(PickerError::NotInstalled) = err.downcast_ref::<PickerError>() {
        eprintln!("Install it with: sudo pacman -S fzf # or your package manager");
    }
}

fn add_binding(manager: &ConfigManager, key: &str, action: &str) -> anyhow::Result<()> {
    let binding = manager.add_binding(key, action)?;

    println!(
        "{} {} -> {}",
        "✓ Added keybinding:".green().bold(),
        binding.key.cyan().bold(),
        binding.action.green()
    );

    Ok(())
}

fn remove_binding(manager: &ConfigManager, key: &str) -> anyhow::Result<()> {
    let removal = manager.remove_binding(key)?;

    println!(
        "{} {} -> {}",
        "✓ Removed keybinding:".green().bold(),
        removal.binding.key.cyan().bold(),
        removal.binding.action.green()
    );

    if removal.lines_removed > 1 {
        println!(
            "{}",
            format!("⚠ Removed {} lines bound to this key", removal.lines_removed).yellow()
        );
    }

    Ok(())
}

fn comment_binding(manager: &ConfigManager, key: &str, text: &str) -> anyhow::Result<()> {
    let edit = manager.comment_binding(key, text)?;

    println!(
        "{} {} {}",
        "✓ Added comment to keybinding:".green().bold(),
        edit.binding.key.cyan().bold(),
        format!("# {}", edit.binding.comment).yellow()
    );

    Ok(())
}

/// List all keybindings in the config
fn list_bindings(manager: &ConfigManager, json: bool) -> anyhow::Result<()> {
    let bindings = manager.list_bindings()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bindings)?);
        return Ok(());
    }

    if bindings.is_empty() {
        println!("No keybindings found in config file");
        return Ok(());
    }

    println!(
        "Found {} keybindings in {}:\n",
        bindings.len(),
        manager.config_path().display()
    );

    for binding in &bindings {
        println!("{}", format_binding(binding, false));
    }

    Ok(())
}

fn find_bindings(manager: &ConfigManager, term: &str, json: bool) -> anyhow::Result<()> {
    let matches = manager.find_bindings(term)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No keybindings found matching '{}'", term);
        return Ok(());
    }

    println!("Found {} keybinding(s) matching '{}':\n", matches.len(), term);

    for binding in &matches {
        println!("{}", format_binding(binding, true));
    }

    Ok(())
}

/// One display line: `  key -> action # comment (line N)`
fn format_binding(binding: &Binding, with_line: bool) -> String {
    let mut line = format!("  {} -> {}", binding.key.cyan().bold(), binding.action.green());

    if binding.has_comment() {
        line.push_str(&format!(" {}", format!("# {}", binding.comment).yellow()));
    }

    if with_line {
        line.push_str(&format!(" {}", format!("(line {})", binding.line).dimmed()));
    }

    line
}

fn interactive_mode(manager: &ConfigManager) -> anyhow::Result<()> {
    let selector = FzfSelector::locate()?;

    let bindings = manager.load()?.bindings();
    if bindings.is_empty() {
        println!("No keybindings found in config file");
        return Ok(());
    }

    let Some(selected) = picker::choose_binding(&selector, &bindings)? else {
        return Ok(());
    };

    println!("\nSelected keybinding: {}", selected.key.cyan().bold());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match menu::prompt_choice(&mut input, &mut out)? {
        MenuChoice::Remove => remove_binding(manager, &selected.key)?,
        MenuChoice::Comment => {
            if let Some(text) = menu::prompt_text(&mut input, &mut out, "Enter comment: ")? {
                comment_binding(manager, &selected.key, &text)?;
            }
        }
        MenuChoice::Details => print_details(&selected),
        MenuChoice::Cancel => println!("Cancelled"),
        MenuChoice::Invalid(_) => println!("Invalid choice"),
    }

    Ok(())
}

fn print_details(binding: &Binding) {
    println!("\nKeybinding Details:");
    println!("  Key: {}", binding.key.cyan().bold());
    println!("  Action: {}", binding.action.green());
    if binding.has_comment() {
        println!("  Comment: {}", binding.comment.yellow());
    }
    println!("  Line: {}", binding.line);
    println!("  Raw: {}", binding.raw.trim_end_matches('\r'));
}
