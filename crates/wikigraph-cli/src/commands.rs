//! Command parsing and execution.

use crate::config::CliConfig;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use wikigraph_core::{check_adjacency, codec, Page, Section, Thing};

/// Exit code for `check` when the graph is inconsistent.
pub const EXIT_INCONSISTENT: i32 = 2;

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Normalize a page file
    Page(PathBuf),
    /// Normalize a section file
    Section(PathBuf),
    /// Print a fresh descriptor, optionally with a custom type tag
    Thing(Option<String>),
    /// Check edge agreement between a page and its sections
    Check {
        /// Page file
        page: PathBuf,
        /// Section files
        sections: Vec<PathBuf>,
    },
    /// Print usage
    Help,
}

/// Invalid command-line usage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// No subcommand given
    #[error("missing command")]
    MissingCommand,
    /// Subcommand is not recognized
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Subcommand lacks a required argument
    #[error("usage: wikigraph {0}")]
    MissingArgument(&'static str),
}

impl Command {
    /// Parse arguments (without the program name).
    ///
    /// # Errors
    ///
    /// Returns error if the command is unknown or incomplete.
    pub fn parse(args: &[String]) -> Result<Self, UsageError> {
        let (name, rest) = args.split_first().ok_or(UsageError::MissingCommand)?;

        match name.as_str() {
            "page" => rest
                .first()
                .map(|path| Self::Page(PathBuf::from(path)))
                .ok_or(UsageError::MissingArgument("page <file>")),
            "section" => rest
                .first()
                .map(|path| Self::Section(PathBuf::from(path)))
                .ok_or(UsageError::MissingArgument("section <file>")),
            "thing" => Ok(Self::Thing(rest.first().cloned())),
            "check" => match rest.split_first() {
                Some((page, sections)) => Ok(Self::Check {
                    page: PathBuf::from(page),
                    sections: sections.iter().map(PathBuf::from).collect(),
                }),
                None => Err(UsageError::MissingArgument(
                    "check <page-file> [section-file]...",
                )),
            },
            "help" | "--help" | "-h" => Ok(Self::Help),
            other => Err(UsageError::UnknownCommand(other.to_string())),
        }
    }
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Text for stdout
    pub text: String,
    /// Process exit code
    pub exit_code: i32,
}

impl Output {
    fn ok(text: String) -> Self {
        Self { text, exit_code: 0 }
    }
}

/// Run a command.
///
/// # Errors
///
/// Returns error if an input file cannot be read or decoded.
pub fn execute(command: &Command, config: &CliConfig) -> Result<Output> {
    match command {
        Command::Page(path) => {
            let page: Page = read_json(path)?;
            tracing::info!(id = %page.id, parts = page.has_part.len(), "Decoded page");
            Ok(Output::ok(render(&page, config)?))
        }
        Command::Section(path) => {
            let section: Section = read_json(path)?;
            tracing::info!(
                id = %section.id,
                parents = section.is_part_of.len(),
                "Decoded section"
            );
            Ok(Output::ok(render(&section, config)?))
        }
        Command::Thing(type_name) => {
            let thing = match type_name {
                Some(type_name) => Thing::with_type(type_name.as_str()),
                None => Thing::new(),
            };
            Ok(Output::ok(render(&thing, config)?))
        }
        Command::Check { page, sections } => {
            let page: Page = read_json(page)?;
            let sections = sections
                .iter()
                .map(|path| read_json::<Section>(path))
                .collect::<Result<Vec<_>>>()?;

            let found = check_adjacency(std::slice::from_ref(&page), &sections);
            if found.is_empty() {
                return Ok(Output::ok(format!(
                    "ok: {} consistent with {} section(s)",
                    page.id,
                    sections.len()
                )));
            }

            tracing::warn!(page = %page.id, count = found.len(), "Inconsistent adjacency");
            let text = found
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            Ok(Output {
                text,
                exit_code: EXIT_INCONSISTENT,
            })
        }
        Command::Help => Ok(Output::ok(String::new())),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    codec::from_json_slice(&bytes).with_context(|| format!("Failed to decode {}", path.display()))
}

fn render<T: Serialize>(value: &T, config: &CliConfig) -> Result<String> {
    let text = if config.pretty {
        codec::to_json_pretty(value)?
    } else {
        codec::to_json(value)?
    };
    Ok(text)
}
