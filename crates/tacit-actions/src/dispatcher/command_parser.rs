//! Structured command-line parsing.
//!
//! Converts the command buffer body (the text after the `:` prefix) into a
//! `ParsedCommand`. Pure classification, no side effects; execution and
//! error surfacing live in the `command` module.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Quit { force: bool },
    Write { path: Option<PathBuf> },
    WriteQuit { path: Option<PathBuf> },
    /// `:e <path>`; a missing path is kept here so the executor can surface
    /// the "no file name" error rather than the generic unknown-command one.
    Edit { path: Option<PathBuf> },
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(body: &str) -> ParsedCommand {
        let s = body.trim();
        let mut parts = s.split_whitespace();
        let head = parts.next().unwrap_or("");
        let arg = parts.next();
        if head.is_empty() || parts.next().is_some() {
            return ParsedCommand::Unknown(s.to_string());
        }
        match head {
            "q" if arg.is_none() => ParsedCommand::Quit { force: false },
            "q!" if arg.is_none() => ParsedCommand::Quit { force: true },
            "w" => ParsedCommand::Write {
                path: arg.map(PathBuf::from),
            },
            "wq" => ParsedCommand::WriteQuit {
                path: arg.map(PathBuf::from),
            },
            "e" => ParsedCommand::Edit {
                path: arg.map(PathBuf::from),
            },
            _ => ParsedCommand::Unknown(s.to_string()),
        }
    }
}
