//! Parsing of the shell's one-line commands.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Find(String),
    Page(usize),
    Next,
    Previous,
    New,
    Show(usize),
    Edit(usize),
    Remove(usize),
    Map(usize),
    Alerts,
    Dismiss(usize),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{command}' needs a number")]
    MissingNumber { command: &'static str },
    #[error("'{value}' is not a positive number")]
    BadNumber { value: String },
}

pub const HELP: &str = "\
commands:
  list | ls            show the current page
  find <text>          filter by name (regular expression); 'find' alone clears
  page <n>             jump to page n
  next | prev          move one page
  new                  add an address
  show <row>           print every field of a row
  edit <row>           edit a row of the current page
  rm <row>             delete a row of the current page
  map <row>            print a map link for a row
  alerts               show alerts
  dismiss <n>          dismiss alert n
  reload               fetch the list again
  help                 this text
  quit | exit          leave";

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "find" | "filter" => Command::Find(rest.to_string()),
        "page" => Command::Page(number("page", rest)?),
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::Previous,
        "new" | "add" => Command::New,
        "show" | "view" => Command::Show(number("show", rest)?),
        "edit" => Command::Edit(number("edit", rest)?),
        "rm" | "remove" | "delete" => Command::Remove(number("rm", rest)?),
        "map" => Command::Map(number("map", rest)?),
        "alerts" => Command::Alerts,
        "dismiss" => Command::Dismiss(number("dismiss", rest)?),
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn number(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingNumber { command });
    }
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CommandError::BadNumber {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
