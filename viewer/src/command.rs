//! Interactive command parsing.
//!
//! Each stdin line is one user action. Field edits take the rest of the line
//! verbatim, so `ip` alone clears the field and inner spaces are kept.

use crate::app::Event;

pub const HELP: &str = "\
commands:
  ip <text>        set the IP address field
  contact <text>   set the contact info field
  search-ip        search by IP address
  search-contact   search by contact info
  all              get all machines
  show             redraw the page
  help             show this help
  quit             exit";

#[derive(Debug)]
pub enum Command {
    Event(Event),
    Help,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(String),
}

pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let bare = |event: Event| {
        if rest.trim().is_empty() {
            Ok(Some(Command::Event(event)))
        } else {
            Err(CommandError::UnexpectedArgument(word.to_string()))
        }
    };

    match word {
        "ip" => Ok(Some(Command::Event(Event::IpAddressChanged(rest.to_string())))),
        "contact" => Ok(Some(Command::Event(Event::ContactInfoChanged(rest.to_string())))),
        "search-ip" => bare(Event::SearchByIpAddress),
        "search-contact" => bare(Event::SearchByContactInfo),
        "all" => bare(Event::GetAllMachines),
        "show" => bare(Event::Redraw),
        "quit" | "exit" => bare(Event::Quit),
        "help" => Ok(Some(Command::Help)),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
