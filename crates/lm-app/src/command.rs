use std::ops::RangeInclusive;

use lm_core::config::OutputMode;
use lm_match::rounding::Rounding;
use thiserror::Error;

/// First character the shell accepts into a charset.
pub const PRINTABLE_FIRST: char = ' ';
/// Last character the shell accepts into a charset.
pub const PRINTABLE_LAST: char = '}';

/// One parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leave the shell.
    Exit,
    /// Print the current charset.
    Chars,
    /// Add characters to the charset.
    Add(CharSelection),
    /// Remove characters from the charset.
    Remove(CharSelection),
    /// Double the resolution.
    ResUp,
    /// Halve the resolution.
    ResDown,
    /// Select the rounding policy.
    Round(Rounding),
    /// Select the output writer.
    Output(OutputMode),
    /// Render and write the art.
    Render,
}

/// Argument of `add`/`remove`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharSelection {
    /// A single character.
    One(char),
    /// The whole printable range.
    All,
    /// The space character.
    Space,
    /// An inclusive range, endpoints already ordered.
    Range(char, char),
}

impl CharSelection {
    /// The characters this selection denotes, ascending.
    #[must_use]
    pub fn chars(&self) -> RangeInclusive<char> {
        match *self {
            Self::One(ch) => ch..=ch,
            Self::All => PRINTABLE_FIRST..=PRINTABLE_LAST,
            Self::Space => ' '..=' ',
            Self::Range(lo, hi) => lo..=hi,
        }
    }
}

/// User-visible shell failures. Display strings are exactly what the shell
/// prints.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Unrecognized command word.
    #[error("Did not execute due to incorrect command.")]
    UnknownCommand,
    /// Bad `add` argument.
    #[error("Did not add due to incorrect format.")]
    AddFormat,
    /// Bad `remove` argument.
    #[error("Did not remove due to incorrect format.")]
    RemoveFormat,
    /// Bad `res` argument.
    #[error("Did not change resolution due to incorrect format.")]
    ResolutionFormat,
    /// `res` would leave the image bounds.
    #[error("Did not change resolution due to exceeding boundaries.")]
    ResolutionBounds,
    /// Bad `round` argument.
    #[error("Did not change rounding method due to incorrect format.")]
    RoundFormat,
    /// Bad `output` argument.
    #[error("Did not change output method due to incorrect format.")]
    OutputFormat,
    /// Render asked with fewer than 2 characters.
    #[error("Did not execute. Charset is too small.")]
    CharsetTooSmall,
}

/// Parse one input line. The command word is case-insensitive, its argument
/// is not; anything past the first two tokens is ignored.
///
/// # Errors
/// Returns the `CommandError` whose message the shell should print.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next().unwrap_or("");
    let arg = tokens.next();

    match head.to_ascii_lowercase().as_str() {
        "exit" => Ok(Command::Exit),
        "chars" => Ok(Command::Chars),
        "asciiart" => Ok(Command::Render),
        "add" => parse_selection(arg)
            .map(Command::Add)
            .ok_or(CommandError::AddFormat),
        "remove" => parse_selection(arg)
            .map(Command::Remove)
            .ok_or(CommandError::RemoveFormat),
        "res" => match arg {
            Some("up") => Ok(Command::ResUp),
            Some("down") => Ok(Command::ResDown),
            _ => Err(CommandError::ResolutionFormat),
        },
        "round" => arg
            .and_then(|a| a.parse::<Rounding>().ok())
            .map(Command::Round)
            .ok_or(CommandError::RoundFormat),
        "output" => match arg {
            Some("console") => Ok(Command::Output(OutputMode::Console)),
            Some("html") => Ok(Command::Output(OutputMode::Html)),
            _ => Err(CommandError::OutputFormat),
        },
        _ => Err(CommandError::UnknownCommand),
    }
}

fn parse_selection(arg: Option<&str>) -> Option<CharSelection> {
    let arg = arg?;
    match arg {
        "all" => Some(CharSelection::All),
        "space" => Some(CharSelection::Space),
        _ => {
            let chars: Vec<char> = arg.chars().collect();
            match chars[..] {
                [ch] if printable(ch) => Some(CharSelection::One(ch)),
                [a, '-', b] if printable(a) && printable(b) => {
                    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                    Some(CharSelection::Range(lo, hi))
                }
                _ => None,
            }
        }
    }
}

fn printable(ch: char) -> bool {
    (PRINTABLE_FIRST..=PRINTABLE_LAST).contains(&ch)
}
