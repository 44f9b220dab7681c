//! Parsing of the line commands typed into the terminal front end.
//!
//! Row numbers are 1-based on screen and 0-based once parsed.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a row number")]
    BadRow(String),
}

/// Commands accepted by the main form.
#[derive(Debug, Clone, PartialEq)]
pub enum MainCommand {
    Amount(String),
    From(String),
    To(String),
    Convert,
    /// A bare number: set the amount and convert in one go.
    ConvertAmount(String),
    Swap,
    Clear,
    Rates,
    Show,
    Help,
    Quit,
}

/// Commands accepted while the rate editor is open.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    List,
    Add,
    /// Remove the given row, or the selected one.
    Remove(Option<usize>),
    Select(usize),
    Code(usize, String),
    Rate(usize, String),
    Reset,
    Save,
    Cancel,
    Help,
}

fn split_verb(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

fn parse_row(text: &str) -> Result<usize, CommandError> {
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadRow(text.to_string())),
    }
}

/// Split `"<row> <value>"`; the value may be empty.
fn row_and_value(
    rest: &str,
    command: &'static str,
) -> Result<(usize, String), CommandError> {
    let rest = required(rest, command, "a row number")?;
    let (row, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Ok((parse_row(row)?, value.trim().to_string()))
}

fn looks_numeric(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ',' || c == '-' || c == '+')
}

impl FromStr for MainCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if looks_numeric(line) {
            return Ok(MainCommand::ConvertAmount(line.trim().to_string()));
        }
        let (verb, rest) = split_verb(line);
        let command = match verb.as_str() {
            "amount" | "a" => MainCommand::Amount(rest.to_string()),
            "from" | "f" => MainCommand::From(required(rest, "from", "a currency code")?.to_string()),
            "to" | "t" => MainCommand::To(required(rest, "to", "a currency code")?.to_string()),
            "convert" | "c" | "" => MainCommand::Convert,
            "swap" | "s" => MainCommand::Swap,
            "clear" | "l" => MainCommand::Clear,
            "rates" | "manage" | "m" => MainCommand::Rates,
            "show" => MainCommand::Show,
            "help" | "?" => MainCommand::Help,
            "quit" | "exit" | "q" => MainCommand::Quit,
            _ => return Err(CommandError::Unknown(verb)),
        };
        Ok(command)
    }
}

impl FromStr for EditorCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_verb(line);
        let command = match verb.as_str() {
            "list" | "ls" | "" => EditorCommand::List,
            "add" => EditorCommand::Add,
            "remove" | "rm" => {
                if rest.is_empty() {
                    EditorCommand::Remove(None)
                } else {
                    EditorCommand::Remove(Some(parse_row(rest)?))
                }
            }
            "select" | "sel" => {
                EditorCommand::Select(parse_row(required(rest, "select", "a row number")?)?)
            }
            "code" => {
                let (row, value) = row_and_value(rest, "code")?;
                EditorCommand::Code(row, value)
            }
            "rate" => {
                let (row, value) = row_and_value(rest, "rate")?;
                EditorCommand::Rate(row, value)
            }
            "reset" => EditorCommand::Reset,
            "save" => EditorCommand::Save,
            "cancel" | "close" | "quit" | "q" => EditorCommand::Cancel,
            "help" | "?" => EditorCommand::Help,
            _ => return Err(CommandError::Unknown(verb)),
        };
        Ok(command)
    }
}

pub const MAIN_HELP: &str = "\
COMMANDS:
    <number>          Set the amount and convert (commas allowed: 1,234.56)
    amount <text>     Set the amount without converting
    from <CODE>       Select the currency to convert from
    to <CODE>         Select the currency to convert to
    convert           Convert the current amount
    swap              Swap the From and To currencies
    clear             Clear the amount and the result
    rates             Manage exchange rates
    show              Show the form
    help              Show this message
    quit              Exit";

pub const EDITOR_HELP: &str = "\
RATE EDITOR COMMANDS:
    list              Show the rate table
    add               Add a row (NEW = 1.0) and select it
    select <row>      Select a row
    remove [row]      Remove a row (default: the selected one)
    code <row> <text> Change a row's currency code
    rate <row> <num>  Change a row's rate (invalid numbers are ignored)
    reset             Reset to the built-in default rates
    save              Save and close
    cancel            Close without saving";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_commands() {
        assert_eq!("amount 12".parse::<MainCommand>(), Ok(MainCommand::Amount("12".into())));
        assert_eq!("FROM gbp".parse::<MainCommand>(), Ok(MainCommand::From("gbp".into())));
        assert_eq!("to  jpy ".parse::<MainCommand>(), Ok(MainCommand::To("jpy".into())));
        assert_eq!("swap".parse::<MainCommand>(), Ok(MainCommand::Swap));
        assert_eq!("".parse::<MainCommand>(), Ok(MainCommand::Convert));
        assert_eq!("q".parse::<MainCommand>(), Ok(MainCommand::Quit));
    }

    #[test]
    fn test_bare_number_converts() {
        assert_eq!(
            " 1,234.5".parse::<MainCommand>(),
            Ok(MainCommand::ConvertAmount("1,234.5".into()))
        );
        assert_eq!(".5".parse::<MainCommand>(), Ok(MainCommand::ConvertAmount(".5".into())));
    }

    #[test]
    fn test_main_command_errors() {
        assert_eq!(
            "from".parse::<MainCommand>(),
            Err(CommandError::MissingArgument {
                command: "from",
                argument: "a currency code"
            })
        );
        assert_eq!(
            "fly".parse::<MainCommand>(),
            Err(CommandError::Unknown("fly".into()))
        );
    }

    #[test]
    fn test_editor_commands() {
        assert_eq!("rm".parse::<EditorCommand>(), Ok(EditorCommand::Remove(None)));
        assert_eq!("remove 3".parse::<EditorCommand>(), Ok(EditorCommand::Remove(Some(2))));
        assert_eq!("select 1".parse::<EditorCommand>(), Ok(EditorCommand::Select(0)));
        assert_eq!("code 2 sek".parse::<EditorCommand>(), Ok(EditorCommand::Code(1, "sek".into())));
        assert_eq!("code 2".parse::<EditorCommand>(), Ok(EditorCommand::Code(1, String::new())));
        assert_eq!("rate 10 10.75".parse::<EditorCommand>(), Ok(EditorCommand::Rate(9, "10.75".into())));
        assert_eq!("SAVE".parse::<EditorCommand>(), Ok(EditorCommand::Save));
    }

    #[test]
    fn test_editor_command_errors() {
        assert_eq!(
            "remove 0".parse::<EditorCommand>(),
            Err(CommandError::BadRow("0".into()))
        );
        assert_eq!(
            "rate x 1.0".parse::<EditorCommand>(),
            Err(CommandError::BadRow("x".into()))
        );
        assert!(matches!(
            "rate".parse::<EditorCommand>(),
            Err(CommandError::MissingArgument { command: "rate", .. })
        ));
    }
}
