use crate::checklist::{ChecklistStage, IndicatorMode};
use crate::console::ConsoleError;
use crate::orders::Role;
use clap::ValueEnum;

/// A work order reference typed at the prompt: an id, or `#N` for the N-th
/// entry of the list currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    Id(String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    List,
    /// `None` toggles between the two roles
    Role(Option<Role>),
    Open(OrderRef),
    Back,
    Assign(OrderRef),
    Toggle(String),
    Save,
    Cancel,
    Expand(ChecklistStage),
    Parts,
    Indicator(IndicatorMode),
    Serial(String),
    Scan(String),
    Done,
    Close,
    Fault,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                      show the work order list
  role [team-lead|employee] switch role (no argument toggles)
  open <ID|#N>              open the checklist of a work order
  back                      return to the list
  assign <ID|#N>            edit assignees (team lead)
  toggle <EMPLOYEE_ID>      tick or untick an employee in the assignment editor
  save | cancel             save or discard the assignment editor
  expand <1-4>              expand or collapse a checklist stage
  parts                     stage 1: confirm parts received
  indicator blink|steady    stage 2: set the server indicator
  sn <SERIAL>               stage 2: verify the device serial number
  scan <CODE>               stage 3: scan a part barcode
  done                      stage 3: hardware operation complete
  close                     stage 4: close the work order
  fault                     stage 4: report an error
  help | quit";

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, ConsoleError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => ConsoleCommand::Help,
            "list" | "ls" => ConsoleCommand::List,
            "role" => {
                if rest.is_empty() {
                    ConsoleCommand::Role(None)
                } else {
                    let role = Role::from_str(rest, true)
                        .map_err(|_| ConsoleError::InvalidArgument(format!("unknown role '{rest}'")))?;
                    ConsoleCommand::Role(Some(role))
                }
            }
            "open" => ConsoleCommand::Open(parse_order_ref(rest)?),
            "back" => ConsoleCommand::Back,
            "assign" => ConsoleCommand::Assign(parse_order_ref(rest)?),
            "toggle" => ConsoleCommand::Toggle(required(rest, "employee id")?.to_string()),
            "save" => ConsoleCommand::Save,
            "cancel" => ConsoleCommand::Cancel,
            "expand" => {
                let stage = required(rest, "stage number")?
                    .parse::<u8>()
                    .ok()
                    .and_then(ChecklistStage::from_number)
                    .ok_or_else(|| ConsoleError::InvalidArgument(format!("no stage '{rest}'")))?;
                ConsoleCommand::Expand(stage)
            }
            "parts" => ConsoleCommand::Parts,
            "indicator" => {
                let mode = required(rest, "indicator mode")?
                    .parse::<IndicatorMode>()
                    .map_err(ConsoleError::InvalidArgument)?;
                ConsoleCommand::Indicator(mode)
            }
            "sn" => ConsoleCommand::Serial(required(rest, "serial number")?.to_string()),
            "scan" => ConsoleCommand::Scan(required(rest, "part code")?.to_string()),
            "done" => ConsoleCommand::Done,
            "close" => ConsoleCommand::Close,
            "fault" => ConsoleCommand::Fault,
            "quit" | "exit" => ConsoleCommand::Quit,
            _ => return Err(ConsoleError::UnknownCommand(line.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ConsoleError> {
    if value.is_empty() {
        Err(ConsoleError::MissingArgument(name))
    } else {
        Ok(value)
    }
}

fn parse_order_ref(value: &str) -> Result<OrderRef, ConsoleError> {
    let value = required(value, "work order")?;
    match value.strip_prefix('#') {
        Some(position) => position
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(OrderRef::Position)
            .ok_or_else(|| ConsoleError::InvalidArgument(format!("bad list position '{value}'"))),
        None => Ok(OrderRef::Id(value.to_string())),
    }
}
