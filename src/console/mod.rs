//! Interactive work order console.
//!
//! The console is the presentation layer: it owns the store, the roster and
//! the view state (active role, current screen) and routes typed commands to
//! the assignment and checklist logic. All actions run synchronously on the
//! caller's thread, one line at a time.

pub mod commands;
pub mod render;

use crate::checklist::{ChecklistError, ChecklistSession};
use crate::orders::{visible, AssignmentEditor, Employee, Role, Roster, WorkOrder, WorkOrderStore};
use std::io::{BufRead, Write};
use thiserror::Error;

pub use commands::{ConsoleCommand, OrderRef, HELP};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Unknown command '{0}', type 'help' for the command list")]
    UnknownCommand(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("No work order {0} in the current list")]
    UnknownOrder(String),
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("Only a team lead can edit assignments")]
    NotPermitted,
    #[error("'{0}' is not available on this screen")]
    WrongScreen(&'static str),
    #[error(transparent)]
    Checklist(#[from] ChecklistError),
}

#[derive(Debug)]
pub enum Screen {
    List,
    Assigning(AssignmentEditor),
    Detail(ChecklistSession),
}

/// Result of one console command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub notices: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn notice(message: impl Into<String>) -> Self {
        Self {
            notices: vec![message.into()],
            quit: false,
        }
    }
}

#[derive(Debug)]
pub struct Console {
    store: WorkOrderStore,
    roster: Roster,
    current_user: Employee,
    role: Role,
    screen: Screen,
}

impl Console {
    pub fn new(store: WorkOrderStore, roster: Roster, current_user: Employee, role: Role) -> Self {
        Self {
            store,
            roster,
            current_user,
            role,
            screen: Screen::List,
        }
    }

    pub fn store(&self) -> &WorkOrderStore {
        &self.store
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn current_user(&self) -> &Employee {
        &self.current_user
    }

    /// Orders visible under the active role, in store order.
    pub fn visible_orders(&self) -> Vec<&WorkOrder> {
        visible(self.store.all(), self.role, &self.current_user)
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Reply, ConsoleError> {
        let command = ConsoleCommand::parse(line)?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: ConsoleCommand) -> Result<Reply, ConsoleError> {
        match command {
            ConsoleCommand::Help => Ok(Reply::notice(HELP)),
            ConsoleCommand::Quit => Ok(Reply {
                notices: vec![],
                quit: true,
            }),
            ConsoleCommand::List => {
                if let Screen::Assigning(_) = self.screen {
                    return Err(ConsoleError::WrongScreen("list"));
                }
                self.screen = Screen::List;
                Ok(Reply::default())
            }
            ConsoleCommand::Role(role) => Ok(self.switch_role(role)),
            ConsoleCommand::Open(target) => self.open(&target),
            ConsoleCommand::Back => match self.screen {
                Screen::Detail(_) => {
                    self.screen = Screen::List;
                    Ok(Reply::default())
                }
                _ => Err(ConsoleError::WrongScreen("back")),
            },
            ConsoleCommand::Assign(target) => self.open_assignment(&target),
            ConsoleCommand::Toggle(employee_id) => {
                let Screen::Assigning(editor) = &mut self.screen else {
                    return Err(ConsoleError::WrongScreen("toggle"));
                };
                if self.roster.get(&employee_id).is_none() {
                    return Err(ConsoleError::UnknownEmployee(employee_id));
                }
                editor.toggle(&employee_id);
                Ok(Reply::default())
            }
            ConsoleCommand::Save => self.save_assignment(),
            ConsoleCommand::Cancel => match self.screen {
                Screen::Assigning(_) => {
                    self.screen = Screen::List;
                    Ok(Reply::default())
                }
                _ => Err(ConsoleError::WrongScreen("cancel")),
            },
            ConsoleCommand::Expand(stage) => {
                let session = self.session_mut("expand")?;
                session.toggle_panel(stage)?;
                Ok(Reply::default())
            }
            ConsoleCommand::Parts => {
                let notice = self.session_mut("parts")?.confirm_parts()?;
                Ok(Reply::notice(notice.to_string()))
            }
            ConsoleCommand::Indicator(mode) => {
                let notice = self.session_mut("indicator")?.set_indicator(mode)?;
                Ok(Reply::notice(notice.to_string()))
            }
            ConsoleCommand::Serial(scanned) => {
                let notice = self.session_mut("sn")?.verify_serial(&scanned)?;
                Ok(Reply::notice(notice.to_string()))
            }
            ConsoleCommand::Scan(code) => {
                let notice = self.session_mut("scan")?.verify_part_scan(&code)?;
                Ok(Reply::notice(notice.to_string()))
            }
            ConsoleCommand::Done => {
                let notice = self.session_mut("done")?.complete_hardware()?;
                Ok(Reply::notice(notice.to_string()))
            }
            ConsoleCommand::Close => self.close_out(false),
            ConsoleCommand::Fault => self.close_out(true),
        }
    }

    /// Text of the current screen.
    pub fn render(&self) -> String {
        match &self.screen {
            Screen::List => render::dashboard(&self.visible_orders(), self.role, &self.current_user),
            Screen::Assigning(editor) => match self.store.get(editor.order_id()) {
                Some(order) => render::assignment_editor(order, editor, &self.roster),
                None => String::new(),
            },
            Screen::Detail(session) => match self.store.get(session.order_id()) {
                Some(order) => render::checklist(order, session),
                None => String::new(),
            },
        }
    }

    /// Read commands line by line until `quit` or end of input, printing the
    /// screen after every command that changed it.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> std::io::Result<()> {
        writeln!(output, "{}", self.render())?;
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            tracing::debug!(command = %trimmed, role = %self.role, "Console command");
            match self.execute_line(trimmed) {
                Ok(reply) => {
                    for notice in &reply.notices {
                        writeln!(output, "! {notice}")?;
                    }
                    if reply.quit {
                        break;
                    }
                    writeln!(output, "{}", self.render())?;
                }
                Err(e) => writeln!(output, "error: {e}")?,
            }
        }
        Ok(())
    }

    fn switch_role(&mut self, role: Option<Role>) -> Reply {
        self.role = role.unwrap_or_else(|| self.role.toggled());
        if !self.role.can_assign() {
            if let Screen::Assigning(_) = self.screen {
                self.screen = Screen::List;
            }
        }
        tracing::info!(role = %self.role, "Viewing role switched");
        Reply::notice(format!("Role: {}", self.role))
    }

    fn resolve(&self, target: &OrderRef) -> Result<String, ConsoleError> {
        let orders = self.visible_orders();
        let found = match target {
            OrderRef::Id(id) => orders.iter().find(|o| &o.id == id),
            OrderRef::Position(n) => n.checked_sub(1).and_then(|i| orders.get(i)),
        };
        found.map(|o| o.id.clone()).ok_or_else(|| {
            ConsoleError::UnknownOrder(match target {
                OrderRef::Id(id) => id.clone(),
                OrderRef::Position(n) => format!("#{n}"),
            })
        })
    }

    fn open(&mut self, target: &OrderRef) -> Result<Reply, ConsoleError> {
        if let Screen::Assigning(_) = self.screen {
            return Err(ConsoleError::WrongScreen("open"));
        }
        let id = self.resolve(target)?;
        let Some(order) = self.store.get(&id) else {
            return Err(ConsoleError::UnknownOrder(id));
        };
        let session = ChecklistSession::open(order);
        let has_device = session.has_device();
        self.screen = Screen::Detail(session);
        tracing::info!(order_id = %id, user.id = %self.current_user.id, "Work order opened");

        if has_device {
            Ok(Reply::default())
        } else {
            Ok(Reply::notice("This work order has no linked device"))
        }
    }

    fn open_assignment(&mut self, target: &OrderRef) -> Result<Reply, ConsoleError> {
        if !self.role.can_assign() {
            return Err(ConsoleError::NotPermitted);
        }
        if !matches!(self.screen, Screen::List) {
            return Err(ConsoleError::WrongScreen("assign"));
        }
        let id = self.resolve(target)?;
        let Some(order) = self.store.get(&id) else {
            return Err(ConsoleError::UnknownOrder(id));
        };
        self.screen = Screen::Assigning(AssignmentEditor::open(order));
        Ok(Reply::default())
    }

    fn save_assignment(&mut self) -> Result<Reply, ConsoleError> {
        let editor = match std::mem::replace(&mut self.screen, Screen::List) {
            Screen::Assigning(editor) => editor,
            other => {
                self.screen = other;
                return Err(ConsoleError::WrongScreen("save"));
            }
        };
        let order_id = editor.order_id().to_string();
        let status = editor.save(&mut self.store, &self.roster);

        let message = match (status, self.store.get(&order_id)) {
            (Some(status), Some(order)) => format!(
                "Assignment saved for {order_id}: {} ({status})",
                render_names(&order.assigned_to)
            ),
            _ => format!("Work order {order_id} not found, nothing saved"),
        };
        Ok(Reply::notice(message))
    }

    fn close_out(&mut self, fault: bool) -> Result<Reply, ConsoleError> {
        let Screen::Detail(session) = &mut self.screen else {
            return Err(ConsoleError::WrongScreen(if fault { "fault" } else { "close" }));
        };
        let notice = if fault {
            session.report_error(&mut self.store)?
        } else {
            session.close_order(&mut self.store)?
        };
        self.screen = Screen::List;
        Ok(Reply::notice(notice.to_string()))
    }

    fn session_mut(&mut self, command: &'static str) -> Result<&mut ChecklistSession, ConsoleError> {
        match &mut self.screen {
            Screen::Detail(session) => Ok(session),
            _ => Err(ConsoleError::WrongScreen(command)),
        }
    }
}

fn render_names(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "unassigned".to_string();
    }
    employees
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
