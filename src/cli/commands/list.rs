use crate::cli::commands::Session;
use crate::console::render;
use crate::orders::{visible, Role, WorkOrder};
use anyhow::Result;

pub struct ListCommand {
    pub role: Option<Role>,
    pub json: bool,
}

impl ListCommand {
    pub fn new(role: Option<Role>) -> Self {
        Self { role, json: false }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute(&self, session: &Session) -> Result<()> {
        let role = self.role.unwrap_or(session.config.console.initial_role);
        let orders: Vec<&WorkOrder> = visible(session.store.all(), role, &session.current_user);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&orders)?);
        } else {
            print!("{}", render::dashboard(&orders, role, &session.current_user));
        }
        Ok(())
    }
}
