use crate::cli::commands::Session;
use anyhow::Result;

pub struct RosterCommand;

impl RosterCommand {
    pub fn execute(&self, session: &Session) -> Result<()> {
        println!("👥 EMPLOYEE ROSTER");
        println!("──────────────────");
        for employee in session.roster.iter() {
            let marker = if employee.id == session.current_user.id {
                "  (current user)"
            } else {
                ""
            };
            println!("{}  {}{}", employee.id, employee.name, marker);
        }
        Ok(())
    }
}
