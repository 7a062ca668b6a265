use crate::cli::commands::Session;
use crate::console::render;
use anyhow::{bail, Result};

pub struct ShowCommand {
    pub order_id: String,
}

impl ShowCommand {
    pub fn new(order_id: String) -> Self {
        Self { order_id }
    }

    pub fn execute(&self, session: &Session) -> Result<()> {
        let Some(order) = session.store.get(&self.order_id) else {
            bail!("❌ No work order {}", self.order_id);
        };
        print!("{}", render::order_details(order));
        Ok(())
    }
}
