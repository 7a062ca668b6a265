use crate::cli::commands::Session;
use crate::console::Console;
use crate::telemetry::{create_session_span, generate_correlation_id};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

pub struct InteractiveCommand {
    pub script: Option<PathBuf>,
}

impl InteractiveCommand {
    pub fn new(script: Option<PathBuf>) -> Self {
        Self { script }
    }

    pub fn execute(&self, session: Session) -> Result<()> {
        let session_id = generate_correlation_id();
        let role = session.config.console.initial_role;
        let span = create_session_span(&session_id, &session.current_user.id, &role.to_string());
        let _guard = span.enter();

        let mut console = Console::new(session.store, session.roster, session.current_user, role);
        let mut stdout = io::stdout().lock();

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script {}", path.display()))?;
                console.run(BufReader::new(file), &mut stdout)?;
            }
            None => console.run(io::stdin().lock(), &mut stdout)?,
        }

        tracing::info!("Console session ended");
        Ok(())
    }
}
