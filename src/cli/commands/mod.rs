use crate::config::RackopsConfig;
use crate::orders::{Employee, Roster, WorkOrderStore};
use crate::seed::SeedData;
use anyhow::{Context, Result};
use std::path::Path;

pub mod config;
pub mod console;
pub mod list;
pub mod roster;
pub mod show;

/// Everything a command needs: configuration plus the seeded roster, store
/// and the resolved current user.
pub struct Session {
    pub config: RackopsConfig,
    pub roster: Roster,
    pub store: WorkOrderStore,
    pub current_user: Employee,
}

impl Session {
    /// Seed the roster and store. `seed_override` wins over `seed.path`.
    pub fn load(config: RackopsConfig, seed_override: Option<&Path>) -> Result<Self> {
        let seed_path = seed_override.or(config.seed.path.as_deref());
        let seed = match seed_path {
            Some(path) => SeedData::load(path)
                .with_context(|| format!("Failed to load seed {}", path.display()))?,
            None => SeedData::builtin(),
        };
        let (roster, store) = seed.into_parts()?;
        let current_user = roster
            .require(&config.console.current_user)
            .context("console.current_user must name an employee in the roster")?
            .clone();

        tracing::debug!(
            orders = store.len(),
            employees = roster.len(),
            user.id = %current_user.id,
            "Session loaded"
        );
        Ok(Self {
            config,
            roster,
            store,
            current_user,
        })
    }
}

pub fn show_how_to_get_started() -> Result<()> {
    println!("🛠️  rackops - data-center work order console");
    println!();
    println!("To get started:");
    println!("  🖥️  rackops console        # Interactive console (assign, run checklists)");
    println!("  📋 rackops list           # Work orders visible to your role");
    println!("  🔍 rackops show <ID>      # Details of one work order");
    println!("  👥 rackops roster         # Employee roster");
    println!();
    println!("💡 Type 'help' inside the console for the command list.");
    Ok(())
}
