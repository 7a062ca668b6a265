// rackops Library - Data-center hardware work order console
// This exposes the core components for testing and integration

pub mod checklist;
pub mod cli;
pub mod config;
pub mod console;
pub mod orders;
pub mod seed;
pub mod telemetry;

// Re-export key types for easy access
pub use checklist::{
    ChecklistError, ChecklistEvent, ChecklistSession, ChecklistStage, Closeout, Notice, Progress,
};
pub use config::RackopsConfig;
pub use console::{Console, ConsoleCommand, ConsoleError, Reply, Screen};
pub use orders::{
    assign, visible, AssignmentEditor, Employee, Role, Roster, WorkOrder, WorkOrderStatus,
    WorkOrderStore, WorkOrderType,
};
pub use seed::{SeedData, SeedError};
pub use telemetry::{create_session_span, generate_correlation_id, init_telemetry, shutdown_telemetry};
