// Work order domain: model, roster, store, visibility and assignment

pub mod assignment;
pub mod config_diff;
pub mod roster;
pub mod store;
pub mod types;
pub mod visibility;

pub use assignment::{assign, AssignmentEditor};
pub use config_diff::{compare, pending_changes, Component, ComponentDiff};
pub use roster::{Roster, RosterError};
pub use store::{StoreError, WorkOrderStore};
pub use types::{
    Device, DeviceLocation, Employee, Part, PartRequirement, ServerConfig, WorkOrder,
    WorkOrderStatus, WorkOrderType,
};
pub use visibility::{visible, Role};
