use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    Pending,
    InProgress,
    Completed,
    Error,
}

impl WorkOrderStatus {
    /// Status implied by an assignment edit. Applied unconditionally by the
    /// assignment coordinator, so a closed order reopens when re-assigned.
    pub fn for_assignment(assignee_count: usize) -> Self {
        if assignee_count > 0 {
            WorkOrderStatus::InProgress
        } else {
            WorkOrderStatus::Pending
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Error)
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkOrderStatus::Pending => "Pending",
            WorkOrderStatus::InProgress => "In progress",
            WorkOrderStatus::Completed => "Completed",
            WorkOrderStatus::Error => "Error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderType {
    ServerReconfiguration,
    ServerRacking,
    SwitchFault,
}

impl fmt::Display for WorkOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkOrderType::ServerReconfiguration => "Server reconfiguration",
            WorkOrderType::ServerRacking => "Server racking",
            WorkOrderType::SwitchFault => "Switch fault",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Physical position of a device: module, rack and rack unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLocation {
    pub module: String,
    pub rack: String,
    pub u: u32,
}

impl fmt::Display for DeviceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / U{}", self.module, self.rack, self.u)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub model: String,
    pub sn: String,
    pub location: DeviceLocation,
}

impl Device {
    /// Case-insensitive serial comparison; surrounding whitespace in the
    /// scanned value is ignored.
    pub fn serial_matches(&self, scanned: &str) -> bool {
        scanned.trim().to_uppercase() == self.sn.to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    /// Storage box label
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRequirement {
    pub part: Part,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub cpus: Vec<String>,
    pub memory: Vec<String>,
    pub disks: Vec<String>,
    pub nics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub order_type: WorkOrderType,
    pub status: WorkOrderStatus,
    pub devices: Vec<Device>,
    pub assigned_to: Vec<Employee>,
    pub current_config: ServerConfig,
    pub required_config: ServerConfig,
    pub required_parts: Vec<PartRequirement>,
}

impl WorkOrder {
    /// The device the checklist operates on. Additional devices are listed
    /// but never verified.
    pub fn primary_device(&self) -> Option<&Device> {
        self.devices.first()
    }

    pub fn is_assigned_to(&self, employee_id: &str) -> bool {
        self.assigned_to.iter().any(|e| e.id == employee_id)
    }
}
