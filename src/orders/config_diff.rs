use crate::orders::types::ServerConfig;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Cpu,
    Memory,
    Disk,
    Nic,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Component::Cpu => "CPU",
            Component::Memory => "Memory",
            Component::Disk => "Disks",
            Component::Nic => "NICs",
        };
        f.write_str(label)
    }
}

/// Current vs required descriptors for one hardware component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDiff<'a> {
    pub component: Component,
    pub current: &'a [String],
    pub required: &'a [String],
}

impl ComponentDiff<'_> {
    /// Lists are compared by value and position.
    pub fn is_pending_change(&self) -> bool {
        self.current != self.required
    }
}

pub fn compare<'a>(current: &'a ServerConfig, required: &'a ServerConfig) -> Vec<ComponentDiff<'a>> {
    vec![
        ComponentDiff {
            component: Component::Cpu,
            current: &current.cpus,
            required: &required.cpus,
        },
        ComponentDiff {
            component: Component::Memory,
            current: &current.memory,
            required: &required.memory,
        },
        ComponentDiff {
            component: Component::Disk,
            current: &current.disks,
            required: &required.disks,
        },
        ComponentDiff {
            component: Component::Nic,
            current: &current.nics,
            required: &required.nics,
        },
    ]
}

pub fn pending_changes<'a>(current: &'a ServerConfig, required: &'a ServerConfig) -> Vec<ComponentDiff<'a>> {
    compare(current, required)
        .into_iter()
        .filter(ComponentDiff::is_pending_change)
        .collect()
}
