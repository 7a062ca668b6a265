//! Startup data: employee roster and initial work orders.
//!
//! The built-in seed is used unless a seed file is configured. Seed files are
//! TOML or JSON (chosen by extension) and reference assignees by employee id.

use crate::orders::{
    Device, DeviceLocation, Employee, Part, PartRequirement, Roster, RosterError, ServerConfig,
    StoreError, WorkOrder, WorkOrderStatus, WorkOrderStore, WorkOrderType,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML seed: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid JSON seed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported seed file extension: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),
    #[error("Work order {order_id} is assigned to unknown employee {employee_id}")]
    UnknownAssignee {
        order_id: String,
        employee_id: String,
    },
    #[error("Work order {order_id} is {status} but has {assignees} assignee(s)")]
    StatusMismatch {
        order_id: String,
        status: WorkOrderStatus,
        assignees: usize,
    },
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A seeded work order. Identical to [`WorkOrder`] except that assignees
/// are employee ids resolved against the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOrder {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub order_type: WorkOrderType,
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    pub current_config: ServerConfig,
    #[serde(default)]
    pub required_config: ServerConfig,
    #[serde(default)]
    pub required_parts: Vec<PartRequirement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedData {
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub work_orders: Vec<SeedOrder>,
}

impl SeedData {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let seed: SeedData = match extension.as_str() {
            "toml" => toml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            other => return Err(SeedError::UnsupportedFormat(other.to_string())),
        };
        tracing::info!(path = %path.display(), "Loaded seed file");
        Ok(seed)
    }

    /// Validate the seed and build the roster and store from it.
    pub fn into_parts(self) -> Result<(Roster, WorkOrderStore), SeedError> {
        let roster = Roster::new(self.employees)?;

        let mut orders = Vec::with_capacity(self.work_orders.len());
        for seeded in self.work_orders {
            let mut assigned_to = Vec::with_capacity(seeded.assigned_to.len());
            for employee_id in &seeded.assigned_to {
                let employee = roster.get(employee_id).ok_or_else(|| SeedError::UnknownAssignee {
                    order_id: seeded.id.clone(),
                    employee_id: employee_id.clone(),
                })?;
                assigned_to.push(employee.clone());
            }
            // Pending exactly when unassigned; closed orders keep their assignees as-is
            let mismatched = match seeded.status {
                WorkOrderStatus::Pending => !assigned_to.is_empty(),
                WorkOrderStatus::InProgress => assigned_to.is_empty(),
                WorkOrderStatus::Completed | WorkOrderStatus::Error => false,
            };
            if mismatched {
                return Err(SeedError::StatusMismatch {
                    order_id: seeded.id,
                    status: seeded.status,
                    assignees: assigned_to.len(),
                });
            }
            orders.push(WorkOrder {
                id: seeded.id,
                title: seeded.title,
                order_type: seeded.order_type,
                status: seeded.status,
                devices: seeded.devices,
                assigned_to,
                current_config: seeded.current_config,
                required_config: seeded.required_config,
                required_parts: seeded.required_parts,
            });
        }

        let store = WorkOrderStore::seed(orders)?;
        Ok((roster, store))
    }

    pub fn builtin() -> Self {
        Self {
            employees: vec![
                Employee::new("emp-001", "Zhang Wei"),
                Employee::new("emp-002", "Li Jing"),
                Employee::new("emp-003", "Wang Lei"),
                Employee::new("emp-004", "Liu Fang"),
            ],
            work_orders: vec![
                SeedOrder {
                    id: "WO-20240701-001".to_string(),
                    title: "A03-R22-U05 server memory upgrade".to_string(),
                    order_type: WorkOrderType::ServerReconfiguration,
                    status: WorkOrderStatus::Pending,
                    devices: vec![device("Dell PowerEdge R740", "SN9ABCDEF123", "A03", "R22", 5)],
                    assigned_to: vec![],
                    current_config: ServerConfig {
                        cpus: strings(&["2 x Intel Xeon Gold 6248R"]),
                        memory: strings(&["128GB (8 x 16GB) DDR4"]),
                        disks: strings(&["2 x 480GB SSD SATA", "4 x 1.2TB SAS 10K"]),
                        nics: strings(&["2 x 10GbE SFP+", "2 x 1GbE RJ45"]),
                    },
                    required_config: ServerConfig {
                        cpus: strings(&["2 x Intel Xeon Gold 6248R"]),
                        memory: strings(&["256GB (16 x 16GB) DDR4"]),
                        disks: strings(&["2 x 480GB SSD SATA", "4 x 1.2TB SAS 10K"]),
                        nics: strings(&["2 x 10GbE SFP+", "2 x 1GbE RJ45"]),
                    },
                    required_parts: vec![PartRequirement {
                        part: Part {
                            id: "MEM-DDR4-16G".to_string(),
                            kind: "Memory".to_string(),
                            model: "16GB DDR4 2933MHz".to_string(),
                            location: "B-05-3".to_string(),
                        },
                        quantity: 8,
                    }],
                },
                SeedOrder {
                    id: "WO-20240701-002".to_string(),
                    title: "C11-R09-U12 switch fault diagnosis".to_string(),
                    order_type: WorkOrderType::SwitchFault,
                    status: WorkOrderStatus::InProgress,
                    devices: vec![device("Cisco Nexus 93180YC-EX", "SNX9ZYXWV456", "C11", "R09", 12)],
                    assigned_to: strings(&["emp-001", "emp-003"]),
                    current_config: ServerConfig::default(),
                    required_config: ServerConfig::default(),
                    required_parts: vec![],
                },
                SeedOrder {
                    id: "WO-20240630-005".to_string(),
                    title: "B07-R15-U20-22 new server racking".to_string(),
                    order_type: WorkOrderType::ServerRacking,
                    status: WorkOrderStatus::Completed,
                    devices: vec![device("HPE ProLiant DL380 Gen10", "SNHP7GHIJKL789", "B07", "R15", 20)],
                    assigned_to: strings(&["emp-002"]),
                    current_config: ServerConfig::default(),
                    required_config: ServerConfig {
                        cpus: strings(&["2 x Intel Xeon Silver 4210"]),
                        memory: strings(&["64GB (4 x 16GB) DDR4"]),
                        disks: strings(&["2 x 960GB SSD NVMe"]),
                        nics: strings(&["4 x 10GbE SFP+"]),
                    },
                    required_parts: vec![],
                },
            ],
        }
    }
}

fn device(model: &str, sn: &str, module: &str, rack: &str, u: u32) -> Device {
    Device {
        model: model.to_string(),
        sn: sn.to_string(),
        location: DeviceLocation {
            module: module.to_string(),
            rack: rack.to_string(),
            u,
        },
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_seed_is_valid() {
        let (roster, store) = SeedData::builtin().into_parts().unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(store.len(), 3);

        // Pending exactly when unassigned, for the open orders
        for order in store.all().iter().filter(|o| !o.status.is_closed()) {
            assert_eq!(
                order.status == WorkOrderStatus::Pending,
                order.assigned_to.is_empty(),
                "{}",
                order.id
            );
        }
    }

    #[test]
    fn test_unknown_assignee_is_rejected() {
        let mut seed = SeedData::builtin();
        seed.work_orders[0].assigned_to = vec!["emp-999".to_string()];
        match seed.into_parts() {
            Err(SeedError::UnknownAssignee { order_id, employee_id }) => {
                assert_eq!(order_id, "WO-20240701-001");
                assert_eq!(employee_id, "emp-999");
            }
            other => panic!("expected unknown assignee, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_order_is_rejected() {
        let mut seed = SeedData::builtin();
        let copy = seed.work_orders[0].clone();
        seed.work_orders.push(copy);
        assert!(matches!(seed.into_parts(), Err(SeedError::Store(_))));
    }

    #[test]
    fn test_toml_seed_parses_with_defaults() {
        let content = r#"
            [[employees]]
            id = "emp-100"
            name = "Chen Yu"

            [[work_orders]]
            id = "WO-1"
            title = "Replace PSU"
            type = "server-reconfiguration"
            status = "in-progress"
            assigned_to = ["emp-100"]

            [[work_orders.devices]]
            model = "Dell PowerEdge R650"
            sn = "SNPSU0001"
            location = { module = "D01", rack = "R02", u = 7 }
        "#;
        let seed: SeedData = toml::from_str(content).unwrap();
        let (_, store) = seed.into_parts().unwrap();
        let order = store.get("WO-1").unwrap();
        assert_eq!(order.devices.len(), 1);
        assert_eq!(order.assigned_to[0].name, "Chen Yu");
        assert!(order.required_parts.is_empty());
        assert_eq!(order.current_config, ServerConfig::default());
    }

    #[test]
    fn test_pending_order_with_assignees_is_rejected() {
        let mut seed = SeedData::builtin();
        seed.work_orders[0].assigned_to = vec!["emp-001".to_string()];
        match seed.into_parts() {
            Err(SeedError::StatusMismatch { order_id, status, assignees }) => {
                assert_eq!(order_id, "WO-20240701-001");
                assert_eq!(status, WorkOrderStatus::Pending);
                assert_eq!(assignees, 1);
            }
            other => panic!("expected status mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_in_progress_order_without_assignees_is_rejected() {
        let mut seed = SeedData::builtin();
        seed.work_orders[1].assigned_to.clear();
        assert!(matches!(
            seed.into_parts(),
            Err(SeedError::StatusMismatch { status: WorkOrderStatus::InProgress, assignees: 0, .. })
        ));
    }

    #[test]
    fn test_closed_orders_skip_assignment_check() {
        let mut seed = SeedData::builtin();
        seed.work_orders[2].assigned_to.clear();
        seed.work_orders[2].status = WorkOrderStatus::Error;
        let (_, store) = seed.into_parts().unwrap();
        assert!(store.get("WO-20240630-005").unwrap().assigned_to.is_empty());
    }

    #[test]
    fn test_load_reads_toml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.toml");
        std::fs::write(
            &path,
            "[[employees]]\nid = \"e1\"\nname = \"Ana\"\n",
        )
        .unwrap();

        let seed = SeedData::load(&path).unwrap();
        assert_eq!(seed.employees[0].name, "Ana");
        assert!(seed.work_orders.is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.yaml");
        std::fs::write(&path, "employees: []\n").unwrap();

        match SeedData::load(&path) {
            Err(SeedError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            other => panic!("expected unsupported format, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SeedData::load(dir.path().join("absent.json")),
            Err(SeedError::Io { .. })
        ));
    }
}
