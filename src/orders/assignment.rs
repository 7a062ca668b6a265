use crate::orders::roster::Roster;
use crate::orders::store::WorkOrderStore;
use crate::orders::types::{Employee, WorkOrder, WorkOrderStatus};
use std::collections::HashSet;

/// Replace the assignee list of `order_id` and recompute its status.
///
/// Duplicates (by employee id) are dropped, keeping the first occurrence and
/// the caller's order. The status becomes in-progress for a non-empty
/// selection and pending otherwise, whatever it was before, so editing a
/// completed or errored order reopens it.
///
/// An unknown `order_id` leaves the store untouched and returns `None`.
pub fn assign(
    store: &mut WorkOrderStore,
    order_id: &str,
    selected: &[Employee],
) -> Option<WorkOrderStatus> {
    let Some(existing) = store.get(order_id) else {
        tracing::debug!(order_id = %order_id, "Assignment ignored, unknown work order");
        return None;
    };

    let mut seen = HashSet::new();
    let assigned_to: Vec<Employee> = selected
        .iter()
        .filter(|e| seen.insert(e.id.as_str()))
        .cloned()
        .collect();
    let status = WorkOrderStatus::for_assignment(assigned_to.len());

    if existing.status.is_closed() && !status.is_closed() {
        tracing::warn!(
            order_id = %order_id,
            previous = ?existing.status,
            status = ?status,
            "Assignment edit reopened a closed work order"
        );
    }

    let updated = WorkOrder {
        assigned_to,
        status,
        ..existing.clone()
    };
    let assignees: Vec<&str> = updated.assigned_to.iter().map(|e| e.id.as_str()).collect();
    tracing::info!(
        order_id = %order_id,
        assignees = ?assignees,
        status = ?status,
        "Work order assignment saved"
    );

    store.replace(updated);
    Some(status)
}

/// Checkbox selection over the roster for one order.
///
/// Starts from the order's current assignees. Saving consumes the editor;
/// dropping it discards the selection without touching the store.
#[derive(Debug, Clone)]
pub struct AssignmentEditor {
    order_id: String,
    selected: HashSet<String>,
}

impl AssignmentEditor {
    pub fn open(order: &WorkOrder) -> Self {
        Self {
            order_id: order.id.clone(),
            selected: order.assigned_to.iter().map(|e| e.id.clone()).collect(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn is_selected(&self, employee_id: &str) -> bool {
        self.selected.contains(employee_id)
    }

    /// Flip one checkbox. Returns whether the employee is now selected.
    pub fn toggle(&mut self, employee_id: &str) -> bool {
        if self.selected.remove(employee_id) {
            false
        } else {
            self.selected.insert(employee_id.to_string());
            true
        }
    }

    /// Selected employees in roster order. Ids missing from the roster are
    /// ignored.
    pub fn selection(&self, roster: &Roster) -> Vec<Employee> {
        roster
            .iter()
            .filter(|e| self.selected.contains(&e.id))
            .cloned()
            .collect()
    }

    pub fn save(self, store: &mut WorkOrderStore, roster: &Roster) -> Option<WorkOrderStatus> {
        let selection = self.selection(roster);
        assign(store, &self.order_id, &selection)
    }
}
