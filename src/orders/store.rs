use crate::orders::types::WorkOrder;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate work order id: {0}")]
    DuplicateOrder(String),
}

/// In-memory, ordered collection of work orders.
///
/// Records are created once at seed time and afterwards only replaced whole,
/// keyed by identifier. Nothing is ever inserted or removed after seeding.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderStore {
    orders: Vec<WorkOrder>,
}

impl WorkOrderStore {
    pub fn seed(orders: Vec<WorkOrder>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for order in &orders {
            if !seen.insert(order.id.as_str()) {
                return Err(StoreError::DuplicateOrder(order.id.clone()));
            }
        }
        tracing::debug!(count = orders.len(), "Work order store seeded");
        Ok(Self { orders })
    }

    pub fn get(&self, id: &str) -> Option<&WorkOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn all(&self) -> &[WorkOrder] {
        &self.orders
    }

    /// Replace the record with the same id, keeping its position.
    /// Returns false, leaving the store untouched, when no such record exists.
    pub fn replace(&mut self, order: WorkOrder) -> bool {
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => {
                *slot = order;
                true
            }
            None => {
                tracing::debug!(order_id = %order.id, "Replace ignored, unknown work order");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
