use crate::orders::types::Employee;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Duplicate employee id: {0}")]
    DuplicateEmployee(String),
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),
}

/// The full employee roster, in display order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Result<Self, RosterError> {
        let mut seen = HashSet::new();
        for employee in &employees {
            if !seen.insert(employee.id.as_str()) {
                return Err(RosterError::DuplicateEmployee(employee.id.clone()));
            }
        }
        Ok(Self { employees })
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Employee, RosterError> {
        self.get(id)
            .ok_or_else(|| RosterError::UnknownEmployee(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
