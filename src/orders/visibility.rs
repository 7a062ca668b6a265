use crate::orders::types::{Employee, WorkOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewing role of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Sees every work order and can edit assignments
    TeamLead,
    /// Sees only orders assigned to the current user
    Employee,
}

impl Role {
    pub fn toggled(self) -> Self {
        match self {
            Role::TeamLead => Role::Employee,
            Role::Employee => Role::TeamLead,
        }
    }

    pub fn can_assign(self) -> bool {
        matches!(self, Role::TeamLead)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::TeamLead => f.write_str("team-lead"),
            Role::Employee => f.write_str("employee"),
        }
    }
}

/// Orders the given role may see, in store order.
///
/// A team lead sees everything; an employee sees the orders whose assignee
/// list contains `current_user` by id.
pub fn visible<'a>(
    orders: &'a [WorkOrder],
    role: Role,
    current_user: &Employee,
) -> Vec<&'a WorkOrder> {
    match role {
        Role::TeamLead => orders.iter().collect(),
        Role::Employee => orders
            .iter()
            .filter(|order| order.is_assigned_to(&current_user.id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn test_team_lead_sees_all_in_order() {
        let seed = SeedData::builtin();
        let (roster, store) = seed.into_parts().unwrap();
        let user = roster.get("emp-004").unwrap();

        let seen: Vec<&str> = visible(store.all(), Role::TeamLead, user)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        let all: Vec<&str> = store.all().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_employee_sees_only_assigned() {
        let (roster, store) = SeedData::builtin().into_parts().unwrap();
        for user in roster.iter() {
            let seen = visible(store.all(), Role::Employee, user);
            for order in store.all() {
                let listed = seen.iter().any(|o| o.id == order.id);
                assert_eq!(listed, order.is_assigned_to(&user.id), "{} / {}", user.id, order.id);
            }
        }
    }

    #[test]
    fn test_employee_with_no_orders_gets_empty_list() {
        let (roster, store) = SeedData::builtin().into_parts().unwrap();
        let unassigned = roster.get("emp-004").unwrap();
        assert!(visible(store.all(), Role::Employee, unassigned).is_empty());
    }

    #[test]
    fn test_role_toggle() {
        assert_eq!(Role::TeamLead.toggled(), Role::Employee);
        assert_eq!(Role::Employee.toggled(), Role::TeamLead);
        assert!(!Role::Employee.can_assign());
    }
}
