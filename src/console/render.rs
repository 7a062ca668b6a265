use crate::checklist::{ChecklistSession, ChecklistStage, StageState};
use crate::orders::{compare, AssignmentEditor, Employee, Role, Roster, WorkOrder};
use std::fmt::Write;

pub fn dashboard(orders: &[&WorkOrder], role: Role, current_user: &Employee) -> String {
    let mut out = String::new();
    match role {
        Role::TeamLead => out.push_str("== All work orders ==\n"),
        Role::Employee => {
            let _ = writeln!(out, "== Hello, {} - your tasks ==", current_user.name);
        }
    }

    if orders.is_empty() {
        out.push_str("No work orders\n");
        return out;
    }

    for (position, order) in orders.iter().enumerate() {
        let _ = writeln!(
            out,
            "#{} {}  [{}]  {}",
            position + 1,
            order.id,
            order.status,
            order.title
        );
        let _ = write!(out, "    {}", order.order_type);
        if let Some(device) = order.primary_device() {
            let _ = write!(out, " | {} @ {}", device.model, device.location);
            if order.devices.len() > 1 {
                let _ = write!(out, " +{}", order.devices.len() - 1);
            }
        }
        out.push('\n');
        let _ = write!(out, "    Assigned: {}", assignees(&order.assigned_to));
        if role.can_assign() {
            let action = if order.assigned_to.is_empty() { "assign" } else { "reassign" };
            let _ = write!(out, "  ({action} #{})", position + 1);
        }
        out.push('\n');
    }
    out
}

pub fn assignment_editor(order: &WorkOrder, editor: &AssignmentEditor, roster: &Roster) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Assign {} ==", order.id);
    let _ = writeln!(out, "{}", order.title);
    for employee in roster.iter() {
        let mark = if editor.is_selected(&employee.id) { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {} {}", employee.id, employee.name);
    }
    out.push_str("toggle <EMPLOYEE_ID>, save, cancel\n");
    out
}

/// Reference details of an order: device, config changes, parts, assignees.
pub fn order_details(order: &WorkOrder) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", order.id, order.title);
    let _ = writeln!(out, "Type: {}    Status: {}", order.order_type, order.status);
    if order.devices.is_empty() {
        out.push_str("Device: none linked\n");
    }
    for device in &order.devices {
        let _ = writeln!(out, "Device: {} @ {} (SN {})", device.model, device.location, device.sn);
    }
    let _ = writeln!(out, "Assigned: {}", assignees(&order.assigned_to));
    out.push_str(&config_changes(order));
    out.push_str(&required_parts(order));
    out
}

pub fn checklist(order: &WorkOrder, session: &ChecklistSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", order.title);

    let Some(device) = order.primary_device() else {
        out.push_str("Error: this work order has no linked device.\n");
        out.push_str("back to return\n");
        return out;
    };
    let _ = writeln!(out, "Model: {}", device.model);
    let _ = writeln!(out, "Location: {}", device.location);
    let _ = writeln!(out, "SN: {}", device.sn);

    for view in session.stages() {
        let marker = match view.state {
            StageState::Done => "done",
            StageState::Active => "active",
            StageState::Locked => "locked",
        };
        let _ = writeln!(out, "[{}] {}. {}", marker, view.stage.number(), view.stage.title());
        if view.open {
            for line in stage_body(order, view.stage).lines() {
                let _ = writeln!(out, "      {line}");
            }
        }
    }
    out
}

fn stage_body(order: &WorkOrder, stage: ChecklistStage) -> String {
    match stage {
        ChecklistStage::Prep => {
            let mut body = config_changes(order);
            body.push_str(&required_parts(order));
            body.push_str("parts: confirm parts received\n");
            body
        }
        ChecklistStage::LocateVerify => {
            "indicator blink|steady: remote server indicator\nsn <SERIAL>: scan or enter the SN\n".to_string()
        }
        ChecklistStage::Operate => {
            "Slots: DIMM_A1-A4, DIMM_B1-B4\nscan <CODE>: scan a part barcode\ndone: hardware operation complete\n"
                .to_string()
        }
        ChecklistStage::Close => {
            "Finish out-of-band setup (iDRAC/iLO) per the standard procedure\nclose: close the work order\nfault: report an error\n"
                .to_string()
        }
    }
}

fn config_changes(order: &WorkOrder) -> String {
    let mut out = String::from("Configuration:\n");
    for diff in compare(&order.current_config, &order.required_config) {
        let _ = writeln!(out, "  {}: {}", diff.component, list_or_none(diff.current));
        if diff.is_pending_change() {
            let _ = writeln!(out, "    -> required: {}", list_or_none(diff.required));
        }
    }
    out
}

fn required_parts(order: &WorkOrder) -> String {
    let mut out = String::from("Required parts:\n");
    if order.required_parts.is_empty() {
        out.push_str("  none\n");
    }
    for item in &order.required_parts {
        let _ = writeln!(
            out,
            "  {} - {} (x{})  storage: {}",
            item.part.kind, item.part.model, item.quantity, item.part.location
        );
    }
    out
}

fn assignees(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "Unassigned".to_string();
    }
    employees
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
