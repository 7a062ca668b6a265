use super::*;
use crate::orders::{WorkOrderStatus, WorkOrderStore};
use crate::seed::SeedData;

const ORDER_ID: &str = "WO-20240701-001";

fn store() -> WorkOrderStore {
    let (_, store) = SeedData::builtin().into_parts().unwrap();
    store
}

fn session(store: &WorkOrderStore) -> ChecklistSession {
    ChecklistSession::open(store.get(ORDER_ID).unwrap())
}

fn session_at_close(store: &WorkOrderStore) -> ChecklistSession {
    let mut s = session(store);
    s.confirm_parts().unwrap();
    s.verify_serial("SN9ABCDEF123").unwrap();
    s.complete_hardware().unwrap();
    assert_eq!(s.current_stage(), Some(ChecklistStage::Close));
    s
}

#[test]
fn test_checklist_starts_at_prep_with_first_panel_open() {
    let store = store();
    let s = session(&store);

    assert_eq!(s.current_stage(), Some(ChecklistStage::Prep));
    let views = s.stages();
    assert_eq!(views[0].state, StageState::Active);
    assert!(views[0].open);
    for view in &views[1..] {
        assert_eq!(view.state, StageState::Locked);
        assert!(!view.open);
    }
}

#[test]
fn test_confirm_parts_unlocks_locate_verify() {
    let store = store();
    let mut s = session(&store);

    assert_eq!(s.confirm_parts().unwrap(), Notice::PartsConfirmed);
    assert_eq!(s.current_stage(), Some(ChecklistStage::LocateVerify));
    assert_eq!(s.stage_view(ChecklistStage::Prep).state, StageState::Done);
    assert!(s.stage_view(ChecklistStage::LocateVerify).open);
}

#[test]
fn test_serial_verification_is_case_insensitive() {
    let store = store();
    let mut s = session(&store);
    s.confirm_parts().unwrap();

    assert_eq!(s.verify_serial("sn9abcdef123").unwrap(), Notice::SerialVerified);
    assert_eq!(s.current_stage(), Some(ChecklistStage::Operate));
}

#[test]
fn test_serial_mismatch_stays_at_stage_two_and_can_retry() {
    let store = store();
    let mut s = session(&store);
    s.confirm_parts().unwrap();

    for _ in 0..5 {
        assert_eq!(s.verify_serial("SN9ABCDEF124").unwrap(), Notice::SerialMismatch);
        assert_eq!(s.current_stage(), Some(ChecklistStage::LocateVerify));
    }
    assert_eq!(s.verify_serial("SN9ABCDEF123").unwrap(), Notice::SerialVerified);
    assert_eq!(store.get(ORDER_ID).unwrap().status, WorkOrderStatus::Pending);
}

#[test]
fn test_locked_stages_reject_actions() {
    let mut store = store();
    let mut s = session(&store);

    assert_eq!(
        s.verify_serial("SN9ABCDEF123"),
        Err(ChecklistError::StageLocked {
            stage: ChecklistStage::LocateVerify,
            current: ChecklistStage::Prep,
        })
    );
    assert!(matches!(s.complete_hardware(), Err(ChecklistError::StageLocked { .. })));
    assert!(matches!(s.close_order(&mut store), Err(ChecklistError::StageLocked { .. })));
    assert!(matches!(s.set_indicator(IndicatorMode::Blink), Err(ChecklistError::StageLocked { .. })));
    assert!(matches!(s.verify_part_scan("MEM-1"), Err(ChecklistError::StageLocked { .. })));
    assert!(s.toggle_panel(ChecklistStage::Close).is_err());

    assert_eq!(s.current_stage(), Some(ChecklistStage::Prep));
    assert_eq!(store.get(ORDER_ID).unwrap().status, WorkOrderStatus::Pending);
}

#[test]
fn test_completed_stage_actions_cannot_revert_progress() {
    let store = store();
    let mut s = session(&store);
    s.confirm_parts().unwrap();
    s.verify_serial("SN9ABCDEF123").unwrap();
    s.complete_hardware().unwrap();

    assert_eq!(
        s.confirm_parts(),
        Err(ChecklistError::StageCompleted(ChecklistStage::Prep))
    );
    assert_eq!(
        s.verify_serial("SN9ABCDEF123"),
        Err(ChecklistError::StageCompleted(ChecklistStage::LocateVerify))
    );
    assert_eq!(s.current_stage(), Some(ChecklistStage::Close));
}

#[test]
fn test_helpers_on_unlocked_stages_do_not_change_progress() {
    let store = store();
    let mut s = session(&store);
    s.confirm_parts().unwrap();

    assert_eq!(
        s.set_indicator(IndicatorMode::Steady).unwrap(),
        Notice::IndicatorSet(IndicatorMode::Steady)
    );
    s.verify_serial("SN9ABCDEF123").unwrap();
    assert_eq!(
        s.verify_part_scan(" NOT-A-REQUIRED-PART ").unwrap(),
        Notice::PartVerified("NOT-A-REQUIRED-PART".to_string())
    );
    // Indicator stays usable after its stage completes
    assert!(s.set_indicator(IndicatorMode::Blink).is_ok());
    assert_eq!(s.current_stage(), Some(ChecklistStage::Operate));
}

#[test]
fn test_close_order_marks_completed() {
    let mut store = store();
    let mut s = session_at_close(&store);

    assert_eq!(s.close_order(&mut store).unwrap(), Notice::OrderCompleted);
    assert_eq!(s.progress(), Some(Progress::Finished(Closeout::Completed)));
    assert_eq!(store.get(ORDER_ID).unwrap().status, WorkOrderStatus::Completed);
}

#[test]
fn test_report_error_marks_error_and_is_one_shot() {
    let mut store = store();
    let mut s = session_at_close(&store);

    assert_eq!(s.report_error(&mut store).unwrap(), Notice::ErrorReported);
    assert_eq!(store.get(ORDER_ID).unwrap().status, WorkOrderStatus::Error);

    assert_eq!(s.close_order(&mut store), Err(ChecklistError::Finished));
    assert_eq!(store.get(ORDER_ID).unwrap().status, WorkOrderStatus::Error);
}

#[test]
fn test_reopening_restarts_at_prep_but_keeps_status() {
    let mut store = store();
    let mut s = session_at_close(&store);
    s.close_order(&mut store).unwrap();

    let reopened = session(&store);
    assert_eq!(reopened.current_stage(), Some(ChecklistStage::Prep));
    assert_eq!(store.get(ORDER_ID).unwrap().status, WorkOrderStatus::Completed);
}

#[test]
fn test_panel_toggle_is_view_only() {
    let store = store();
    let mut s = session(&store);
    s.confirm_parts().unwrap();

    assert_eq!(s.toggle_panel(ChecklistStage::Prep), Ok(false));
    assert_eq!(s.toggle_panel(ChecklistStage::Prep), Ok(true));
    assert_eq!(s.toggle_panel(ChecklistStage::LocateVerify), Ok(false));
    assert_eq!(s.current_stage(), Some(ChecklistStage::LocateVerify));
}

#[test]
fn test_order_without_devices_bypasses_checklist() {
    let mut store = store();
    let mut order = store.get(ORDER_ID).unwrap().clone();
    order.devices.clear();
    store.replace(order);

    let mut s = session(&store);
    assert!(!s.has_device());
    assert_eq!(s.progress(), None);
    assert!(s.stages().iter().all(|v| v.state == StageState::Locked));
    assert_eq!(
        s.confirm_parts(),
        Err(ChecklistError::NoDevice(ORDER_ID.to_string()))
    );
    assert!(s.close_order(&mut store).is_err());
}

#[test]
fn test_only_first_device_serial_is_checked() {
    let mut store = store();
    let mut order = store.get(ORDER_ID).unwrap().clone();
    let mut second = order.devices[0].clone();
    second.sn = "SECOND-DEVICE".to_string();
    order.devices.push(second);
    store.replace(order);

    let mut s = session(&store);
    s.confirm_parts().unwrap();
    assert_eq!(s.verify_serial("SECOND-DEVICE").unwrap(), Notice::SerialMismatch);
    assert_eq!(s.verify_serial("SN9ABCDEF123").unwrap(), Notice::SerialVerified);
}

#[test]
fn test_raw_state_machine_ignores_out_of_order_events() {
    let device = store().get(ORDER_ID).unwrap().devices[0].clone();
    let mut checklist = Checklist::new(ORDER_ID, device);

    assert_eq!(
        checklist.handle(&ChecklistEvent::CloseOrder),
        Progress::At(ChecklistStage::Prep)
    );
    assert_eq!(
        checklist.handle(&ChecklistEvent::ConfirmPartsReceived),
        Progress::At(ChecklistStage::LocateVerify)
    );
    assert_eq!(
        checklist.handle(&ChecklistEvent::HardwareComplete),
        Progress::At(ChecklistStage::LocateVerify)
    );
}

#[test]
fn test_stage_numbers_round_trip() {
    for stage in ChecklistStage::ALL {
        assert_eq!(ChecklistStage::from_number(stage.number()), Some(stage));
    }
    assert_eq!(ChecklistStage::from_number(5), None);
}
