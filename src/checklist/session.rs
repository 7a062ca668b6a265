use crate::checklist::state_machine::{
    Checklist, ChecklistEvent, ChecklistStage, Closeout, Progress,
};
use crate::orders::{WorkOrder, WorkOrderStore};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChecklistError {
    #[error("Work order {0} has no linked device")]
    NoDevice(String),
    #[error("Stage {stage} is locked, finish stage {current} first")]
    StageLocked {
        stage: ChecklistStage,
        current: ChecklistStage,
    },
    #[error("Stage {0} is already completed")]
    StageCompleted(ChecklistStage),
    #[error("Stage {0} did not accept the action")]
    NotAccepted(ChecklistStage),
    #[error("Checklist is already closed out")]
    Finished,
    #[error("Work order {0} is no longer in the store")]
    UnknownOrder(String),
}

/// Remote server indicator modes offered in stage 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    Blink,
    Steady,
}

impl FromStr for IndicatorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blink" => Ok(IndicatorMode::Blink),
            "steady" => Ok(IndicatorMode::Steady),
            other => Err(format!("unknown indicator mode '{other}' (expected blink or steady)")),
        }
    }
}

impl fmt::Display for IndicatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorMode::Blink => f.write_str("blink"),
            IndicatorMode::Steady => f.write_str("steady"),
        }
    }
}

/// User-facing message produced by a checklist action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PartsConfirmed,
    IndicatorSet(IndicatorMode),
    SerialVerified,
    SerialMismatch,
    PartVerified(String),
    HardwareDone,
    OrderCompleted,
    ErrorReported,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PartsConfirmed => write!(f, "Parts received, proceed to locate the server"),
            Notice::IndicatorSet(mode) => write!(f, "Server indicator set to {mode}"),
            Notice::SerialVerified => write!(f, "SN verified"),
            Notice::SerialMismatch => write!(f, "SN does not match, scan or enter it again"),
            Notice::PartVerified(code) => write!(f, "Part {code} verified"),
            Notice::HardwareDone => write!(f, "Hardware operation recorded, close out the order"),
            Notice::OrderCompleted => write!(f, "Work order completed"),
            Notice::ErrorReported => write!(f, "Error reported"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Done,
    Active,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageView {
    pub stage: ChecklistStage,
    pub state: StageState,
    pub open: bool,
}

/// View-local checklist state for one opened work order.
///
/// Nothing here outlives the detail view: opening the order again starts a
/// new session at stage 1, whatever status the store holds. Only the two
/// closeout actions write to the store.
///
/// Panel state is decided per transition, not once when the view opens:
/// completing a stage opens the panel of the stage it unlocks. A panel that
/// was locked when the order opened would otherwise stay collapsed until the
/// technician expands it. Completed panels keep whatever the user left.
#[derive(Debug)]
pub struct ChecklistSession {
    order_id: String,
    checklist: Option<Checklist>,
    open_panels: [bool; 4],
}

impl ChecklistSession {
    pub fn open(order: &WorkOrder) -> Self {
        let checklist = order
            .primary_device()
            .map(|device| Checklist::new(order.id.clone(), device.clone()));
        if checklist.is_none() {
            tracing::debug!(order_id = %order.id, "Opened work order without devices");
        }
        Self {
            order_id: order.id.clone(),
            checklist,
            open_panels: [true, false, false, false],
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn has_device(&self) -> bool {
        self.checklist.is_some()
    }

    /// `None` for an order without devices, where no stage is reachable.
    pub fn progress(&self) -> Option<Progress> {
        self.checklist.as_ref().map(Checklist::progress)
    }

    pub fn current_stage(&self) -> Option<ChecklistStage> {
        match self.progress()? {
            Progress::At(stage) => Some(stage),
            Progress::Finished(_) => None,
        }
    }

    pub fn stage_view(&self, stage: ChecklistStage) -> StageView {
        let state = match self.progress() {
            None => StageState::Locked,
            Some(Progress::Finished(_)) => StageState::Done,
            Some(Progress::At(current)) if stage < current => StageState::Done,
            Some(Progress::At(current)) if stage == current => StageState::Active,
            Some(Progress::At(_)) => StageState::Locked,
        };
        StageView {
            stage,
            state,
            open: state != StageState::Locked && self.open_panels[stage.index()],
        }
    }

    pub fn stages(&self) -> Vec<StageView> {
        ChecklistStage::ALL
            .iter()
            .map(|stage| self.stage_view(*stage))
            .collect()
    }

    /// Expand or collapse a stage panel. Pure view toggle; locked stages
    /// refuse. Returns whether the panel is now open.
    pub fn toggle_panel(&mut self, stage: ChecklistStage) -> Result<bool, ChecklistError> {
        let view = self.stage_view(stage);
        if view.state == StageState::Locked {
            return Err(self.locked_error(stage));
        }
        let slot = &mut self.open_panels[stage.index()];
        *slot = !*slot;
        Ok(*slot)
    }

    pub fn confirm_parts(&mut self) -> Result<Notice, ChecklistError> {
        self.advance(ChecklistStage::Prep, &ChecklistEvent::ConfirmPartsReceived)?;
        Ok(Notice::PartsConfirmed)
    }

    /// Stage 2 helper with no effect on progress.
    pub fn set_indicator(&mut self, mode: IndicatorMode) -> Result<Notice, ChecklistError> {
        self.ensure_unlocked(ChecklistStage::LocateVerify)?;
        tracing::info!(order_id = %self.order_id, mode = %mode, "Server indicator set");
        Ok(Notice::IndicatorSet(mode))
    }

    /// Compare `scanned` with the first device's serial. A mismatch is a
    /// notice, not an error, and leaves the checklist at stage 2.
    pub fn verify_serial(&mut self, scanned: &str) -> Result<Notice, ChecklistError> {
        let event = ChecklistEvent::VerifySerial {
            scanned: scanned.to_string(),
        };
        match self.advance(ChecklistStage::LocateVerify, &event)? {
            Progress::At(ChecklistStage::LocateVerify) => Ok(Notice::SerialMismatch),
            _ => Ok(Notice::SerialVerified),
        }
    }

    /// Stage 3 part scan. The code is echoed back but not checked against
    /// the required parts.
    pub fn verify_part_scan(&mut self, code: &str) -> Result<Notice, ChecklistError> {
        self.ensure_unlocked(ChecklistStage::Operate)?;
        let code = code.trim().to_string();
        tracing::info!(order_id = %self.order_id, part = %code, "Part scan accepted");
        Ok(Notice::PartVerified(code))
    }

    pub fn complete_hardware(&mut self) -> Result<Notice, ChecklistError> {
        self.advance(ChecklistStage::Operate, &ChecklistEvent::HardwareComplete)?;
        Ok(Notice::HardwareDone)
    }

    pub fn close_order(&mut self, store: &mut WorkOrderStore) -> Result<Notice, ChecklistError> {
        self.finish(store, &ChecklistEvent::CloseOrder)
    }

    pub fn report_error(&mut self, store: &mut WorkOrderStore) -> Result<Notice, ChecklistError> {
        self.finish(store, &ChecklistEvent::ReportError)
    }

    fn finish(
        &mut self,
        store: &mut WorkOrderStore,
        event: &ChecklistEvent,
    ) -> Result<Notice, ChecklistError> {
        self.ensure_current(ChecklistStage::Close)?;
        let order = store
            .get(&self.order_id)
            .cloned()
            .ok_or_else(|| ChecklistError::UnknownOrder(self.order_id.clone()))?;

        let closeout = match self.advance(ChecklistStage::Close, event)? {
            Progress::Finished(closeout) => closeout,
            Progress::At(stage) => return Err(ChecklistError::NotAccepted(stage)),
        };
        store.replace(WorkOrder {
            status: closeout.status(),
            ..order
        });

        Ok(match closeout {
            Closeout::Completed => Notice::OrderCompleted,
            Closeout::Faulted => Notice::ErrorReported,
        })
    }

    /// Feed a transition event to the machine, only while `stage` is the
    /// active stage, and open the next panel when it unlocks.
    fn advance(
        &mut self,
        stage: ChecklistStage,
        event: &ChecklistEvent,
    ) -> Result<Progress, ChecklistError> {
        self.ensure_current(stage)?;
        let checklist = self
            .checklist
            .as_mut()
            .ok_or_else(|| ChecklistError::NoDevice(self.order_id.clone()))?;
        let progress = checklist.handle(event);
        if let Progress::At(next) = progress {
            if next > stage {
                self.open_panels[next.index()] = true;
            }
        }
        Ok(progress)
    }

    fn ensure_current(&self, stage: ChecklistStage) -> Result<(), ChecklistError> {
        match self.active_stage()? {
            current if stage > current => Err(self.locked_error(stage)),
            current if stage < current => Err(ChecklistError::StageCompleted(stage)),
            _ => Ok(()),
        }
    }

    fn ensure_unlocked(&self, stage: ChecklistStage) -> Result<(), ChecklistError> {
        let current = self.active_stage()?;
        if stage > current {
            return Err(self.locked_error(stage));
        }
        Ok(())
    }

    fn active_stage(&self) -> Result<ChecklistStage, ChecklistError> {
        match self.progress() {
            None => Err(ChecklistError::NoDevice(self.order_id.clone())),
            Some(Progress::Finished(_)) => Err(ChecklistError::Finished),
            Some(Progress::At(current)) => Ok(current),
        }
    }

    fn locked_error(&self, stage: ChecklistStage) -> ChecklistError {
        match self.progress() {
            Some(Progress::At(current)) => ChecklistError::StageLocked { stage, current },
            Some(Progress::Finished(_)) => ChecklistError::Finished,
            None => ChecklistError::NoDevice(self.order_id.clone()),
        }
    }
}
