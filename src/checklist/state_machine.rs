use crate::orders::{Device, WorkOrderStatus};
use serde::{Deserialize, Serialize};
use statig::blocking::StateMachine;
use statig::prelude::*;
use std::fmt;

/// Events that can move the checklist forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecklistEvent {
    ConfirmPartsReceived,
    VerifySerial { scanned: String },
    HardwareComplete,
    CloseOrder,
    ReportError,
}

/// The four checklist stages, in the order they unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChecklistStage {
    Prep = 1,
    LocateVerify = 2,
    Operate = 3,
    Close = 4,
}

impl ChecklistStage {
    pub const ALL: [ChecklistStage; 4] = [
        ChecklistStage::Prep,
        ChecklistStage::LocateVerify,
        ChecklistStage::Operate,
        ChecklistStage::Close,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == number)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChecklistStage::Prep => "Preparation: check details and collect parts",
            ChecklistStage::LocateVerify => "Locate and verify the server",
            ChecklistStage::Operate => "Hardware operation",
            ChecklistStage::Close => "Close out the work order",
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl fmt::Display for ChecklistStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// How a finished checklist ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Closeout {
    Completed,
    Faulted,
}

impl Closeout {
    pub fn status(self) -> WorkOrderStatus {
        match self {
            Closeout::Completed => WorkOrderStatus::Completed,
            Closeout::Faulted => WorkOrderStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    At(ChecklistStage),
    Finished(Closeout),
}

/// Context of the checklist state machine: the order being worked and the
/// device whose serial gates stage 2.
pub struct ChecklistMachine {
    order_id: String,
    device: Device,
}

#[state_machine(initial = "State::prep()", state(derive(Debug, Clone, PartialEq, Eq)))]
impl ChecklistMachine {
    #[state]
    fn prep(&mut self, event: &ChecklistEvent) -> Outcome<State> {
        match event {
            ChecklistEvent::ConfirmPartsReceived => {
                tracing::info!(order_id = %self.order_id, "Parts received, locate and verify unlocked");
                Transition(State::locate_verify())
            }
            _ => Handled,
        }
    }

    #[state]
    fn locate_verify(&mut self, event: &ChecklistEvent) -> Outcome<State> {
        match event {
            ChecklistEvent::VerifySerial { scanned } => {
                if self.device.serial_matches(scanned) {
                    tracing::info!(
                        order_id = %self.order_id,
                        sn = %self.device.sn,
                        "Serial verified, hardware operation unlocked"
                    );
                    Transition(State::operate())
                } else {
                    tracing::warn!(
                        order_id = %self.order_id,
                        expected = %self.device.sn,
                        scanned = %scanned,
                        "Serial mismatch"
                    );
                    Handled
                }
            }
            _ => Handled,
        }
    }

    #[state]
    fn operate(&mut self, event: &ChecklistEvent) -> Outcome<State> {
        match event {
            ChecklistEvent::HardwareComplete => {
                tracing::info!(order_id = %self.order_id, "Hardware operation complete, closeout unlocked");
                Transition(State::close())
            }
            _ => Handled,
        }
    }

    #[state]
    fn close(&mut self, event: &ChecklistEvent) -> Outcome<State> {
        match event {
            ChecklistEvent::CloseOrder => {
                tracing::info!(order_id = %self.order_id, "Work order closed");
                Transition(State::completed())
            }
            ChecklistEvent::ReportError => {
                tracing::info!(order_id = %self.order_id, "Work order error reported");
                Transition(State::faulted())
            }
            _ => Handled,
        }
    }

    #[state]
    fn completed(event: &ChecklistEvent) -> Outcome<State> {
        tracing::debug!(?event, "Checklist already completed, event ignored");
        Handled
    }

    #[state]
    fn faulted(event: &ChecklistEvent) -> Outcome<State> {
        tracing::debug!(?event, "Checklist already faulted, event ignored");
        Handled
    }
}

/// Stage progression for one opened work order.
pub struct Checklist {
    machine: StateMachine<ChecklistMachine>,
}

impl Checklist {
    pub fn new(order_id: impl Into<String>, device: Device) -> Self {
        let machine = ChecklistMachine {
            order_id: order_id.into(),
            device,
        };
        Self {
            machine: machine.state_machine(),
        }
    }

    pub fn handle(&mut self, event: &ChecklistEvent) -> Progress {
        self.machine.handle(event);
        self.progress()
    }

    pub fn progress(&self) -> Progress {
        match self.machine.state() {
            State::Prep {} => Progress::At(ChecklistStage::Prep),
            State::LocateVerify {} => Progress::At(ChecklistStage::LocateVerify),
            State::Operate {} => Progress::At(ChecklistStage::Operate),
            State::Close {} => Progress::At(ChecklistStage::Close),
            State::Completed {} => Progress::Finished(Closeout::Completed),
            State::Faulted {} => Progress::Finished(Closeout::Faulted),
        }
    }
}

impl fmt::Debug for Checklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checklist")
            .field("progress", &self.progress())
            .finish()
    }
}
