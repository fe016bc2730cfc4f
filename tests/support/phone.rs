//! A telephone call modelled as an immutable object.
//!
//! The handset is idle (`OffHook`), ringing, or connected. Time spent connected is
//! accumulated when the call ends, and an optional maximum call length hangs up a
//! call on the next event or tick once exceeded.

use super::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use statewise::builder::MachineBuilder;
use statewise::builder::BuildError;
use statewise::core::{Guard, Matcher, StateObject};
use statewise::machine::StateMachine;
use statewise::observe::Observer;
use statewise::{action_enum, state_enum};
use std::sync::Arc;

state_enum! {
    pub enum CallState {
        OffHook,
        Ringing,
        Connected,
    }
}

action_enum! {
    pub enum PhoneAction => PhoneActionKind {
        CallDialed { number: String },
        CallConnected,
        LeftMessage { message: String },
        HungUp,
    }
}

pub type PhoneMachine = StateMachine<CallState, PhoneAction, Phone>;

#[derive(Clone, Debug, PartialEq)]
pub struct Phone {
    pub state: CallState,
    pub calling_number: Option<String>,
    pub left_message: Option<String>,
    pub started: Option<DateTime<Utc>>,
    pub accumulated: Duration,
}

impl Phone {
    pub fn idle() -> Self {
        Self {
            state: CallState::OffHook,
            calling_number: None,
            left_message: None,
            started: None,
            accumulated: Duration::zero(),
        }
    }

    pub fn with_calling_number(self, calling_number: Option<String>) -> Self {
        Self {
            calling_number,
            ..self
        }
    }

    pub fn with_left_message(self, message: &str) -> Self {
        Self {
            left_message: Some(message.to_string()),
            ..self
        }
    }

    pub fn with_started(self, started: Option<DateTime<Utc>>) -> Self {
        Self { started, ..self }
    }

    /// Close the running call, if any, and add its length to the total.
    pub fn account_accumulated(self, now: DateTime<Utc>) -> Self {
        match self.started {
            Some(started) => Self {
                started: None,
                accumulated: self.accumulated + (now - started),
                ..self
            },
            None => self,
        }
    }
}

impl StateObject for Phone {
    type State = CallState;

    fn state(&self) -> CallState {
        self.state
    }

    fn with_state(self, state: CallState) -> Self {
        Self { state, ..self }
    }

    fn identify(&self) -> String {
        format!(
            "phone[{}]",
            self.calling_number.as_deref().unwrap_or("idle")
        )
    }
}

fn call_too_long(clock: Arc<dyn Clock>, max_call: Option<Duration>) -> Guard<Phone> {
    Guard::labelled("call too long", move |phone: &Phone| {
        match (phone.started, max_call) {
            (Some(started), Some(max)) => clock.now() - started > max,
            _ => false,
        }
    })
}

/// Build the phone call machine. `max_call` of `None` never times a call out.
pub fn phone_machine(
    clock: Arc<dyn Clock>,
    max_call: Option<Duration>,
    observer: Option<Arc<dyn Observer>>,
) -> Result<PhoneMachine, BuildError> {
    let mut builder = MachineBuilder::<CallState, PhoneAction, Phone>::for_objects("PhoneCall");
    if let Some(observer) = observer {
        builder.observer(observer);
    }

    let on_hook_clock = clock.clone();
    builder
        .from_state(CallState::OffHook)
        .on_entry(move |phone: Phone| {
            phone
                .with_calling_number(None)
                .account_accumulated(on_hook_clock.now())
        })
        .permit_with(
            PhoneActionKind::CallDialed,
            CallState::Ringing,
            |action, phone: Phone| match action {
                PhoneAction::CallDialed { number } => phone.with_calling_number(Some(number.clone())),
                _ => phone,
            },
        );

    builder
        .from_state(CallState::Ringing)
        .permit_with(PhoneActionKind::HungUp, CallState::OffHook, |_, phone: Phone| {
            phone.with_calling_number(None)
        })
        .permit(PhoneActionKind::CallConnected, CallState::Connected);

    let entry_clock = clock.clone();
    let exit_clock = clock.clone();
    builder
        .from_state(CallState::Connected)
        .on_entry(move |phone: Phone| {
            assert!(phone.started.is_none(), "No call should be active");
            phone.with_started(Some(entry_clock.now()))
        })
        .on_exit(move |phone: Phone| {
            assert!(phone.started.is_some(), "A call should be active");
            phone.account_accumulated(exit_clock.now())
        })
        .permit_if(Matcher::Any, CallState::OffHook, call_too_long(clock, max_call))
        .permit_with(
            PhoneActionKind::LeftMessage,
            CallState::OffHook,
            |action, phone: Phone| match action {
                PhoneAction::LeftMessage { message } => phone.with_left_message(message),
                _ => phone,
            },
        )
        .permit(PhoneActionKind::HungUp, CallState::OffHook);

    builder.build()
}
