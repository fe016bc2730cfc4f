//! Walks a phone through a call and a timed-out call with tracing output enabled.
//!
//! Run with `RUST_LOG=debug cargo run --example phone_call` to see guard feedback.

#[path = "../tests/support/mod.rs"]
mod support;

use chrono::Duration;
use std::sync::Arc;
use support::clock::ManualClock;
use support::phone::{phone_machine, Phone, PhoneAction};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let clock = Arc::new(ManualClock::default());
    let machine = phone_machine(clock.clone(), Some(Duration::hours(1)), None)?;

    let dialed = PhoneAction::CallDialed {
        number: "333-33-33".to_string(),
    };
    let ringing = machine
        .transition(&Phone::idle(), dialed)
        .ok_or("dialing an idle phone should ring")?;
    let connected = machine
        .transition(&ringing, PhoneAction::CallConnected)
        .ok_or("a ringing phone should connect")?;

    clock.advance(Duration::minutes(5));
    let done = machine
        .transition(
            &connected,
            PhoneAction::LeftMessage {
                message: "call me back".to_string(),
            },
        )
        .ok_or("a connected phone should take a message")?;
    println!("after message: {done:?}");

    if machine.tick(&done).is_none() {
        println!("idle phone ignores ticks");
    }

    clock.advance(Duration::hours(2));
    match machine.tick(&connected) {
        Some(timed_out) => println!("timed out: {timed_out:?}"),
        None => println!("call still running"),
    }

    Ok(())
}
