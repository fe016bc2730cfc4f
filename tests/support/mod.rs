//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod clock;
pub mod phone;
