//! Infrastructure adapters. Implement outbound ports and the inbound UI.
//!
//! AI provider, clock, report files, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod clock;
pub mod export;
pub mod ui;
