//! Rust client for the Card Grading API.

pub mod client;

pub use client::{ApiReply, Envelope, GradingClient};
