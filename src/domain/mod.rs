//! Core domain types and logic.

pub mod record;
pub mod rules;
pub mod template;
pub mod config;
pub mod greeks;
pub mod error;
