//! Assistant Core - Multi-tenant conversational assistant core
//!
//! This crate splits assistant replies into short chat messages, turns
//! list-like replies into one message per item, and harvests structured
//! fields (a lead, a patient intake) from user utterances according to a
//! per-tenant schema.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
