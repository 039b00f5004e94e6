//! PagerDuty alert dispatcher.
//!
//! A library for sending one alert per invocation to the PagerDuty Events
//! API, either from a raw payload or rendered from a workflow execution's
//! metadata.

pub mod alert;
pub mod config;
pub mod execution;
pub mod render;
pub mod time;
pub mod transport;
