//! Transport layer for delivering alerts over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`]) and their per-call construction ([`Connector`])
//! - Production implementations ([`ReqwestClient`], [`ReqwestConnector`])
//! - Connection options shared across invocations ([`ConnectionOptions`])

mod client;
mod error;
mod options;
mod wire;


pub use client::{ReqwestClient, ReqwestConnector};
pub use error::HttpError;
pub use options::{Auth, ConnectionOptions, ConnectionOverrides, ProxyOptions};
pub use wire::{Connector, HttpClient, HttpRequest, HttpResponse};
