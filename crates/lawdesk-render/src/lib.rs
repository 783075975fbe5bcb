//! HTTP client for the external template render service.
//!
//! One [`RenderClient`] is built at start-up and shared; each call makes a
//! single bounded attempt and reports every failure as a
//! [`RenderFailure`](lawdesk_core::render::RenderFailure).

mod client;
pub mod error;

pub use client::{RenderClient, RenderConfig};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
