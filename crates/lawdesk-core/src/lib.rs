//! Core types and trait definitions for the lawdesk case-management service.
//!
//! No HTTP or database code lives here. The crate owns the domain model
//! (cases, parties, templates, the firm directory), the storage and render
//! abstractions, the template data mapper and the petition orchestrator.

// Impls use `async fn` against trait signatures that spell out `Send`.
#![allow(async_fn_in_trait)]

pub mod answers;
pub mod artifacts;
pub mod case;
pub mod directory;
pub mod error;
pub mod mapper;
pub mod orchestrator;
pub mod party;
pub mod petition;
pub mod render;
pub mod store;
pub mod template;

pub use error::{Error, Result};
