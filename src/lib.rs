//! # crmd
//!
//! A minimal contact-relationship-management backend: a JSON HTTP service
//! over a single-file SQLite store with four entities — contacts,
//! interactions, AI notes, and scheduled followups.
//!
//! ```text
//! ┌────────┐   ┌─────────────┐   ┌──────────┐
//! │ Client │──▶│ HTTP (axum) │──▶│  SQLite  │
//! └────────┘   └─────────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! crmd init      # create the database
//! crmd serve     # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Row structs for the four entities |
//! | [`contacts`] | Contact creation |
//! | [`interactions`] | Interaction logging |
//! | [`ai_notes`] | Manual and template-generated notes |
//! | [`followups`] | Followup scheduling and the due-scan |
//! | [`server`] | JSON HTTP server |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |

pub mod ai_notes;
pub mod clock;
pub mod config;
pub mod contacts;
pub mod db;
pub mod followups;
pub mod interactions;
pub mod migrate;
pub mod models;
pub mod server;

#[cfg(test)]
pub(crate) mod testutil;
