//! Client core for a leave-management dashboard.
//!
//! Wraps the backend REST API with typed calls, keeps an in-memory request
//! list reconciled against server responses, validates new leave drafts
//! (workday counting against weekends and public holidays, overlap checks),
//! and projects requests and users into CSV exports.

pub mod api;
pub mod auth;
pub mod config;
pub mod export;
pub mod holidays;
pub mod model;
pub mod state;
pub mod utils;
