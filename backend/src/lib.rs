//! Nutrition Tracker Backend Library
//!
//! This library exposes the backend modules for use in tests and other crates.

pub mod ai;
pub mod config;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
