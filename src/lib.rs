//! Membership registry backend
//!
//! Companies register with a Swedish organisation number, hold membership
//! applications from users, pay membership and branding fees, and own
//! addresses and imported events. The rules engine in
//! [`services::company_rules`] derives all public-visibility state; the rest
//! of the crate is the service shell around it.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
