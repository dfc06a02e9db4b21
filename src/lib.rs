//! Session and role-authorization gateway for the reseller portal.
//!
//! Sits between the portal shell and the reseller backend REST API: performs
//! login, derives the session from token claims, guards role-scoped portal
//! areas, hosts the impersonation handshake, and serves the offline shell
//! cache.

pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod storage;
pub mod token;
pub mod utils;
pub mod validators;
