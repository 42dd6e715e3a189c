//! Route modules, one per resource

pub mod admin;
pub mod auth;
pub mod billing;
pub mod license;
pub mod support;
pub mod tenants;
