//! Purge Server
//!
//! Self-service account deletion for Supabase projects: authenticates the
//! caller, removes their data through a Postgres function, then deletes the
//! account with the service-role key.

pub mod account;
pub mod api;
pub mod config;
pub mod supabase;
