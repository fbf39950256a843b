//! Supabase REST Client
//!
//! Thin client over the GoTrue auth API and PostgREST RPC endpoints.
//! Only the calls needed for self-service account deletion are exposed.

mod client;
mod error;

pub use client::{AuthUser, SupabaseClient};
pub use error::{SupabaseError, SupabaseResult};
