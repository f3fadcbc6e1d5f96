//! # archive-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `archive-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! Every multi-row mutation (join + counter, request approval, verification
//! approval, teacher registration) runs inside a single transaction, and
//! check-then-insert races are closed by database constraints, not only
//! application checks. Schema lives in `migrations/`.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAccessRequestRepository, PgChannelRepository, PgDownloadRepository, PgMaterialRepository,
    PgMembershipRepository, PgUserRepository, PgVerificationRepository, PgWarningRepository,
};
