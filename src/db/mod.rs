//! Data-access module for the availability core.
//!
//! Follows the Repository pattern: the service layer talks to abstract,
//! read-only traits, and storage backends can be swapped without touching the
//! conflict-detection logic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, booking forms)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Availability Engine        │
//! │  - Holiday gate                                          │
//! │  - Overlap scanning + classification                     │
//! │  - Day timeline aggregation                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The availability check is an advisory read: no writes, no transactions,
//! no reservation semantics. The booking commit happens elsewhere.

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    ClassRepository, ErrorContext, FullRepository, HolidayRepository, MakeupRepository,
    ReferenceRepository, RepositoryError, RepositoryResult, TrialRepository,
};
