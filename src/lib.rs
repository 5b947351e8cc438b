//! # TMS Rust Backend
//!
//! Scheduling availability engine for a multi-branch tutoring school.
//!
//! This crate provides the conflict-detection core of the Tutoring Management
//! System (TMS): given a proposed booking (a recurring class, a makeup
//! session, or a trial session) it decides whether the slot is free, and it
//! can render the full busy timeline of a branch for one day. The backend
//! exposes a REST API via Axum for the frontend.
//!
//! ## Features
//!
//! - **Holiday Gate**: national and branch-scoped holiday blocking
//! - **Overlap Scanning**: half-open interval overlap detection across the
//!   three booking sources, per room and per teacher
//! - **Conflict Classification**: hard issues vs advisory warnings, driven by
//!   the kind of booking being placed
//! - **Day Timeline**: aggregated busy slots for calendar views, backed by a
//!   short-lived reference data cache
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) and typed identifiers
//! - [`db`]: Repository pattern and persistence layer
//! - [`models`]: Domain types (bookings, holidays, times, reference data)
//! - [`services`]: Availability and timeline business logic
//! - [`routes`]: Route-specific data types
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
