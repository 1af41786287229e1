//! Shorturl - a URL shortener web service
//!
//! This library provides the core functionality for the Shorturl service:
//! short-key generation, persistent link storage, and the HTTP API for
//! creating, resolving, inspecting, and deactivating short links.
//!
//! # Architecture
//! - `keygen`: random key generation and the uniqueness retry loop
//! - `storage`: SeaORM-backed link registry (SQLite, MySQL, PostgreSQL)
//! - `services`: business logic shared by all HTTP handlers
//! - `api`: HTTP services and route registration
//! - `config`: configuration management
//! - `system`: logging initialization

pub mod api;
pub mod config;
pub mod errors;
pub mod keygen;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
