//! Client for the hosted record store (a PostgREST-compatible REST API).

pub mod client;
pub mod config;
pub mod error;
pub mod repo;

pub use client::{Order, SelectQuery, StoreClient};
pub use config::StoreConfig;
pub use error::StoreError;
pub use repo::ResponseRepo;
