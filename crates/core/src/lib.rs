//! Domain logic for the needs-assessment survey.
//!
//! Everything here is pure or talks to the record store only through the
//! [`store::ResponseStore`] trait, so the HTTP layer and tests can supply
//! their own backends.

pub mod acknowledgement;
pub mod admin;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod response;
pub mod shell;
pub mod store;
pub mod survey;
pub mod types;
