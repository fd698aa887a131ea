//! # BarberBook Core
//!
//! Domain models, the error taxonomy and the booking rules of the barbershop
//! backend. Persistence is reached only through [`store::BookingStore`], so every
//! service here runs unchanged against Postgres or the in-memory store.
//!
//! Guarded operations take the requesting [`models::client::Actor`] explicitly and
//! check it before doing anything else.

pub mod auth;
pub mod availability;
pub mod catalog;
pub mod directory;
pub mod errors;
pub mod finance;
pub mod ledger;
pub mod models;
pub mod store;
pub mod validation;
pub mod work_schedule;
