//! Query functions, one module per table. Every function takes any Postgres
//! executor so the same query runs against the pool or inside a transaction.

pub mod appointment;
pub mod client;
pub mod service;
pub mod work_schedule;
