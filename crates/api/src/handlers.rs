pub mod appointment;
pub mod auth;
pub mod finance;
pub mod service;
pub mod user;
pub mod work_schedule;
