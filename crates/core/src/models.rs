pub mod appointment;
pub mod client;
pub mod finance;
pub mod service;
pub mod work_schedule;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
