use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Working hours for one weekday; 0 = Monday .. 6 = Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDay {
    pub id: Uuid,
    pub day_of_week: i32,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_extended: bool,
}

impl WorkDay {
    pub fn day_name(&self) -> &'static str {
        day_name(self.day_of_week)
    }
}

pub fn day_name(day_of_week: i32) -> &'static str {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|idx| DAY_NAMES.get(idx).copied())
        .unwrap_or("Unknown")
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkDay {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_extended: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkDayChanges {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_extended: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkDayRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_extended: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDayResponse {
    pub id: Uuid,
    pub day_of_week: i32,
    pub day_name: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_extended: bool,
}

impl From<WorkDay> for WorkDayResponse {
    fn from(day: WorkDay) -> Self {
        Self {
            day_name: day.day_name().to_string(),
            id: day.id,
            day_of_week: day.day_of_week,
            start_time: day.start_time,
            end_time: day.end_time,
            is_extended: day.is_extended,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkScheduleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub work_schedule: Vec<WorkDayResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkDayEnvelope {
    pub message: String,
    pub schedule: WorkDayResponse,
}
