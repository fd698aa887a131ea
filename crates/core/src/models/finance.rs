use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::appointment::AppointmentDetails;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: String,
    pub total_revenue: f64,
    pub total_appointments: usize,
    pub services_count: BTreeMap<String, usize>,
    pub appointments: Vec<AppointmentDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub total_revenue: f64,
    pub total_appointments: usize,
    pub services_count: BTreeMap<String, usize>,
    /// Keyed by `YYYY-MM-DD`.
    pub daily_revenue: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRevenue {
    pub year: i32,
    pub total_revenue: f64,
    pub total_appointments: usize,
    pub services_count: BTreeMap<String, usize>,
    /// Keyed by `YYYY-MM`.
    pub monthly_revenue: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TodayFigures {
    pub revenue: f64,
    pub appointments: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodFigures {
    pub revenue: f64,
    pub appointments: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub today: TodayFigures,
    pub month: PeriodFigures,
    pub year: PeriodFigures,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnualQuery {
    pub year: Option<i32>,
}
