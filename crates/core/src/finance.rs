//! # Finance Aggregator
//!
//! Revenue projections over completed appointments. Nothing is cached; every call
//! rescans the completed appointments.
//!
//! An appointment whose service no longer resolves still counts toward
//! `total_appointments` but adds nothing to revenue, `services_count` or the
//! per-period buckets.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::require_admin,
    errors::{BookingError, BookingResult},
    ledger,
    models::{
        appointment::{Appointment, AppointmentStatus},
        client::Actor,
        finance::{
            AnnualRevenue, DailyRevenue, FinanceSummary, MonthlyRevenue, PeriodFigures,
            TodayFigures,
        },
        service::Service,
    },
    store::BookingStore,
    validation::{DATE_FORMAT, parse_date},
};

/// Totals over one window of completed appointments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rollup {
    pub total_revenue: f64,
    pub total_appointments: usize,
    pub services_count: BTreeMap<String, usize>,
    pub buckets: BTreeMap<String, f64>,
}

/// Sums `appointments`, bucketing revenue under the key `bucket` returns.
pub fn rollup<'a, I, F>(appointments: I, services: &HashMap<Uuid, Service>, bucket: F) -> Rollup
where
    I: IntoIterator<Item = &'a Appointment>,
    F: Fn(&Appointment) -> Option<String>,
{
    let mut rollup = Rollup::default();

    for appointment in appointments {
        rollup.total_appointments += 1;

        let Some(service) = services.get(&appointment.service_id) else {
            continue;
        };

        rollup.total_revenue += service.price;
        *rollup
            .services_count
            .entry(service.name.clone())
            .or_insert(0) += 1;

        if let Some(key) = bucket(appointment) {
            *rollup.buckets.entry(key).or_insert(0.0) += service.price;
        }
    }

    rollup
}

pub fn on_date(appointment: &Appointment, date: &str) -> bool {
    appointment.date == date
}

pub fn in_month(appointment: &Appointment, year: i32, month: u32) -> bool {
    parse_date(&appointment.date)
        .map(|date| date.year() == year && date.month() == month)
        .unwrap_or(false)
}

pub fn in_year(appointment: &Appointment, year: i32) -> bool {
    parse_date(&appointment.date)
        .map(|date| date.year() == year)
        .unwrap_or(false)
}

pub fn build_monthly(
    year: i32,
    month: u32,
    completed: &[Appointment],
    services: &HashMap<Uuid, Service>,
) -> MonthlyRevenue {
    let rollup = rollup(
        completed.iter().filter(|a| in_month(a, year, month)),
        services,
        |a| Some(a.date.clone()),
    );

    MonthlyRevenue {
        year,
        month,
        total_revenue: rollup.total_revenue,
        total_appointments: rollup.total_appointments,
        services_count: rollup.services_count,
        daily_revenue: rollup.buckets,
    }
}

pub fn build_annual(
    year: i32,
    completed: &[Appointment],
    services: &HashMap<Uuid, Service>,
) -> AnnualRevenue {
    let rollup = rollup(
        completed.iter().filter(|a| in_year(a, year)),
        services,
        |a| {
            parse_date(&a.date)
                .ok()
                .map(|date| format!("{}-{:02}", date.year(), date.month()))
        },
    );

    AnnualRevenue {
        year,
        total_revenue: rollup.total_revenue,
        total_appointments: rollup.total_appointments,
        services_count: rollup.services_count,
        monthly_revenue: rollup.buckets,
    }
}

/// Headline figures for the day, month and year containing `today`.
pub fn build_summary(
    today: NaiveDate,
    completed: &[Appointment],
    pending_today: usize,
    services: &HashMap<Uuid, Service>,
) -> FinanceSummary {
    let date = today.format(DATE_FORMAT).to_string();

    let day = rollup(completed.iter().filter(|a| on_date(a, &date)), services, |_| None);
    let month = rollup(
        completed
            .iter()
            .filter(|a| in_month(a, today.year(), today.month())),
        services,
        |_| None,
    );
    let year = rollup(
        completed.iter().filter(|a| in_year(a, today.year())),
        services,
        |_| None,
    );

    FinanceSummary {
        today: TodayFigures {
            revenue: day.total_revenue,
            appointments: day.total_appointments,
            pending: pending_today,
        },
        month: PeriodFigures {
            revenue: month.total_revenue,
            appointments: month.total_appointments,
        },
        year: PeriodFigures {
            revenue: year.total_revenue,
            appointments: year.total_appointments,
        },
    }
}

/// Revenue for one day, defaulting to `today`, with the counted appointments.
pub async fn daily_revenue(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    date: Option<&str>,
    today: NaiveDate,
) -> BookingResult<DailyRevenue> {
    require_admin(actor)?;

    let date = match date {
        Some(date) => {
            parse_date(date)?;
            date.to_string()
        }
        None => today.format(DATE_FORMAT).to_string(),
    };

    let (completed, services) = load_completed(store).await?;
    let on_day: Vec<Appointment> = completed
        .into_iter()
        .filter(|a| on_date(a, &date))
        .collect();
    let rollup = rollup(&on_day, &services, |_| None);
    debug!("Daily revenue for {}: {}", date, rollup.total_revenue);

    Ok(DailyRevenue {
        date,
        total_revenue: rollup.total_revenue,
        total_appointments: rollup.total_appointments,
        services_count: rollup.services_count,
        appointments: ledger::describe_all(store, on_day).await?,
    })
}

pub async fn monthly_revenue(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
) -> BookingResult<MonthlyRevenue> {
    require_admin(actor)?;

    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        return Err(BookingError::Validation(format!(
            "Invalid month {month} (expected 1-12)"
        )));
    }

    let (completed, services) = load_completed(store).await?;
    Ok(build_monthly(year, month, &completed, &services))
}

pub async fn annual_revenue(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    year: Option<i32>,
    today: NaiveDate,
) -> BookingResult<AnnualRevenue> {
    require_admin(actor)?;

    let year = year.unwrap_or_else(|| today.year());
    let (completed, services) = load_completed(store).await?;
    Ok(build_annual(year, &completed, &services))
}

pub async fn summary(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    today: NaiveDate,
) -> BookingResult<FinanceSummary> {
    require_admin(actor)?;

    let (completed, services) = load_completed(store).await?;
    let pending_today = store
        .list_appointments_by_date(&today.format(DATE_FORMAT).to_string())
        .await?
        .iter()
        .filter(|a| a.status == AppointmentStatus::Pending)
        .count();

    Ok(build_summary(today, &completed, pending_today, &services))
}

async fn load_completed(
    store: &dyn BookingStore,
) -> BookingResult<(Vec<Appointment>, HashMap<Uuid, Service>)> {
    let completed = store
        .list_appointments_by_status(AppointmentStatus::Completed)
        .await?;
    let services = store
        .list_services()
        .await?
        .into_iter()
        .map(|service| (service.id, service))
        .collect();
    Ok((completed, services))
}
