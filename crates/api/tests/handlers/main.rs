#[path = "../test_utils.rs"]
mod test_utils;

mod appointment_test;
mod finance_test;
mod service_test;
mod store_failure_test;
mod work_schedule_test;
