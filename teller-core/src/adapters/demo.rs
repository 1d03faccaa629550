//! Demo data provider
//!
//! Fixed bootstrap clients for a fresh branch: two customers, each opening
//! one account. The registry is rebuilt from this data on every run.

use chrono::NaiveDate;

/// A client to onboard when bootstrapping the demo branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoClient {
    pub name: &'static str,
    pub address: &'static str,
    pub dob: NaiveDate,
    pub initial_balance: u64,
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Generate demo clients
pub fn generate_demo_clients() -> Vec<DemoClient> {
    vec![
        DemoClient {
            name: "A Bamotra",
            address: "2720 152nd Ave NE",
            dob: demo_date(1997, 7, 17),
            initial_balance: 10,
        },
        DemoClient {
            name: "B Bamotra",
            address: "2720 152nd Ave NE",
            dob: demo_date(1992, 12, 17),
            initial_balance: 100,
        },
    ]
}
