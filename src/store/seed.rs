//! Synthetic employee data for empty stores

use super::{EmployeeStore, StoreError};
use crate::employee::EmployeeRecord;
use chrono::{TimeZone, Utc};
use rand::Rng;
use tracing::info;

const STATES: [&str; 4] = ["California", "Texas", "New York", "Florida"];
const CITIES: [&str; 4] = ["Los Angeles", "Houston", "New York City", "Miami"];
const DEPARTMENTS: [&str; 4] = ["Engineering", "HR", "Marketing", "Sales"];
const SKILLS: [&str; 5] = ["JavaScript", "Python", "React", "Node.js", "SQL"];
const EDUCATION: [&str; 4] = ["B.Tech", "M.Tech", "MBA", "B.Sc"];

/// Generates `count` employees with a rotating, partly random profile
pub fn generate_employees<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<EmployeeRecord> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            let year = 2020 + (i % 4) as i32;
            let month = rng.gen_range(1..=12);
            let day = rng.gen_range(1..=28);

            EmployeeRecord {
                id: None,
                name: format!("Employee {}", n),
                email: format!("employee{}@company.com", n),
                phone: format!("98765432{}", (i % 10) + 1),
                state: STATES[i % 4].to_string(),
                city: CITIES[i % 4].to_string(),
                department: DEPARTMENTS[i % 4].to_string(),
                salary: f64::from(rng.gen_range(50_000..100_000_i32)),
                join_date: Utc
                    .with_ymd_and_hms(year, month, day, 0, 0, 0)
                    .single()
                    .unwrap_or_default(),
                gender: if i % 2 == 0 { "Male" } else { "Female" }.to_string(),
                skill_set: SKILLS[..(i % 5) + 1].iter().map(|s| s.to_string()).collect(),
                age: f64::from(rng.gen_range(22..42_i32)),
                education: EDUCATION[i % 4].to_string(),
            }
        })
        .collect()
}

/// Inserts `count` generated employees when `store` holds no records
///
/// Returns the number of records inserted (zero when the store was not empty).
pub async fn seed_if_empty(store: &dyn EmployeeStore, count: usize) -> Result<usize, StoreError> {
    let existing = store.count().await?;
    if existing > 0 || count == 0 {
        return Ok(0);
    }

    let employees = generate_employees(count, &mut rand::thread_rng());
    let inserted = store.insert_many(employees).await?;
    info!(inserted, backend = store.backend_name(), "sample employee data inserted");
    Ok(inserted)
}
