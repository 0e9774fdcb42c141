//! Stored document shape of an employee

use crate::employee::EmployeeRecord;
use chrono::{TimeZone, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Employee as persisted in MongoDB
///
/// Differs from [`EmployeeRecord`] only in BSON-native `_id` and `joinDate`.
/// Numbers are read as `f64` so documents written with Int32, Int64 or Double
/// values all decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredEmployee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub city: String,
    pub department: String,
    pub salary: f64,
    pub join_date: Option<bson::DateTime>,
    pub gender: String,
    pub skill_set: Vec<String>,
    pub age: f64,
    pub education: String,
}

impl From<StoredEmployee> for EmployeeRecord {
    fn from(doc: StoredEmployee) -> Self {
        let join_date = doc
            .join_date
            .and_then(|d| Utc.timestamp_millis_opt(d.timestamp_millis()).single())
            .unwrap_or_default();

        Self {
            id: doc.id.map(|id| id.to_hex()),
            name: doc.name,
            email: doc.email,
            phone: doc.phone,
            state: doc.state,
            city: doc.city,
            department: doc.department,
            salary: doc.salary,
            join_date,
            gender: doc.gender,
            skill_set: doc.skill_set,
            age: doc.age,
            education: doc.education,
        }
    }
}

impl From<EmployeeRecord> for StoredEmployee {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: record
                .id
                .as_deref()
                .and_then(|id| ObjectId::parse_str(id).ok()),
            name: record.name,
            email: record.email,
            phone: record.phone,
            state: record.state,
            city: record.city,
            department: record.department,
            salary: record.salary,
            join_date: Some(bson::DateTime::from_millis(
                record.join_date.timestamp_millis(),
            )),
            gender: record.gender,
            skill_set: record.skill_set,
            age: record.age,
            education: record.education,
        }
    }
}
