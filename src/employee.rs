//! Employee record schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An employee record as stored by the record store and returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeRecord {
    /// Store identifier, if the store assigns one
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub city: String,
    pub department: String,
    pub salary: f64,
    pub join_date: DateTime<Utc>,
    pub gender: String,
    pub skill_set: Vec<String>,
    pub age: f64,
    pub education: String,
}

impl EmployeeRecord {
    /// Returns the value held in `field`
    pub fn field_value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Email => FieldValue::Text(&self.email),
            Field::Phone => FieldValue::Text(&self.phone),
            Field::State => FieldValue::Text(&self.state),
            Field::City => FieldValue::Text(&self.city),
            Field::Department => FieldValue::Text(&self.department),
            Field::Salary => FieldValue::Number(self.salary),
            Field::JoinDate => FieldValue::Date(self.join_date),
            Field::Gender => FieldValue::Text(&self.gender),
            Field::SkillSet => FieldValue::List(&self.skill_set),
            Field::Age => FieldValue::Number(self.age),
            Field::Education => FieldValue::Text(&self.education),
        }
    }
}

/// Schema field names of [`EmployeeRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    State,
    City,
    Department,
    Salary,
    JoinDate,
    Gender,
    SkillSet,
    Age,
    Education,
}

impl Field {
    /// All schema fields in declaration order
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::State,
        Field::City,
        Field::Department,
        Field::Salary,
        Field::JoinDate,
        Field::Gender,
        Field::SkillSet,
        Field::Age,
        Field::Education,
    ];

    /// Field name as it appears in stored documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::State => "state",
            Field::City => "city",
            Field::Department => "department",
            Field::Salary => "salary",
            Field::JoinDate => "joinDate",
            Field::Gender => "gender",
            Field::SkillSet => "skillSet",
            Field::Age => "age",
            Field::Education => "education",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of a single record field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Date(DateTime<Utc>),
    List(&'a [String]),
}
