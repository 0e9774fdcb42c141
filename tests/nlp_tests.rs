use chrono::{TimeZone, Utc};
use employee_search::nlp::{
    Category, CompilerSettings, Constraint, ConstraintValue, QueryCompiler,
};
use employee_search::{EmployeeRecord, Error, Field};
use std::collections::{BTreeSet, HashMap};

fn compiler() -> QueryCompiler {
    QueryCompiler::new(&CompilerSettings::default()).unwrap()
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_mba_constrains_education() {
    let compiler = compiler();
    for query in ["mba", "Employees with an MBA", "mba holders in sales"] {
        let predicate = compiler.compile(query).unwrap();
        assert_eq!(
            predicate.get(Field::Education),
            Some(&Constraint::MatchesPattern("mba".to_string())),
            "query: {}",
            query
        );
    }
}

#[test]
fn test_salary_directions() {
    let compiler = compiler();

    let predicate = compiler.compile("salary above 60000").unwrap();
    assert_eq!(predicate.len(), 1);
    assert_eq!(
        predicate.get(Field::Salary),
        Some(&Constraint::AtLeast(ConstraintValue::Number(60000)))
    );

    let predicate = compiler.compile("salary below 40000").unwrap();
    assert_eq!(
        predicate.get(Field::Salary),
        Some(&Constraint::AtMost(ConstraintValue::Number(40000)))
    );

    let predicate = compiler.compile("salary 50000").unwrap();
    assert_eq!(
        predicate.get(Field::Salary),
        Some(&Constraint::Equals(ConstraintValue::Number(50000)))
    );
}

#[test]
fn test_salary_and_age_bind_independently() {
    let predicate = compiler()
        .compile("salary above 50000 and age below 30")
        .unwrap();

    assert_eq!(
        predicate.get(Field::Salary),
        Some(&Constraint::AtLeast(ConstraintValue::Number(50000)))
    );
    // Upward keywords anywhere in the query win over downward ones
    assert_eq!(
        predicate.get(Field::Age),
        Some(&Constraint::AtLeast(ConstraintValue::Number(30)))
    );
}

#[test]
fn test_direction_is_shared_across_fields() {
    let compiler = compiler();

    let predicate = compiler.compile("salary more than 50000 and age 30").unwrap();
    assert_eq!(
        predicate.get(Field::Age),
        Some(&Constraint::AtLeast(ConstraintValue::Number(30)))
    );

    let predicate = compiler.compile("salary 50000 and age below 30").unwrap();
    assert_eq!(
        predicate.get(Field::Salary),
        Some(&Constraint::AtMost(ConstraintValue::Number(50000)))
    );
    assert_eq!(
        predicate.get(Field::Age),
        Some(&Constraint::AtMost(ConstraintValue::Number(30)))
    );
}

#[test]
fn test_blocked_term_rejected() {
    let result = compiler().compile("show salary and password");
    assert!(matches!(result, Err(Error::RejectedQuery(_))));
}

#[test]
fn test_inflected_blocked_verbs_rejected() {
    let compiler = compiler();
    for query in ["show deleted employees", "employees who dropped out", "truncated salary tables"] {
        assert!(
            matches!(compiler.compile(query), Err(Error::RejectedQuery(_))),
            "query: {}",
            query
        );
    }
}

#[test]
fn test_blank_queries_rejected() {
    let compiler = compiler();
    for query in ["", "   ", "\t\n"] {
        assert!(matches!(compiler.compile(query), Err(Error::Validation(_))));
    }
}

#[test]
fn test_skills_are_multi_valued() {
    let predicate = compiler().compile("python react").unwrap();
    let constraint = predicate.get(Field::SkillSet).unwrap();
    assert_eq!(constraint, &Constraint::OneOf(set(&["python", "react"])));

    let holds = |skills: &[&str]| EmployeeRecord {
        skill_set: skills.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    assert!(predicate.matches(&holds(&["React"])));
    assert!(predicate.matches(&holds(&["JavaScript", "Python"])));
    assert!(!predicate.matches(&holds(&["SQL"])));
}

#[test]
fn test_city_capture_keeps_case() {
    let predicate = compiler().compile("city Miami").unwrap();
    assert_eq!(
        predicate.get(Field::City),
        Some(&Constraint::MatchesPattern("Miami".to_string()))
    );
}

#[test]
fn test_city_trigger_before_function_word_is_ignored() {
    let predicate = compiler()
        .compile("employees in New York City with an MBA")
        .unwrap();

    assert!(predicate.get(Field::City).is_none());
    assert_eq!(
        predicate.get(Field::State),
        Some(&Constraint::MatchesPattern("new york".to_string()))
    );
    assert_eq!(
        predicate.get(Field::Education),
        Some(&Constraint::MatchesPattern("mba".to_string()))
    );
}

#[test]
fn test_unrecognized_query_is_unconstrained() {
    assert!(compiler().compile("show me everyone").unwrap().is_empty());
}

#[test]
fn test_compilation_is_idempotent() {
    let compiler = compiler();
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
    let query = "python engineers in Texas joined before 3 years with salary above 70k";

    let first = compiler.compile_at(query, now).unwrap();
    let second = compiler.compile_at(query, now).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_relative_join_date() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
    let predicate = compiler()
        .compile_at("employees who joined before 2 years", now)
        .unwrap();

    assert_eq!(
        predicate.get(Field::JoinDate),
        Some(&Constraint::LessThan(ConstraintValue::Date(
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
        )))
    );
}

#[test]
fn test_full_query() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
    let predicate = compiler()
        .compile_at(
            "python developers in Texas in engineering earning salary above 70k",
            now,
        )
        .unwrap();

    assert_eq!(
        predicate.get(Field::State),
        Some(&Constraint::MatchesPattern("texas".to_string()))
    );
    assert_eq!(
        predicate.get(Field::Department),
        Some(&Constraint::MatchesPattern("engineering".to_string()))
    );
    assert_eq!(
        predicate.get(Field::SkillSet),
        Some(&Constraint::OneOf(set(&["python"])))
    );
    assert_eq!(
        predicate.get(Field::Salary),
        Some(&Constraint::AtLeast(ConstraintValue::Number(70000)))
    );
    assert!(predicate.get(Field::JoinDate).is_none());
}

#[test]
fn test_configured_terms() {
    let mut extra_terms = HashMap::new();
    extra_terms.insert(Category::Skill, vec!["Rust".to_string()]);
    let settings = CompilerSettings {
        blocked_terms: vec!["bonus".to_string()],
        extra_terms,
        ..Default::default()
    };
    let compiler = QueryCompiler::new(&settings).unwrap();

    let predicate = compiler.compile("rust and sql").unwrap();
    assert_eq!(
        predicate.get(Field::SkillSet),
        Some(&Constraint::OneOf(set(&["rust", "sql"])))
    );

    assert!(matches!(
        compiler.compile("employees with a Bonus"),
        Err(Error::RejectedQuery(_))
    ));
}
