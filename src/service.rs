//! Search orchestration: compile, query the store, apply the result policy

use crate::employee::EmployeeRecord;
use crate::error::{Error, Result};
use crate::nlp::{FilterPredicate, QueryCompiler};
use crate::store::EmployeeStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared by all request handlers
#[derive(Clone)]
pub struct EmployeeSearchService {
    compiler: Arc<QueryCompiler>,
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeSearchService {
    pub fn new(compiler: Arc<QueryCompiler>, store: Arc<dyn EmployeeStore>) -> Self {
        Self { compiler, store }
    }

    pub fn compiler(&self) -> &QueryCompiler {
        &self.compiler
    }

    /// Runs a natural-language search
    ///
    /// A query that compiles to no constraints returns every record. A
    /// constrained query that matches nothing is [`Error::NoMatch`].
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<EmployeeRecord>> {
        let predicate = self.explain(query)?;

        if predicate.is_empty() {
            debug!("query produced no constraints, returning all employees");
            return Ok(self.store.find_all().await?);
        }

        let employees = self.store.find(&predicate).await?;
        info!(
            constraints = predicate.len(),
            matches = employees.len(),
            "employee search completed"
        );

        if employees.is_empty() {
            return Err(Error::NoMatch);
        }
        Ok(employees)
    }

    /// Compiles the query without touching the store
    pub fn explain(&self, query: Option<&str>) -> Result<FilterPredicate> {
        let query = query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| Error::Validation("Search query required".to_string()))?;
        self.compiler.compile(query)
    }

    /// Every stored employee
    pub async fn list_all(&self) -> Result<Vec<EmployeeRecord>> {
        Ok(self.store.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::CompilerSettings;
    use crate::store::{InMemoryEmployeeStore, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts store calls so tests can assert the store was never reached
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmployeeStore for CountingStore {
        async fn find(&self, _predicate: &FilterPredicate) -> std::result::Result<Vec<EmployeeRecord>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn count(&self) -> std::result::Result<u64, StoreError> {
            Ok(0)
        }

        async fn insert_many(&self, _records: Vec<EmployeeRecord>) -> std::result::Result<usize, StoreError> {
            Ok(0)
        }

        fn backend_name(&self) -> &'static str {
            "counting"
        }
    }

    fn compiler() -> Arc<QueryCompiler> {
        Arc::new(QueryCompiler::new(&CompilerSettings::default()).unwrap())
    }

    fn store() -> Arc<InMemoryEmployeeStore> {
        Arc::new(InMemoryEmployeeStore::with_records(vec![
            EmployeeRecord {
                name: "Ann".to_string(),
                state: "Texas".to_string(),
                salary: 80000.0,
                ..Default::default()
            },
            EmployeeRecord {
                name: "Bob".to_string(),
                state: "Florida".to_string(),
                salary: 45000.0,
                ..Default::default()
            },
        ]))
    }

    #[tokio::test]
    async fn test_search_filters() {
        let service = EmployeeSearchService::new(compiler(), store());
        let found = service.search(Some("salary above 60000")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ann");
    }

    #[tokio::test]
    async fn test_unconstrained_query_returns_everything() {
        let service = EmployeeSearchService::new(compiler(), store());
        let found = service.search(Some("show me everyone")).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_no_match() {
        let service = EmployeeSearchService::new(compiler(), store());
        let result = service.search(Some("employees in California")).await;
        assert!(matches!(result, Err(Error::NoMatch)));
    }

    #[tokio::test]
    async fn test_missing_and_blank_queries() {
        let service = EmployeeSearchService::new(compiler(), store());
        assert!(matches!(service.search(None).await, Err(Error::Validation(_))));
        assert!(matches!(service.search(Some("   ")).await, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_blocked_query_never_reaches_store() {
        let counting = Arc::new(CountingStore::default());
        let service = EmployeeSearchService::new(compiler(), counting.clone());

        let result = service.search(Some("salary and password of employees")).await;
        assert!(matches!(result, Err(Error::RejectedQuery(_))));
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }
}
