//! # employee-search
//!
//! Natural-language search over employee records.
//!
//! Free-text queries such as "python developers in Texas earning over 70k"
//! are compiled by [`nlp::QueryCompiler`] into a structured
//! [`nlp::FilterPredicate`], executed against an [`store::EmployeeStore`]
//! (MongoDB or in-memory) and served over HTTP by [`http_server`].

pub mod config;
pub mod employee;
pub mod error;
pub mod http_server;
pub mod logging;
pub mod nlp;
pub mod service;
pub mod store;

pub use employee::{EmployeeRecord, Field};
pub use error::{Error, Result};
pub use nlp::{CompilerSettings, FilterPredicate, QueryCompiler};
pub use service::EmployeeSearchService;
