//! MongoDB Connection Implementation
//!
//! Provides the employee store on top of the official mongodb driver

use super::{
    config::MongoConfig, convert_mongodb_error, document::StoredEmployee,
    filter::to_filter_document,
};
use crate::employee::EmployeeRecord;
use crate::nlp::FilterPredicate;
use crate::store::{EmployeeStore, StoreError};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use tracing::{debug, info};

/// Employee store backed by one MongoDB collection
#[derive(Clone)]
pub struct MongoEmployeeStore {
    client: Client,
    collection: Collection<StoredEmployee>,
}

impl MongoEmployeeStore {
    /// Connect and verify the server with a ping
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        config.validate()?;

        // Parse MongoDB URI
        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(convert_mongodb_error)?;

        // Apply pool options
        client_options.max_pool_size = Some(config.pool_options.max_pool_size);
        client_options.min_pool_size = Some(config.pool_options.min_pool_size);
        client_options.connect_timeout = Some(config.pool_options.connect_timeout);
        client_options.server_selection_timeout =
            Some(config.pool_options.server_selection_timeout);

        if let Some(ref app_name) = config.pool_options.app_name {
            client_options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(client_options).map_err(convert_mongodb_error)?;

        // Ping to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(convert_mongodb_error)?;

        let collection = client
            .database(&config.database)
            .collection::<StoredEmployee>(&config.collection);

        info!(
            database = %config.database,
            collection = %config.collection,
            "connected to MongoDB"
        );

        Ok(Self { client, collection })
    }

    /// Get reference to MongoDB client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn find(&self, predicate: &FilterPredicate) -> Result<Vec<EmployeeRecord>, StoreError> {
        let filter = to_filter_document(predicate);
        debug!(filter = %filter, "running employee query");

        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(convert_mongodb_error)?;

        let documents: Vec<StoredEmployee> =
            cursor.try_collect().await.map_err(convert_mongodb_error)?;

        Ok(documents.into_iter().map(EmployeeRecord::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(convert_mongodb_error)
    }

    async fn insert_many(&self, records: Vec<EmployeeRecord>) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let documents: Vec<StoredEmployee> = records.into_iter().map(StoredEmployee::from).collect();
        let result = self
            .collection
            .insert_many(documents)
            .await
            .map_err(convert_mongodb_error)?;

        Ok(result.inserted_ids.len())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
