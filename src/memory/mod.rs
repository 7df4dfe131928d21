//! An in-process, authoritative document store implementing the full storage
//! facade. It backs the crate's tests and gives embedders a zero-dependency
//! store with the same observable semantics a remote document database
//! provides through the facade traits.

/// Module evaluating predicates against documents.
mod filter_engine;
pub use filter_engine::CampdirFilterEngine;

/// Module executing sort/window/projection over in-memory documents.
mod query_engine;
pub use query_engine::CampdirQueryEngine;

use crate::errors::{
    CampdirDataConflictError, CampdirDataNotFoundError, CampdirErrorPublicGenericDetails,
};
use crate::{
    from_document, to_document, CampdirAggregationSupport, CampdirAverageQueryParams,
    CampdirCreateSupport, CampdirDeleteSupport, CampdirDocument, CampdirError, CampdirGetSupport,
    CampdirQueryParams, CampdirQuerySupport, CampdirResult, CampdirUpdateSupport, CampdirValue,
};
use async_trait::async_trait;
use chrono::Utc;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::*;

type CampdirMemCollection = BTreeMap<String, CampdirDocument>;

/// In-memory document store keyed by collection id, then document id.
///
/// All facade operations run against one `RwLock`-guarded map; reads clone a
/// snapshot so queries never hold the lock across sorting or projection.
pub struct CampdirMemoryStore {
    collections: RwLock<BTreeMap<String, CampdirMemCollection>>,
    id_seq: AtomicU64,
}

impl CampdirMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(BTreeMap::new()),
            id_seq: AtomicU64::new(0),
        }
    }

    fn next_generated_id(&self) -> String {
        let seq = self.id_seq.fetch_add(1, Ordering::Relaxed) + 1;
        format!("doc-{:06}", seq)
    }

    async fn snapshot_collection(&self, collection_id: &str) -> Vec<CampdirDocument> {
        let collections = self.collections.read().await;
        collections
            .get(collection_id)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CampdirQuerySupport for CampdirMemoryStore {
    async fn query_doc(&self, params: CampdirQueryParams) -> CampdirResult<Vec<CampdirDocument>> {
        let span = span!(
            Level::DEBUG,
            "Campdir Memory Query",
            "/campdir/collection_name" = params.collection_id.as_str(),
        );

        let query_engine = CampdirQueryEngine::new(&params);

        let matching: Vec<CampdirDocument> = self
            .snapshot_collection(params.collection_id.as_str())
            .await
            .into_iter()
            .filter(|doc| query_engine.matches_doc(doc))
            .collect();

        let results = query_engine.process_docs(matching);

        span.in_scope(|| {
            debug!(
                collection_id = params.collection_id.as_str(),
                returned = results.len(),
                "Queried documents in specified collection.",
            );
        });

        Ok(results)
    }

    async fn stream_query_doc<'b>(
        &self,
        params: CampdirQueryParams,
    ) -> CampdirResult<BoxStream<'b, CampdirDocument>> {
        let results = self.query_doc(params).await?;
        Ok(futures::stream::iter(results).boxed())
    }

    async fn query_obj<T>(&self, params: CampdirQueryParams) -> CampdirResult<Vec<T>>
    where
        for<'de> T: Deserialize<'de>,
    {
        let docs = self.query_doc(params).await?;
        docs.iter().map(|doc| from_document(doc)).collect()
    }

    async fn count_docs(&self, collection_id: &str) -> CampdirResult<usize> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection_id)
            .map(|collection| collection.len())
            .unwrap_or(0))
    }
}

#[async_trait]
impl CampdirGetSupport for CampdirMemoryStore {
    async fn get_doc_by_id<S>(
        &self,
        collection_id: &str,
        document_id: S,
    ) -> CampdirResult<Option<CampdirDocument>>
    where
        S: AsRef<str> + Send,
    {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection_id)
            .and_then(|collection| collection.get(document_id.as_ref()))
            .cloned())
    }

    async fn get_obj_by_id<T, S>(
        &self,
        collection_id: &str,
        document_id: S,
    ) -> CampdirResult<Option<T>>
    where
        for<'de> T: Deserialize<'de>,
        S: AsRef<str> + Send,
    {
        match self.get_doc_by_id(collection_id, document_id).await? {
            Some(doc) => Ok(Some(from_document(&doc)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CampdirCreateSupport for CampdirMemoryStore {
    async fn create_doc(
        &self,
        collection_id: &str,
        input_doc: CampdirDocument,
    ) -> CampdirResult<CampdirDocument> {
        let mut doc = input_doc;
        if doc.id.is_empty() {
            doc.id = self.next_generated_id();
        }

        let now = Utc::now();
        doc.create_time = Some(now);
        doc.update_time = Some(now);

        let mut collections = self.collections.write().await;
        let collection = collections.entry(collection_id.to_string()).or_default();

        if collection.contains_key(doc.id.as_str()) {
            return Err(CampdirError::DataConflictError(
                CampdirDataConflictError::new(
                    CampdirErrorPublicGenericDetails::new("ALREADY_EXISTS".to_string()),
                    format!("Document {}/{} already exists", collection_id, doc.id),
                ),
            ));
        }

        debug!("[DB]: Created the document: {}/{}", collection_id, doc.id);
        collection.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    async fn create_obj<I, O, S>(
        &self,
        collection_id: &str,
        document_id: Option<S>,
        obj: &I,
    ) -> CampdirResult<O>
    where
        I: Serialize + Sync + Send,
        for<'de> O: Deserialize<'de>,
        S: AsRef<str> + Send,
    {
        let input_doc = to_document(document_id.as_ref().map(|id| id.as_ref()), obj)?;
        let created = self.create_doc(collection_id, input_doc).await?;
        from_document(&created)
    }
}

#[async_trait]
impl CampdirUpdateSupport for CampdirMemoryStore {
    async fn update_doc(
        &self,
        collection_id: &str,
        input_doc: CampdirDocument,
        update_only: Option<Vec<String>>,
    ) -> CampdirResult<CampdirDocument> {
        let mut collections = self.collections.write().await;

        let existing = collections
            .get_mut(collection_id)
            .and_then(|collection| collection.get_mut(input_doc.id.as_str()))
            .ok_or_else(|| {
                CampdirError::DataNotFoundError(CampdirDataNotFoundError::new(
                    CampdirErrorPublicGenericDetails::new("NOT_FOUND".to_string()),
                    format!("Document {}/{} not found", collection_id, input_doc.id),
                ))
            })?;

        for (field_name, value) in input_doc.fields {
            let included = update_only
                .as_ref()
                .map(|mask| mask.iter().any(|masked| masked == &field_name))
                .unwrap_or(true);
            if included {
                existing.fields.insert(field_name, value);
            }
        }
        existing.update_time = Some(Utc::now());

        debug!(
            "[DB]: Updated the document: {}/{}",
            collection_id, existing.id
        );
        Ok(existing.clone())
    }

    async fn update_obj<I, O, S>(
        &self,
        collection_id: &str,
        document_id: S,
        obj: &I,
        update_only: Option<Vec<String>>,
    ) -> CampdirResult<O>
    where
        I: Serialize + Sync + Send,
        for<'de> O: Deserialize<'de>,
        S: AsRef<str> + Send,
    {
        let input_doc = to_document(Some(document_id.as_ref()), obj)?;
        let updated = self.update_doc(collection_id, input_doc, update_only).await?;
        from_document(&updated)
    }

    async fn patch_doc_fields<S>(
        &self,
        collection_id: &str,
        document_id: S,
        fields: Vec<(String, CampdirValue)>,
    ) -> CampdirResult<()>
    where
        S: AsRef<str> + Send,
    {
        let mut collections = self.collections.write().await;

        let existing = collections
            .get_mut(collection_id)
            .and_then(|collection| collection.get_mut(document_id.as_ref()))
            .ok_or_else(|| {
                CampdirError::DataNotFoundError(CampdirDataNotFoundError::new(
                    CampdirErrorPublicGenericDetails::new("NOT_FOUND".to_string()),
                    format!(
                        "Document {}/{} not found",
                        collection_id,
                        document_id.as_ref()
                    ),
                ))
            })?;

        for (field_name, value) in fields {
            existing.fields.insert(field_name, value);
        }
        existing.update_time = Some(Utc::now());

        Ok(())
    }
}

#[async_trait]
impl CampdirDeleteSupport for CampdirMemoryStore {
    async fn delete_by_id<S>(&self, collection_id: &str, document_id: S) -> CampdirResult<()>
    where
        S: AsRef<str> + Send,
    {
        let mut collections = self.collections.write().await;
        if let Some(collection) = collections.get_mut(collection_id) {
            collection.remove(document_id.as_ref());
        }
        debug!(
            "[DB]: Deleted the document: {}/{}",
            collection_id,
            document_id.as_ref()
        );
        Ok(())
    }

    async fn delete_children_of<S>(
        &self,
        collection_id: &str,
        parent_ref_field: &str,
        parent_id: S,
    ) -> CampdirResult<usize>
    where
        S: AsRef<str> + Send,
    {
        let mut collections = self.collections.write().await;
        let Some(collection) = collections.get_mut(collection_id) else {
            return Ok(0);
        };

        let before = collection.len();
        collection.retain(|_, doc| {
            doc.field(parent_ref_field).and_then(|v| v.as_str()) != Some(parent_id.as_ref())
        });
        let removed = before - collection.len();

        debug!(
            collection_id,
            parent_ref_field,
            parent_id = parent_id.as_ref(),
            removed,
            "Cascaded delete of child documents.",
        );
        Ok(removed)
    }
}

#[async_trait]
impl CampdirAggregationSupport for CampdirMemoryStore {
    async fn average_field(
        &self,
        params: CampdirAverageQueryParams,
    ) -> CampdirResult<Option<f64>> {
        let docs = self
            .snapshot_collection(params.collection_id.as_str())
            .await;

        let values: Vec<f64> = docs
            .iter()
            .filter(|doc| {
                params
                    .exclude_document_id
                    .as_deref()
                    .map(|excluded| doc.id != excluded)
                    .unwrap_or(true)
            })
            .filter(|doc| {
                params
                    .filter
                    .as_ref()
                    .map(|filter| CampdirFilterEngine::new(filter).matches_doc(doc))
                    .unwrap_or(true)
            })
            .filter_map(|doc| doc.field(params.avg_field.as_str()).and_then(|v| v.as_number()))
            .collect();

        if values.is_empty() {
            Ok(None)
        } else {
            Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
        }
    }
}
