use crate::{CampdirDocument, CampdirQueryParams, CampdirResult};
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::Deserialize;

/// Read side of the storage facade.
///
/// `count_docs` counts the whole collection, unfiltered; the pagination layer
/// calls it freshly for every request and never caches the result.
#[async_trait]
pub trait CampdirQuerySupport {
    async fn query_doc(&self, params: CampdirQueryParams) -> CampdirResult<Vec<CampdirDocument>>;

    async fn stream_query_doc<'b>(
        &self,
        params: CampdirQueryParams,
    ) -> CampdirResult<BoxStream<'b, CampdirDocument>>;

    async fn query_obj<T>(&self, params: CampdirQueryParams) -> CampdirResult<Vec<T>>
    where
        for<'de> T: Deserialize<'de>;

    async fn count_docs(&self, collection_id: &str) -> CampdirResult<usize>;
}
