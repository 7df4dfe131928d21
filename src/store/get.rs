use crate::{CampdirDocument, CampdirResult};
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait CampdirGetSupport {
    async fn get_doc_by_id<S>(
        &self,
        collection_id: &str,
        document_id: S,
    ) -> CampdirResult<Option<CampdirDocument>>
    where
        S: AsRef<str> + Send;

    async fn get_obj_by_id<T, S>(
        &self,
        collection_id: &str,
        document_id: S,
    ) -> CampdirResult<Option<T>>
    where
        for<'de> T: Deserialize<'de>,
        S: AsRef<str> + Send;
}
