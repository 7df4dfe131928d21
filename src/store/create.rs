use crate::{CampdirDocument, CampdirResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Write side of the storage facade: creation.
///
/// A document arriving with an empty id gets a store-generated one; creating
/// a document under an id that already exists is a `DataConflictError`.
#[async_trait]
pub trait CampdirCreateSupport {
    async fn create_doc(
        &self,
        collection_id: &str,
        input_doc: CampdirDocument,
    ) -> CampdirResult<CampdirDocument>;

    async fn create_obj<I, O, S>(
        &self,
        collection_id: &str,
        document_id: Option<S>,
        obj: &I,
    ) -> CampdirResult<O>
    where
        I: Serialize + Sync + Send,
        for<'de> O: Deserialize<'de>,
        S: AsRef<str> + Send;
}
