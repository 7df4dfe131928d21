use crate::{CampdirDocument, CampdirResult, CampdirValue};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Write side of the storage facade: updates.
///
/// `patch_doc_fields` is a single match-by-id-then-set call; the aggregate
/// engine writes derived fields exclusively through it, never through a
/// read-modify-write cycle at the application layer.
#[async_trait]
pub trait CampdirUpdateSupport {
    async fn update_doc(
        &self,
        collection_id: &str,
        input_doc: CampdirDocument,
        update_only: Option<Vec<String>>,
    ) -> CampdirResult<CampdirDocument>;

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
        S: AsRef<str> + Send;

    async fn patch_doc_fields<S>(
        &self,
        collection_id: &str,
        document_id: S,
        fields: Vec<(String, CampdirValue)>,
    ) -> CampdirResult<()>
    where
        S: AsRef<str> + Send;
}
