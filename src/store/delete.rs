use crate::CampdirResult;
use async_trait::async_trait;

#[async_trait]
pub trait CampdirDeleteSupport {
    /// Deletes one document. Deleting an id that is already gone is not an
    /// error.
    async fn delete_by_id<S>(&self, collection_id: &str, document_id: S) -> CampdirResult<()>
    where
        S: AsRef<str> + Send;

    /// Deletes every document whose `parent_ref_field` equals `parent_id`,
    /// returning how many were removed. Used to cascade child collections
    /// when a parent record goes away.
    async fn delete_children_of<S>(
        &self,
        collection_id: &str,
        parent_ref_field: &str,
        parent_id: S,
    ) -> CampdirResult<usize>
    where
        S: AsRef<str> + Send;
}
