use crate::{CampdirPredicate, CampdirResult};
use async_trait::async_trait;
use rsb_derive::Builder;

/// Parameters for an average aggregation over a filtered document set.
///
/// `exclude_document_id` removes one document from the match set by id. It is
/// an explicit parameter rather than a predicate operator: the deletion flow
/// must average the siblings of a record that still physically exists, and
/// the closed comparison set deliberately has no "not equal".
#[derive(Debug, PartialEq, Clone, Builder)]
pub struct CampdirAverageQueryParams {
    /// The ID of the collection holding the documents to aggregate over.
    pub collection_id: String,

    /// The filter selecting the documents to aggregate; `None` matches all.
    pub filter: Option<CampdirPredicate>,

    /// The numeric field to average.
    pub avg_field: String,

    /// A document id excluded from the match set even when the filter
    /// matches it.
    pub exclude_document_id: Option<String>,
}

#[async_trait]
pub trait CampdirAggregationSupport {
    /// Computes the arithmetic mean of `avg_field` over the matching
    /// documents. Returns `None` when nothing matches; documents missing the
    /// field or holding a non-numeric value do not contribute.
    async fn average_field(
        &self,
        params: CampdirAverageQueryParams,
    ) -> CampdirResult<Option<f64>>;
}
