use crate::{
    from_document, paginate, CampdirDocument, CampdirListResponse, CampdirQuerySupport,
    CampdirRawQuery, CampdirResult, CampdirViewRequest,
};
use serde::Deserialize;
use tracing::*;

/// Executes one listing read end to end: parse the raw parameters, fetch a
/// fresh collection count, compute the page window, query, and wrap the rows
/// in the listing envelope.
///
/// The count is taken immediately before the window is computed and is never
/// reused across requests.
pub async fn run_list_view<D>(
    db: &D,
    collection_id: &str,
    raw: &CampdirRawQuery,
) -> CampdirResult<CampdirListResponse<CampdirDocument>>
where
    D: CampdirQuerySupport + Sync,
{
    let span = span!(
        Level::DEBUG,
        "Campdir List View",
        "/campdir/collection_name" = collection_id,
    );

    let request = CampdirViewRequest::parse(raw);

    let total_count = db.count_docs(collection_id).await?;
    let window = paginate(request.page, request.limit, total_count);

    let docs = db
        .query_doc(request.to_query_params(collection_id, &window))
        .await?;

    span.in_scope(|| {
        debug!(
            collection_id,
            total_count,
            page = window.page,
            returned = docs.len(),
            "Executed listing view.",
        );
    });

    Ok(CampdirListResponse::new(window.pagination, docs))
}

/// Same pipeline as [`run_list_view`], deserializing each row.
pub async fn run_list_view_obj<D, T>(
    db: &D,
    collection_id: &str,
    raw: &CampdirRawQuery,
) -> CampdirResult<CampdirListResponse<T>>
where
    D: CampdirQuerySupport + Sync,
    for<'de> T: Deserialize<'de>,
{
    let listing = run_list_view(db, collection_id, raw).await?;

    let data = listing
        .data
        .iter()
        .map(from_document::<T>)
        .collect::<CampdirResult<Vec<T>>>()?;

    Ok(CampdirListResponse::new(listing.pagination, data))
}
