//! Child-mutation entry points that keep the parent's derived aggregate in
//! step. The sequencing is explicit rather than hook-driven:
//! create/update persist the child first and then recompute; delete computes
//! the new value (excluding the doomed child) while the record still exists,
//! removes it, and only then applies the precomputed value.
//!
//! Once the child mutation is durable, aggregate maintenance is best-effort:
//! its failures are logged and the mutation still succeeds.

use crate::{
    apply_aggregate, compute_aggregate, from_document, recompute_aggregate, to_document,
    CampdirAggregateRule, CampdirAggregationSupport, CampdirCreateSupport, CampdirDeleteSupport,
    CampdirDocument, CampdirGetSupport, CampdirResult, CampdirUpdateSupport, CampdirValue,
};
use serde::{Deserialize, Serialize};
use tracing::*;

pub async fn create_child<D>(
    db: &D,
    rule: &CampdirAggregateRule,
    input_doc: CampdirDocument,
) -> CampdirResult<CampdirDocument>
where
    D: CampdirCreateSupport + CampdirAggregationSupport + CampdirUpdateSupport + Sync,
{
    let created = db.create_doc(rule.child_collection_id.as_str(), input_doc).await?;
    best_effort_recompute(db, rule, parent_ref_of(&created, rule)).await;
    Ok(created)
}

pub async fn create_child_obj<D, T>(
    db: &D,
    rule: &CampdirAggregateRule,
    document_id: Option<&str>,
    obj: &T,
) -> CampdirResult<T>
where
    D: CampdirCreateSupport + CampdirAggregationSupport + CampdirUpdateSupport + Sync,
    T: Serialize + Sync,
    for<'de> T: Deserialize<'de>,
{
    let created = create_child(db, rule, to_document(document_id, obj)?).await?;
    from_document(&created)
}

pub async fn update_child<D>(
    db: &D,
    rule: &CampdirAggregateRule,
    input_doc: CampdirDocument,
    update_only: Option<Vec<String>>,
) -> CampdirResult<CampdirDocument>
where
    D: CampdirUpdateSupport + CampdirAggregationSupport + Sync,
{
    let updated = db
        .update_doc(rule.child_collection_id.as_str(), input_doc, update_only)
        .await?;
    best_effort_recompute(db, rule, parent_ref_of(&updated, rule)).await;
    Ok(updated)
}

pub async fn update_child_obj<D, T>(
    db: &D,
    rule: &CampdirAggregateRule,
    document_id: &str,
    obj: &T,
    update_only: Option<Vec<String>>,
) -> CampdirResult<T>
where
    D: CampdirUpdateSupport + CampdirAggregationSupport + Sync,
    T: Serialize + Sync,
    for<'de> T: Deserialize<'de>,
{
    let updated = update_child(db, rule, to_document(Some(document_id), obj)?, update_only).await?;
    from_document(&updated)
}

/// Deletes a child and settles the parent's aggregate in three explicit
/// steps: read the child, compute the post-delete average with the child
/// excluded (it still physically exists here; averaging it in would persist
/// a transiently wrong value), delete, then apply the precomputed average.
pub async fn delete_child<D>(
    db: &D,
    rule: &CampdirAggregateRule,
    child_id: &str,
) -> CampdirResult<()>
where
    D: CampdirGetSupport
        + CampdirDeleteSupport
        + CampdirAggregationSupport
        + CampdirUpdateSupport
        + Sync,
{
    let Some(existing) = db
        .get_doc_by_id(rule.child_collection_id.as_str(), child_id)
        .await?
    else {
        return db
            .delete_by_id(rule.child_collection_id.as_str(), child_id)
            .await;
    };

    let parent_id = parent_ref_of(&existing, rule);

    let precomputed = match parent_id.as_deref() {
        Some(parent_id) => match compute_aggregate(db, rule, parent_id, Some(child_id)).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    %err,
                    parent_id,
                    child_id,
                    "Failed to precompute aggregate before child delete; proceeding with delete.",
                );
                None
            }
        },
        None => None,
    };

    db.delete_by_id(rule.child_collection_id.as_str(), child_id)
        .await?;

    if let (Some(parent_id), Some(value)) = (parent_id.as_deref(), precomputed) {
        apply_aggregate(db, rule, parent_id, value).await;
    }

    Ok(())
}

fn parent_ref_of(doc: &CampdirDocument, rule: &CampdirAggregateRule) -> Option<String> {
    match doc.field(rule.parent_ref_field.as_str()) {
        Some(CampdirValue::String(parent_id)) => Some(parent_id.clone()),
        _ => None,
    }
}

async fn best_effort_recompute<D>(
    db: &D,
    rule: &CampdirAggregateRule,
    parent_id: Option<String>,
) where
    D: CampdirAggregationSupport + CampdirUpdateSupport + Sync,
{
    match parent_id {
        Some(parent_id) => {
            if let Err(err) = recompute_aggregate(db, rule, parent_id.as_str(), None).await {
                warn!(
                    %err,
                    parent_id = parent_id.as_str(),
                    "Failed to recompute derived aggregate after child write; child mutation stands.",
                );
            }
        }
        None => debug!(
            child_collection_id = rule.child_collection_id.as_str(),
            "Child document carries no parent reference; skipping aggregate recompute.",
        ),
    }
}
