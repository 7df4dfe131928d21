//! Derived-aggregate maintenance.
//!
//! A parent document carries a numeric summary of its children (the average
//! course tuition of a bootcamp, the average review rating). The engine here
//! recomputes that summary from the currently persisted children after every
//! child mutation and writes it back with a single by-id patch. The summary
//! is advisory: a failed write-back is logged and swallowed, and concurrent
//! recomputes for one parent resolve last-write-wins. The value is never
//! computed lazily on read.

mod child_writes;
pub use child_writes::*;

use crate::{
    CampdirAggregationSupport, CampdirAverageQueryParams, CampdirPredicate, CampdirResult,
    CampdirUpdateSupport, CampdirValue,
};
use rsb_derive::Builder;
use tracing::*;

/// Rounding applied to a derived average before it is persisted. Part of the
/// observable contract, not a display concern.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum CampdirAggregateRounding {
    /// Round to the nearest integer (average cost).
    Unit,
    /// Round to one decimal place (average rating).
    Tenth,
}

impl CampdirAggregateRounding {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            CampdirAggregateRounding::Unit => value.round(),
            CampdirAggregateRounding::Tenth => (value * 10.0).round() / 10.0,
        }
    }
}

/// Everything the engine needs to maintain one derived field, passed
/// explicitly at every call site: callers name the child collection, the
/// field averaged, and the parent field written; there is no ambient model
/// registry to reach through.
#[derive(Debug, Eq, PartialEq, Clone, Builder)]
pub struct CampdirAggregateRule {
    /// Collection holding the child documents.
    pub child_collection_id: String,
    /// Collection holding the parent documents.
    pub parent_collection_id: String,
    /// Child field referencing the parent document id.
    pub parent_ref_field: String,
    /// Child field whose values are averaged.
    pub source_field: String,
    /// Parent field receiving the rounded average.
    pub target_field: String,
    pub rounding: CampdirAggregateRounding,
}

impl CampdirAggregateRule {
    /// courses.tuition -> bootcamps.averageCost, rounded to the nearest
    /// integer.
    pub fn average_cost() -> Self {
        CampdirAggregateRule::new(
            "courses".to_string(),
            "bootcamps".to_string(),
            "bootcamp".to_string(),
            "tuition".to_string(),
            "averageCost".to_string(),
            CampdirAggregateRounding::Unit,
        )
    }

    /// reviews.rating -> bootcamps.averageRating, rounded to one decimal
    /// place.
    pub fn average_rating() -> Self {
        CampdirAggregateRule::new(
            "reviews".to_string(),
            "bootcamps".to_string(),
            "bootcamp".to_string(),
            "rating".to_string(),
            "averageRating".to_string(),
            CampdirAggregateRounding::Tenth,
        )
    }
}

/// Computes the rounded average of `rule.source_field` over the parent's
/// children. `exclude_child_id` removes one child from the match set even
/// though it still exists in storage; the deletion flow computes the
/// post-delete value while the record is still queryable. Zero matching
/// children define the aggregate as `0`.
pub async fn compute_aggregate<D>(
    db: &D,
    rule: &CampdirAggregateRule,
    parent_id: &str,
    exclude_child_id: Option<&str>,
) -> CampdirResult<f64>
where
    D: CampdirAggregationSupport + Sync,
{
    let mut filter = CampdirPredicate::new();
    filter.set_equals(rule.parent_ref_field.as_str(), parent_id);

    let average = db
        .average_field(
            CampdirAverageQueryParams::new(
                rule.child_collection_id.clone(),
                rule.source_field.clone(),
            )
            .with_filter(filter)
            .opt_exclude_document_id(exclude_child_id.map(|id| id.to_string())),
        )
        .await?;

    Ok(rule.rounding.apply(average.unwrap_or(0.0)))
}

/// Persists a computed aggregate onto the parent with one by-id patch.
/// Failures (parent already gone, transient store error) are logged and
/// swallowed so the triggering child mutation still reports success.
pub async fn apply_aggregate<D>(
    db: &D,
    rule: &CampdirAggregateRule,
    parent_id: &str,
    value: f64,
) where
    D: CampdirUpdateSupport + Sync,
{
    let result = db
        .patch_doc_fields(
            rule.parent_collection_id.as_str(),
            parent_id,
            vec![(rule.target_field.clone(), CampdirValue::Number(value))],
        )
        .await;

    if let Err(err) = result {
        warn!(
            %err,
            parent_id,
            target_field = rule.target_field.as_str(),
            "Failed to write derived aggregate to parent; child mutation stands.",
        );
    }
}

/// Recomputes and persists the parent's derived field. Idempotent while no
/// child mutation intervenes. Returns the computed value.
pub async fn recompute_aggregate<D>(
    db: &D,
    rule: &CampdirAggregateRule,
    parent_id: &str,
    exclude_child_id: Option<&str>,
) -> CampdirResult<f64>
where
    D: CampdirAggregationSupport + CampdirUpdateSupport + Sync,
{
    let value = compute_aggregate(db, rule, parent_id, exclude_child_id).await?;
    apply_aggregate(db, rule, parent_id, value).await;
    Ok(value)
}
