use crate::memory::filter_engine::{compare_values, CampdirFilterEngine, CompareOp};
use crate::{campdir_doc_get_field_by_path, CampdirDocument, CampdirQueryDirection, CampdirQueryParams};
use std::cmp::Ordering;

/// Executes the non-filter parts of a query over in-memory documents:
/// ordering by the signed field list, the offset/limit window, and field
/// projection.
#[derive(Clone)]
pub struct CampdirQueryEngine {
    pub query: CampdirQueryParams,
}

impl CampdirQueryEngine {
    pub fn new(query: &CampdirQueryParams) -> Self {
        Self {
            query: query.clone(),
        }
    }

    pub fn matches_doc(&self, doc: &CampdirDocument) -> bool {
        if let Some(filter) = &self.query.filter {
            let filter_engine = CampdirFilterEngine::new(filter);
            filter_engine.matches_doc(doc)
        } else {
            true
        }
    }

    pub fn sort_docs(&self, docs: &mut [CampdirDocument]) {
        if let Some(order_by) = &self.query.order_by {
            docs.sort_by(|doc_a, doc_b| {
                let mut current_ordering = Ordering::Equal;
                for sort_field in order_by {
                    if current_ordering != Ordering::Equal {
                        break;
                    }
                    match (
                        campdir_doc_get_field_by_path(doc_a, &sort_field.field_name),
                        campdir_doc_get_field_by_path(doc_b, &sort_field.field_name),
                    ) {
                        (Some(field_a), Some(field_b)) => {
                            if compare_values(CompareOp::Equal, field_a, field_b) {
                                continue;
                            }

                            if compare_values(CompareOp::LessThan, field_a, field_b) {
                                current_ordering = match sort_field.direction {
                                    CampdirQueryDirection::Ascending => Ordering::Less,
                                    CampdirQueryDirection::Descending => Ordering::Greater,
                                }
                            } else {
                                current_ordering = match sort_field.direction {
                                    CampdirQueryDirection::Ascending => Ordering::Greater,
                                    CampdirQueryDirection::Descending => Ordering::Less,
                                }
                            }
                        }
                        // Documents missing the sort field keep their
                        // relative order.
                        (None, None) | (None, Some(_)) | (Some(_), None) => {
                            current_ordering = Ordering::Equal
                        }
                    }
                }
                current_ordering
            });
        }
    }

    /// Applies the page window: skip before take, so a window deep into the
    /// collection still fills its page.
    pub fn window_docs(&self, docs: Vec<CampdirDocument>) -> Vec<CampdirDocument> {
        let skipped = self.query.offset.unwrap_or(0) as usize;
        let taken = self.query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        docs.into_iter().skip(skipped).take(taken).collect()
    }

    pub fn project_docs(&self, docs: Vec<CampdirDocument>) -> Vec<CampdirDocument> {
        match &self.query.return_only_fields {
            Some(selected) => docs
                .into_iter()
                .map(|mut doc| {
                    doc.fields
                        .retain(|field_name, _| selected.iter().any(|s| s == field_name));
                    doc
                })
                .collect(),
            None => docs,
        }
    }

    pub fn process_docs(&self, mut docs: Vec<CampdirDocument>) -> Vec<CampdirDocument> {
        self.sort_docs(&mut docs);
        let docs = self.window_docs(docs);
        self.project_docs(docs)
    }
}
