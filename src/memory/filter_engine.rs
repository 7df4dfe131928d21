use crate::{
    campdir_doc_get_field_by_path, CampdirComparison, CampdirDocument, CampdirFieldCondition,
    CampdirPredicate, CampdirValue,
};

/// Evaluates a compiled predicate against documents. All clauses must hold;
/// a clause whose field is missing from the document does not match.
pub struct CampdirFilterEngine<'a> {
    predicate: &'a CampdirPredicate,
}

impl<'a> CampdirFilterEngine<'a> {
    pub fn new(predicate: &'a CampdirPredicate) -> Self {
        Self { predicate }
    }

    pub fn matches_doc(&'a self, doc: &CampdirDocument) -> bool {
        self.predicate
            .iter()
            .all(|(field_name, condition)| Self::matches_doc_condition(doc, field_name, condition))
    }

    fn matches_doc_condition(
        doc: &CampdirDocument,
        field_name: &str,
        condition: &CampdirFieldCondition,
    ) -> bool {
        let Some(field_value) = campdir_doc_get_field_by_path(doc, field_name) else {
            return false;
        };

        match condition {
            CampdirFieldCondition::Equals(compare_with) => {
                compare_values(CompareOp::Equal, field_value, compare_with)
            }
            CampdirFieldCondition::Compare(comparisons) => {
                comparisons.iter().all(|(comparison, compare_with)| {
                    compare_values(CompareOp::from(*comparison), field_value, compare_with)
                })
            }
        }
    }
}

pub(crate) enum CompareOp {
    Equal,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
}

impl From<CampdirComparison> for CompareOp {
    fn from(comparison: CampdirComparison) -> Self {
        match comparison {
            CampdirComparison::GreaterThan => CompareOp::GreaterThan,
            CampdirComparison::GreaterThanOrEqual => CompareOp::GreaterThanOrEqual,
            CampdirComparison::LessThan => CompareOp::LessThan,
            CampdirComparison::LessThanOrEqual => CompareOp::LessThanOrEqual,
            CampdirComparison::In => CompareOp::In,
        }
    }
}

/// Typed value comparison with document-store equality semantics: equality
/// against an array field matches membership, `in` intersects, and strings
/// order lexicographically (which keeps RFC 3339 timestamps sortable).
/// Mismatched type combinations compare as false.
pub(crate) fn compare_values(op: CompareOp, a: &CampdirValue, b: &CampdirValue) -> bool {
    match (op, a, b) {
        (CompareOp::Equal, CampdirValue::Null, CampdirValue::Null) => true,

        (CompareOp::Equal, CampdirValue::Bool(a_val), CampdirValue::Bool(b_val)) => a_val == b_val,

        (CompareOp::Equal, CampdirValue::Number(a_val), CampdirValue::Number(b_val)) => {
            a_val == b_val
        }
        (CompareOp::LessThan, CampdirValue::Number(a_val), CampdirValue::Number(b_val)) => {
            a_val < b_val
        }
        (CompareOp::LessThanOrEqual, CampdirValue::Number(a_val), CampdirValue::Number(b_val)) => {
            a_val <= b_val
        }
        (CompareOp::GreaterThan, CampdirValue::Number(a_val), CampdirValue::Number(b_val)) => {
            a_val > b_val
        }
        (
            CompareOp::GreaterThanOrEqual,
            CampdirValue::Number(a_val),
            CampdirValue::Number(b_val),
        ) => a_val >= b_val,

        (CompareOp::Equal, CampdirValue::String(a_val), CampdirValue::String(b_val)) => {
            a_val == b_val
        }
        (CompareOp::LessThan, CampdirValue::String(a_val), CampdirValue::String(b_val)) => {
            a_val < b_val
        }
        (CompareOp::LessThanOrEqual, CampdirValue::String(a_val), CampdirValue::String(b_val)) => {
            a_val <= b_val
        }
        (CompareOp::GreaterThan, CampdirValue::String(a_val), CampdirValue::String(b_val)) => {
            a_val > b_val
        }
        (
            CompareOp::GreaterThanOrEqual,
            CampdirValue::String(a_val),
            CampdirValue::String(b_val),
        ) => a_val >= b_val,

        // Array equality: exact match against another array, membership
        // against a scalar.
        (CompareOp::Equal, CampdirValue::Array(a_val), CampdirValue::Array(b_val)) => {
            a_val == b_val
        }
        (CompareOp::Equal, CampdirValue::Array(a_val), b_val) => a_val
            .iter()
            .any(|element| compare_values(CompareOp::Equal, element, b_val)),

        // `in`: the field value (or, for an array field, any of its
        // elements) must appear in the candidate list. A scalar candidate
        // degrades to plain equality.
        (CompareOp::In, CampdirValue::Array(a_val), CampdirValue::Array(b_val)) => {
            a_val.iter().any(|element| {
                b_val
                    .iter()
                    .any(|candidate| compare_values(CompareOp::Equal, element, candidate))
            })
        }
        (CompareOp::In, a_val, CampdirValue::Array(b_val)) => b_val
            .iter()
            .any(|candidate| compare_values(CompareOp::Equal, a_val, candidate)),
        (CompareOp::In, a_val, b_val) => compare_values(CompareOp::Equal, a_val, b_val),

        // Any other combinations result in false
        _ => false,
    }
}
