use crate::CampdirValue;
use rsb_derive::Builder;

/// Parameters for constructing and executing a query against one collection.
///
/// This struct encapsulates all configurable aspects of a read: the target
/// collection, the filter predicate, ordering, window (offset/limit) and
/// projection. The view-request layer produces these; storage implementations
/// consume them.
///
/// # Examples
///
/// ```rust
/// use campdir::*;
///
/// let mut predicate = CampdirPredicate::new();
/// predicate.set_equals("housing", true);
///
/// let params = CampdirQueryParams::new("bootcamps".to_string())
///     .with_filter(predicate)
///     .with_order_by(vec![CampdirQueryOrder::new(
///         "createdAt".to_string(),
///         CampdirQueryDirection::Descending,
///     )])
///     .with_limit(10);
/// ```
#[derive(Debug, PartialEq, Clone, Builder)]
pub struct CampdirQueryParams {
    /// The ID of the collection to query.
    pub collection_id: String,

    /// The filter to apply to the query.
    pub filter: Option<CampdirPredicate>,

    /// A list of fields and directions to order the results by.
    pub order_by: Option<Vec<CampdirQueryOrder>>,

    /// The maximum number of results to return.
    pub limit: Option<u32>,

    /// The number of results to skip.
    pub offset: Option<u32>,

    /// If set, only these fields will be returned in the query results
    /// (projection). If `None`, all fields are returned.
    pub return_only_fields: Option<Vec<String>>,
}

/// The closed set of comparison operators a predicate may carry.
///
/// This enumeration IS the operator allow-list: query keys name operators as
/// text (`gt`, `gte`, `lt`, `lte`, `in`), and anything that does not resolve
/// to one of these variants never reaches a predicate. There is no
/// string-keyed operator representation anywhere downstream, so a bypassed
/// check cannot smuggle a store-specific operator through.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub enum CampdirComparison {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
}

impl CampdirComparison {
    /// Resolves a query-string operator token. Unknown tokens resolve to
    /// `None` and the caller drops the whole entry.
    pub fn from_query_token(token: &str) -> Option<Self> {
        match token {
            "gt" => Some(CampdirComparison::GreaterThan),
            "gte" => Some(CampdirComparison::GreaterThanOrEqual),
            "lt" => Some(CampdirComparison::LessThan),
            "lte" => Some(CampdirComparison::LessThanOrEqual),
            "in" => Some(CampdirComparison::In),
            _ => None,
        }
    }

    pub fn as_query_token(&self) -> &'static str {
        match self {
            CampdirComparison::GreaterThan => "gt",
            CampdirComparison::GreaterThanOrEqual => "gte",
            CampdirComparison::LessThan => "lt",
            CampdirComparison::LessThanOrEqual => "lte",
            CampdirComparison::In => "in",
        }
    }
}

/// The condition attached to one field of a predicate.
#[derive(Debug, PartialEq, Clone)]
pub enum CampdirFieldCondition {
    /// Direct equality with a literal value.
    Equals(CampdirValue),
    /// One or more comparisons, accumulated from `field[op]=value` entries.
    /// Several operators on the same field live in one list.
    Compare(Vec<(CampdirComparison, CampdirValue)>),
}

/// A structured filter over one collection: an ordered mapping from field
/// name to its condition. All clauses must hold for a document to match.
///
/// Predicates are built by the filter compiler from untrusted input and are
/// therefore deliberately closed: fields are free-form (the system is
/// schema-agnostic), but conditions only ever hold [`CampdirComparison`]
/// variants or literal equality.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct CampdirPredicate {
    clauses: Vec<(String, CampdirFieldCondition)>,
}

impl CampdirPredicate {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, CampdirFieldCondition)> {
        self.clauses.iter()
    }

    pub fn field(&self, field_name: &str) -> Option<&CampdirFieldCondition> {
        self.clauses
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, condition)| condition)
    }

    /// Sets a direct equality clause, replacing any previous condition on the
    /// field.
    pub fn set_equals<S, V>(&mut self, field_name: S, value: V)
    where
        S: AsRef<str>,
        V: Into<CampdirValue>,
    {
        let field_name = field_name.as_ref();
        let condition = CampdirFieldCondition::Equals(value.into());
        match self
            .clauses
            .iter_mut()
            .find(|(name, _)| name == field_name)
        {
            Some((_, existing)) => *existing = condition,
            None => self.clauses.push((field_name.to_string(), condition)),
        }
    }

    /// Adds a comparison to the field's condition. Comparisons on the same
    /// field accumulate into one list; repeating an operator replaces its
    /// value. A field already pinned by an equality clause keeps the
    /// equality and the comparison is discarded.
    pub fn set_comparison<S, V>(&mut self, field_name: S, op: CampdirComparison, value: V)
    where
        S: AsRef<str>,
        V: Into<CampdirValue>,
    {
        let field_name = field_name.as_ref();
        match self
            .clauses
            .iter_mut()
            .find(|(name, _)| name == field_name)
        {
            Some((_, CampdirFieldCondition::Compare(comparisons))) => {
                match comparisons.iter_mut().find(|(existing, _)| *existing == op) {
                    Some((_, existing_value)) => *existing_value = value.into(),
                    None => comparisons.push((op, value.into())),
                }
            }
            Some((_, CampdirFieldCondition::Equals(_))) => {}
            None => self.clauses.push((
                field_name.to_string(),
                CampdirFieldCondition::Compare(vec![(op, value.into())]),
            )),
        }
    }
}

/// Specifies an ordering for query results based on a field.
#[derive(Debug, Eq, PartialEq, Clone, Builder)]
pub struct CampdirQueryOrder {
    /// The path to the field to order by (e.g., "tuition", "location.city").
    pub field_name: String,
    /// The direction of the ordering (ascending or descending).
    pub direction: CampdirQueryDirection,
}

impl CampdirQueryOrder {
    /// Returns a string representation of the order, e.g., "tuition asc".
    pub fn to_string_format(&self) -> String {
        format!("{} {}", self.field_name, self.direction.to_string())
    }
}

impl<S> From<(S, CampdirQueryDirection)> for CampdirQueryOrder
where
    S: AsRef<str>,
{
    fn from(field_order: (S, CampdirQueryDirection)) -> Self {
        CampdirQueryOrder::new(field_order.0.as_ref().to_string(), field_order.1)
    }
}

/// The direction for ordering query results.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum CampdirQueryDirection {
    /// Sort results in ascending order.
    Ascending,
    /// Sort results in descending order.
    Descending,
}

#[allow(clippy::to_string_trait_impl)]
impl ToString for CampdirQueryDirection {
    fn to_string(&self) -> String {
        match self {
            CampdirQueryDirection::Ascending => "asc".to_string(),
            CampdirQueryDirection::Descending => "desc".to_string(),
        }
    }
}
