use super::pagination::parse_page_param;
use crate::{
    compile_filter, CampdirPageWindow, CampdirPredicate, CampdirQueryDirection, CampdirQueryOrder,
    CampdirQueryParams, CampdirRawQuery, CampdirRawValue, CAMPDIR_DEFAULT_LIMIT,
    CAMPDIR_DEFAULT_PAGE,
};

/// Every unsorted listing orders newest-first. This default is part of the
/// read contract; changing it reorders every listing endpoint.
pub const CAMPDIR_DEFAULT_SORT_FIELD: &str = "createdAt";

/// One complete description of what subset and shape of a collection to
/// return: filter predicate, projection, sort keys and the requested page.
///
/// A view request is built per inbound read, is self-contained, and holds no
/// references into the raw input. Parsing never fails: every malformed piece
/// degrades to its default.
#[derive(Debug, PartialEq, Clone)]
pub struct CampdirViewRequest {
    pub predicate: CampdirPredicate,
    /// Fields to return; empty means all fields.
    pub selected_fields: Vec<String>,
    pub sort_keys: Vec<CampdirQueryOrder>,
    pub page: u32,
    pub limit: u32,
}

impl CampdirViewRequest {
    /// Parses a raw query-parameter map. Filter compilation is delegated to
    /// [`compile_filter`]; `select`, `sort`, `page` and `limit` are consumed
    /// here and never reach the predicate.
    pub fn parse(raw: &CampdirRawQuery) -> Self {
        Self {
            predicate: compile_filter(raw),
            selected_fields: parse_select(raw.get("select")),
            sort_keys: parse_sort(raw.get("sort")),
            page: parse_page_param(raw.get("page"), CAMPDIR_DEFAULT_PAGE),
            limit: parse_page_param(raw.get("limit"), CAMPDIR_DEFAULT_LIMIT),
        }
    }

    /// Lowers this view request plus a computed page window into storage
    /// query parameters.
    pub fn to_query_params(
        &self,
        collection_id: &str,
        window: &CampdirPageWindow,
    ) -> CampdirQueryParams {
        CampdirQueryParams::new(collection_id.to_string())
            .opt_filter(if self.predicate.is_empty() {
                None
            } else {
                Some(self.predicate.clone())
            })
            .with_order_by(self.sort_keys.clone())
            .with_offset(window.skip)
            .with_limit(window.take)
            .opt_return_only_fields(if self.selected_fields.is_empty() {
                None
            } else {
                Some(self.selected_fields.clone())
            })
    }
}

fn parse_select(value: Option<&CampdirRawValue>) -> Vec<String> {
    match value.and_then(|v| v.last_scalar()) {
        Some(scalar) => scalar
            .split(',')
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .map(|field| field.to_string())
            .collect(),
        None => Vec::new(),
    }
}

fn parse_sort(value: Option<&CampdirRawValue>) -> Vec<CampdirQueryOrder> {
    let keys: Vec<CampdirQueryOrder> = match value.and_then(|v| v.last_scalar()) {
        Some(scalar) => scalar
            .split(',')
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .map(|field| match field.strip_prefix('-') {
                Some(name) => {
                    CampdirQueryOrder::new(name.to_string(), CampdirQueryDirection::Descending)
                }
                None => CampdirQueryOrder::new(
                    field.to_string(),
                    CampdirQueryDirection::Ascending,
                ),
            })
            .filter(|order| !order.field_name.is_empty())
            .collect(),
        None => Vec::new(),
    };

    if keys.is_empty() {
        vec![CampdirQueryOrder::new(
            CAMPDIR_DEFAULT_SORT_FIELD.to_string(),
            CampdirQueryDirection::Descending,
        )]
    } else {
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate;

    fn raw(pairs: &[(&str, &str)]) -> CampdirRawQuery {
        pairs.iter().copied().collect()
    }

    #[test]
    fn select_becomes_an_ordered_field_list() {
        let request = CampdirViewRequest::parse(&raw(&[("select", "name,description,tuition")]));
        assert_eq!(
            request.selected_fields,
            vec!["name", "description", "tuition"]
        );
    }

    #[test]
    fn absent_select_means_all_fields() {
        let request = CampdirViewRequest::parse(&raw(&[]));
        assert!(request.selected_fields.is_empty());

        let request = CampdirViewRequest::parse(&raw(&[("select", "")]));
        assert!(request.selected_fields.is_empty());
    }

    #[test]
    fn sort_prefix_controls_direction() {
        let request = CampdirViewRequest::parse(&raw(&[("sort", "-tuition,title")]));
        assert_eq!(
            request.sort_keys,
            vec![
                CampdirQueryOrder::new(
                    "tuition".to_string(),
                    CampdirQueryDirection::Descending
                ),
                CampdirQueryOrder::new("title".to_string(), CampdirQueryDirection::Ascending),
            ]
        );
    }

    #[test]
    fn default_sort_is_newest_first() {
        let request = CampdirViewRequest::parse(&raw(&[("housing", "true")]));
        assert_eq!(
            request.sort_keys,
            vec![CampdirQueryOrder::new(
                "createdAt".to_string(),
                CampdirQueryDirection::Descending
            )]
        );
    }

    #[test]
    fn page_and_limit_default_when_missing_or_invalid() {
        let request = CampdirViewRequest::parse(&raw(&[]));
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 25);

        let request = CampdirViewRequest::parse(&raw(&[("page", "x"), ("limit", "-1")]));
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 25);

        let request = CampdirViewRequest::parse(&raw(&[("page", "3"), ("limit", "10")]));
        assert_eq!(request.page, 3);
        assert_eq!(request.limit, 10);
    }

    #[test]
    fn parsing_leaves_the_raw_input_intact() {
        let before = raw(&[("select", "name"), ("cost[gte]", "100"), ("page", "2")]);
        let after = before.clone();
        let _ = CampdirViewRequest::parse(&before);
        assert_eq!(before, after);
    }

    #[test]
    fn lowering_carries_window_and_projection() {
        let request = CampdirViewRequest::parse(&raw(&[
            ("tuition[gte]", "500"),
            ("select", "title,tuition"),
            ("sort", "-tuition"),
            ("page", "2"),
            ("limit", "5"),
        ]));
        let window = paginate(request.page, request.limit, 12);
        let params = request.to_query_params("courses", &window);

        assert_eq!(params.collection_id, "courses");
        assert_eq!(params.offset, Some(5));
        assert_eq!(params.limit, Some(5));
        assert_eq!(
            params.return_only_fields,
            Some(vec!["title".to_string(), "tuition".to_string()])
        );
        assert!(params.filter.is_some());
    }

    #[test]
    fn empty_predicate_lowers_to_no_filter() {
        let request = CampdirViewRequest::parse(&raw(&[("page", "1")]));
        let window = paginate(request.page, request.limit, 0);
        let params = request.to_query_params("bootcamps", &window);
        assert_eq!(params.filter, None);
    }
}
