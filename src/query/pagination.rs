use crate::CampdirRawValue;
use rsb_derive::Builder;
use serde::Serialize;

pub const CAMPDIR_DEFAULT_PAGE: u32 = 1;
pub const CAMPDIR_DEFAULT_LIMIT: u32 = 25;

/// A pointer to an adjacent page, carried in listing responses.
#[derive(Debug, Eq, PartialEq, Clone, Builder, Serialize)]
pub struct CampdirPageRef {
    pub page: u32,
    pub limit: u32,
}

/// The next/prev descriptor for one listing response. Absent sides are
/// omitted from the serialized payload. Derived purely from
/// (page, limit, total): there is no persisted pagination state.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct CampdirPagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<CampdirPageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<CampdirPageRef>,
}

/// A computed page window: what to skip/take plus the descriptor for the
/// response.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct CampdirPageWindow {
    pub page: u32,
    pub limit: u32,
    pub skip: u32,
    pub take: u32,
    pub pagination: CampdirPagination,
}

/// Computes the window for one page of `total_count` rows.
///
/// `page == 0` and `limit == 0` fall back to the defaults; a zero limit
/// would otherwise produce an empty window whose `next` never advances.
/// `total_count` must be fetched fresh immediately before this call; callers
/// never cache it across requests.
pub fn paginate(page: u32, limit: u32, total_count: usize) -> CampdirPageWindow {
    let page = if page == 0 { CAMPDIR_DEFAULT_PAGE } else { page };
    let limit = if limit == 0 { CAMPDIR_DEFAULT_LIMIT } else { limit };

    let skip = (page - 1).saturating_mul(limit);
    let end_index = (page as u64) * (limit as u64);

    let mut pagination = CampdirPagination::default();
    if end_index < total_count as u64 {
        pagination.next = Some(CampdirPageRef::new(page + 1, limit));
    }
    if skip > 0 {
        pagination.prev = Some(CampdirPageRef::new(page - 1, limit));
    }

    CampdirPageWindow {
        page,
        limit,
        skip,
        take: limit,
        pagination,
    }
}

/// Reads a page/limit control parameter the way the HTTP layer historically
/// did: leading integer of the last scalar (sign allowed, trailing garbage
/// ignored). Missing, unparseable, zero or negative values fall back to the
/// given default.
pub(crate) fn parse_page_param(value: Option<&CampdirRawValue>, default: u32) -> u32 {
    let Some(scalar) = value.and_then(|v| v.last_scalar()) else {
        return default;
    };

    let trimmed = scalar.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if leading.is_empty() || negative {
        return default;
    }

    match leading.parse::<u64>() {
        Ok(0) => default,
        Ok(parsed) => u32::try_from(parsed).unwrap_or(u32::MAX),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_next_but_no_prev() {
        let window = paginate(1, 25, 100);
        assert_eq!(window.skip, 0);
        assert_eq!(window.take, 25);
        assert_eq!(window.pagination.next, Some(CampdirPageRef::new(2, 25)));
        assert_eq!(window.pagination.prev, None);
    }

    #[test]
    fn last_page_has_prev_but_no_next() {
        let window = paginate(4, 25, 100);
        assert_eq!(window.skip, 75);
        assert_eq!(window.pagination.next, None);
        assert_eq!(window.pagination.prev, Some(CampdirPageRef::new(3, 25)));
    }

    #[test]
    fn middle_page_has_both_sides() {
        let window = paginate(2, 25, 100);
        assert_eq!(window.pagination.next, Some(CampdirPageRef::new(3, 25)));
        assert_eq!(window.pagination.prev, Some(CampdirPageRef::new(1, 25)));
    }

    #[test]
    fn page_zero_behaves_like_page_one() {
        assert_eq!(paginate(0, 25, 100), paginate(1, 25, 100));
    }

    #[test]
    fn limit_zero_falls_back_to_default() {
        let window = paginate(1, 0, 100);
        assert_eq!(window.take, CAMPDIR_DEFAULT_LIMIT);
        assert_eq!(
            window.pagination.next,
            Some(CampdirPageRef::new(2, CAMPDIR_DEFAULT_LIMIT))
        );
    }

    #[test]
    fn exact_fit_has_no_next() {
        let window = paginate(2, 25, 50);
        assert_eq!(window.pagination.next, None);
        assert_eq!(window.pagination.prev, Some(CampdirPageRef::new(1, 25)));
    }

    #[test]
    fn descriptor_serializes_without_absent_sides() {
        let window = paginate(1, 25, 100);
        let json = serde_json::to_value(&window.pagination).expect("descriptor must serialize");
        assert_eq!(json, serde_json::json!({ "next": { "page": 2, "limit": 25 } }));
    }

    #[test]
    fn page_params_fall_back_on_bad_input() {
        use crate::CampdirRawValue::Single;

        for bad in ["", "abc", "0", "-3", "  "] {
            assert_eq!(
                parse_page_param(Some(&Single(bad.to_string())), 25),
                25,
                "input {:?} must fall back",
                bad
            );
        }
        assert_eq!(parse_page_param(None, 1), 1);
        assert_eq!(parse_page_param(Some(&Single("2".to_string())), 1), 2);
        assert_eq!(parse_page_param(Some(&Single("10abc".to_string())), 1), 10);
        assert_eq!(parse_page_param(Some(&Single("+7".to_string())), 1), 7);
    }
}
