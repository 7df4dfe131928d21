use crate::CampdirPagination;
use serde::Serialize;

/// Envelope for listing endpoints: `{ success, count, pagination, data }`.
/// `count` is the number of rows in this page, not the collection total.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CampdirListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub pagination: CampdirPagination,
    pub data: Vec<T>,
}

impl<T> CampdirListResponse<T> {
    pub fn new(pagination: CampdirPagination, data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination,
            data,
        }
    }
}

/// Envelope for single-item endpoints: `{ success, data }`.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CampdirItemResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> CampdirItemResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
