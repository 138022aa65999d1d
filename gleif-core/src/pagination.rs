use serde_json::Value;

use crate::GleifError;

/// Raw `meta.pagination.lastPage` value as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastPage {
    /// Integer page number.
    Number(u64),
    /// Boolean flag.
    Flag(bool),
    /// Any other JSON type (string, float, object, ...).
    Unrecognized,
}

/// Pagination metadata of one page, paired with the page number requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSignal {
    /// `lastPage`, or `None` when absent or null.
    pub last_page: Option<LastPage>,
    /// Page number that produced this body (1-based).
    pub current_page: u32,
}

impl PaginationSignal {
    /// Read the signal from a page body.
    #[must_use]
    pub fn from_body(body: &Value, current_page: u32) -> Self {
        let last_page = match body.pointer("/meta/pagination/lastPage") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(LastPage::Flag(*b)),
            Some(v) => Some(v.as_u64().map_or(LastPage::Unrecognized, LastPage::Number)),
        };
        Self {
            last_page,
            current_page,
        }
    }

    /// Whether `current_page` is the final page.
    ///
    /// Only an integer `lastPage` beyond the current page keeps pagination
    /// going. Absent, boolean, zero and unrecognized values are terminal, as is
    /// a `lastPage` at or below the current page.
    #[must_use]
    pub fn is_final(&self) -> bool {
        match self.last_page {
            Some(LastPage::Number(last)) => last <= u64::from(self.current_page),
            None | Some(LastPage::Flag(_) | LastPage::Unrecognized) => true,
        }
    }
}

/// Items of a page body.
///
/// A missing or null `data` reads as an empty page.
///
/// # Errors
/// Returns `GleifError::Data` when the body is not an object or `data` is
/// present but not an array.
pub fn page_items(body: &Value) -> Result<&[Value], GleifError> {
    let Some(obj) = body.as_object() else {
        return Err(GleifError::data("page body is not an object"));
    };
    match obj.get("data") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(GleifError::data("page `data` is not an array")),
    }
}
