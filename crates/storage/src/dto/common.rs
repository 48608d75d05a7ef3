use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_OFFSET: i64 = 0;

/// Raw `limit`/`offset` query values, kept as text so that non-numeric
/// input can be echoed back to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    /// Page size, 1 to 100 (default 20)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Rows to skip, 0 or more (default 0)
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

fn parse_or_default(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => value.parse().ok(),
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<Pagination, String> {
        let limit = parse_or_default(self.limit.as_deref(), DEFAULT_LIMIT);
        let offset = parse_or_default(self.offset.as_deref(), DEFAULT_OFFSET);

        match (limit, offset) {
            (Some(limit), Some(offset))
                if (1..=MAX_LIMIT).contains(&limit) && offset >= 0 =>
            {
                Ok(Pagination { limit, offset })
            }
            _ => Err("Invalid pagination parameters".to_string()),
        }
    }
}
