use crate::domain::project::{
    errors::DomainError,
    listing::{ListingQuery, SortOption, TimeRange},
    value_objects::Category,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListProjectsRequest {
    /// Free-text search over title, description and category
    pub q: Option<String>,
    /// `most-liked` (default), `most-viewed` or `newest`
    pub sort: Option<String>,
    /// `all-time` (default), `this-month`, `this-week` or `today`
    pub time: Option<String>,
    /// Category display name, e.g. `UI Kit`
    pub category: Option<String>,
    #[ts(type = "number | null")]
    pub limit: Option<i64>,
    #[ts(type = "number | null")]
    pub offset: Option<i64>,
}

impl ListProjectsRequest {
    pub fn into_query(self) -> Result<ListingQuery, DomainError> {
        let sort = match non_blank(self.sort.as_deref()) {
            Some(s) => s.parse::<SortOption>()?,
            None => SortOption::default(),
        };
        let time_range = match non_blank(self.time.as_deref()) {
            Some(t) => t.parse::<TimeRange>()?,
            None => TimeRange::default(),
        };
        let category = non_blank(self.category.as_deref())
            .map(str::parse::<Category>)
            .transpose()?;
        Ok(ListingQuery::new(
            self.q.as_deref(),
            category,
            sort,
            time_range,
            self.limit,
            self.offset,
        ))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
