use serde_json::json;

use crate::status::TripStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> SortOrder {
        if value == "ASC" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// Parameters of the paged trip listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TripQuery {
    pub search_text: String,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub sort_column: String,
    pub sort_order: SortOrder,
    pub status_filter: Option<TripStatus>,
    /// Restricts the listing to trips assigned to this user.
    pub user_sid: Option<String>,
}

impl Default for TripQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            page: 1,
            page_size: 10,
            sort_column: "lastModifiedDate".to_string(),
            sort_order: SortOrder::Desc,
            status_filter: None,
            user_sid: None,
        }
    }
}

impl TripQuery {
    /// Query parameters in the order the backend documents them. `Filters`
    /// is only present when at least one filter is set.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("SearchText", self.search_text.clone()),
            ("Page", self.page.to_string()),
            ("PageSize", self.page_size.to_string()),
            ("SortColumn", self.sort_column.clone()),
            ("SortOrder", self.sort_order.as_str().to_string()),
        ];

        if let Some(filters) = self.filters_json() {
            params.push(("Filters", filters));
        }

        params
    }

    fn filters_json(&self) -> Option<String> {
        let mut filters = Vec::new();

        if let Some(status) = self.status_filter {
            filters.push(json!({ "key": "tripStatus", "value": u8::from(status), "condition": "=" }));
        }
        if let Some(sid) = &self.user_sid {
            filters.push(json!({ "key": "UserSID", "value": sid, "condition": "=" }));
        }

        if filters.is_empty() {
            None
        } else {
            Some(serde_json::Value::Array(filters).to_string())
        }
    }

    /// Filter parameter for a single-trip lookup by SID.
    pub fn by_trip_sid(trip_sid: &str) -> Vec<(&'static str, String)> {
        let filters = json!([{ "key": "TripSID", "value": trip_sid, "condition": "=" }]);
        vec![("Filters", filters.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_has_no_filters() {
        let params = TripQuery::default().params();
        let names: Vec<&str> = params.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["SearchText", "Page", "PageSize", "SortColumn", "SortOrder"]);

        assert_eq!(params[1].1, "1");
        assert_eq!(params[2].1, "10");
        assert_eq!(params[3].1, "lastModifiedDate");
        assert_eq!(params[4].1, "DESC");
    }

    #[test]
    fn filters_combine_into_one_json_array() {
        let query = TripQuery {
            status_filter: Some(TripStatus::InProgress),
            user_sid: Some("u-17".to_string()),
            ..TripQuery::default()
        };

        let params = query.params();
        let filters = &params.last().unwrap().1;
        assert_eq!(params.last().unwrap().0, "Filters");

        let parsed: serde_json::Value = serde_json::from_str(filters).unwrap();
        assert_eq!(
            parsed,
            json!([
                { "key": "tripStatus", "value": 7, "condition": "=" },
                { "key": "UserSID", "value": "u-17", "condition": "=" },
            ])
        );
    }

    #[test]
    fn sid_lookup_filter() {
        let params = TripQuery::by_trip_sid("t-42");
        assert_eq!(params.len(), 1);

        let parsed: serde_json::Value = serde_json::from_str(&params[0].1).unwrap();
        assert_eq!(parsed, json!([{ "key": "TripSID", "value": "t-42", "condition": "=" }]));
    }
}
