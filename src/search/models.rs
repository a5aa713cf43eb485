use crate::catalog::ExternalListing;
use crate::service::models::{ServiceCategory, ServiceWithProvider};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl SearchQuery {
    /// Blank parameters count as absent.
    pub fn normalized(self) -> (Option<String>, Option<String>) {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
        };
        (clean(self.q), clean(self.category))
    }
}

/// `all` (any case) means no filter; anything else must be a known category or alias.
pub fn category_filter(category: Option<&str>) -> Result<Option<ServiceCategory>, String> {
    match category {
        Some(c) if !c.eq_ignore_ascii_case("all") => c.parse().map(Some),
        _ => Ok(None),
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Listing {
    Internal(ServiceWithProvider),
    External(&'static ExternalListing),
}

#[derive(Debug, Serialize)]
pub struct SearchMeta {
    pub query: Option<String>,
    pub category: Option<String>,
    pub count: usize,
    pub external_search_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub services: Vec<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SearchMeta>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        SearchResponse {
            services: Vec::new(),
            meta: None,
        }
    }
}

/// Escapes LIKE wildcards so user input only ever matches literally.
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_parameters_are_absent() {
        let query = SearchQuery {
            q: Some("   ".to_owned()),
            category: Some(" venue ".to_owned()),
        };
        assert_eq!(query.normalized(), (None, Some("venue".to_owned())));
    }

    #[test]
    fn category_aliases_match_stored_values() {
        assert_eq!(category_filter(Some("decor")), Ok(Some(ServiceCategory::Decoration)));
        assert_eq!(category_filter(Some("Venue")), Ok(Some(ServiceCategory::Venue)));
    }

    #[test]
    fn all_category_is_no_filter() {
        assert_eq!(category_filter(Some("ALL")), Ok(None));
        assert_eq!(category_filter(None), Ok(None));
        assert!(category_filter(Some("yachts")).is_err());
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("قاعة"), "%قاعة%");
    }

    #[test]
    fn empty_response_has_no_meta() {
        let body = serde_json::to_value(SearchResponse::empty()).unwrap();
        assert_eq!(body, serde_json::json!({"services": []}));
    }
}
