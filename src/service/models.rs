use crate::schema::{profiles, service_packages, services};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Venue,
    Catering,
    Photography,
    Decoration,
    Planner,
    Transport,
    Beauty,
    Other,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Venue => "venue",
            ServiceCategory::Catering => "catering",
            ServiceCategory::Photography => "photography",
            ServiceCategory::Decoration => "decoration",
            ServiceCategory::Planner => "planner",
            ServiceCategory::Transport => "transport",
            ServiceCategory::Beauty => "beauty",
            ServiceCategory::Other => "other",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "venue" => Ok(ServiceCategory::Venue),
            "catering" => Ok(ServiceCategory::Catering),
            "photography" => Ok(ServiceCategory::Photography),
            // the management form used "decor" before the catalogue settled on "decoration"
            "decoration" | "decor" => Ok(ServiceCategory::Decoration),
            "planner" => Ok(ServiceCategory::Planner),
            "transport" => Ok(ServiceCategory::Transport),
            "beauty" => Ok(ServiceCategory::Beauty),
            "other" => Ok(ServiceCategory::Other),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub base_price: f64,
    pub location: String,
    pub capacity: i32,
    pub features: Vec<String>,
    pub is_active: bool,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate)]
pub struct CreateService {
    #[validate(length(min = 2, max = 150))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
    #[validate(length(min = 2, max = 150))]
    pub location: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Insertable)]
#[diesel(table_name = services)]
pub struct NewService {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub base_price: f64,
    pub location: String,
    pub capacity: i32,
    pub features: Vec<String>,
    pub is_active: bool,
}

#[derive(Deserialize, Validate)]
pub struct UpdateServicePayload {
    #[validate(length(min = 2, max = 150))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub base_price: Option<f64>,
    #[validate(length(min = 2, max = 150))]
    pub location: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    pub features: Option<Vec<String>>,
}

#[derive(AsChangeset)]
#[diesel(table_name = services)]
pub struct UpdateService {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub base_price: Option<f64>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub features: Option<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Serialize)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProviderSummary {
    pub business_name: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
    pub whatsapp_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct ServiceWithProvider {
    #[serde(flatten)]
    pub service: Service,
    pub provider: ProviderSummary,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Serialize)]
#[diesel(belongs_to(Service))]
#[diesel(table_name = service_packages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServicePackage {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub features: Vec<String>,
    pub max_guests: Option<i32>,
    pub duration_hours: Option<i32>,
    pub is_active: bool,
}

#[derive(Deserialize, Validate)]
pub struct CreatePackage {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[validate(range(min = 1))]
    pub max_guests: Option<i32>,
    #[validate(range(min = 1, max = 72))]
    pub duration_hours: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = service_packages)]
pub struct NewPackage {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub features: Vec<String>,
    pub max_guests: Option<i32>,
    pub duration_hours: Option<i32>,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub provider: ProviderSummary,
    pub packages: Vec<ServicePackage>,
}

#[derive(Deserialize, Debug)]
pub struct Pagination {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn bounds(&self) -> (i64, i64) {
        (
            self.offset.unwrap_or(0).max(0),
            self.limit.unwrap_or(50).clamp(1, 100),
        )
    }
}

/// Trims every feature and drops the blank ones a comma-separated form leaves behind.
pub fn clean_features(features: Vec<String>) -> Vec<String> {
    features
        .into_iter()
        .map(|f| f.trim().to_owned())
        .filter(|f| !f.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_accept_legacy_decor() {
        assert_eq!("decor".parse::<ServiceCategory>().unwrap(), ServiceCategory::Decoration);
        assert_eq!(" Venue ".parse::<ServiceCategory>().unwrap(), ServiceCategory::Venue);
        assert!("fireworks".parse::<ServiceCategory>().is_err());
    }

    #[test]
    fn blank_features_are_dropped() {
        let features = clean_features(vec![
            " بوفيه مفتوح ".to_owned(),
            "".to_owned(),
            "  ".to_owned(),
            "مواقف سيارات".to_owned(),
        ]);
        assert_eq!(features, vec!["بوفيه مفتوح", "مواقف سيارات"]);
    }

    #[test]
    fn pagination_is_clamped() {
        let page = Pagination {
            offset: Some(-4),
            limit: Some(1_000),
        };
        assert_eq!(page.bounds(), (0, 100));
    }
}
