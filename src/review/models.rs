use crate::schema::reviews;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Review {
    pub id: Uuid,
    pub request_id: Uuid,
    pub client_id: Uuid,
    pub contractor_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
}

#[derive(Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReview {
    pub id: Uuid,
    pub request_id: Uuid,
    pub client_id: Uuid,
    pub contractor_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub client_name: Option<String>,
}

/// Average (two decimals) and count of a service's ratings.
pub fn rating_summary(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }

    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let average = sum as f64 / ratings.len() as f64;
    ((average * 100.0).round() / 100.0, ratings.len() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ratings_means_zero() {
        assert_eq!(rating_summary(&[]), (0.0, 0));
    }

    #[test]
    fn average_is_rounded_to_cents() {
        assert_eq!(rating_summary(&[5, 4, 4]), (4.33, 3));
        assert_eq!(rating_summary(&[5]), (5.0, 1));
    }
}
