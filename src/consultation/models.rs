use crate::schema::consultation_requests;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Debug, PartialEq, Serialize)]
#[diesel(table_name = consultation_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Consultation {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub event_type: String,
    pub city: String,
    pub event_date: Option<NaiveDate>,
    pub budget_range: String,
    pub services_needed: Vec<String>,
    pub user_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate)]
pub struct CreateConsultation {
    #[validate(length(min = 1, max = 60))]
    pub event_type: String,
    #[validate(length(min = 1, max = 60))]
    pub city: String,
    pub event_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 30))]
    pub budget_range: String,
    #[serde(default)]
    pub services_needed: Vec<String>,
    #[validate(length(min = 2, max = 100))]
    pub user_name: String,
    #[validate(length(min = 7, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = consultation_requests)]
pub struct NewConsultation {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub event_type: String,
    pub city: String,
    pub event_date: Option<NaiveDate>,
    pub budget_range: String,
    pub services_needed: Vec<String>,
    pub user_name: String,
    pub phone: String,
    pub email: Option<String>,
}
