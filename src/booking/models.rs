use crate::schema::bookings;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Booking {
    pub id: Uuid,
    pub service_id: Uuid,
    pub package_id: Option<Uuid>,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub guest_count: Option<i32>,
    pub total_amount: f64,
    pub customer_notes: String,
    pub payment_status: String,
    pub booking_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate)]
pub struct CreateBooking {
    pub service_id: Uuid,
    pub package_id: Option<Uuid>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    #[validate(range(min = 1))]
    pub guest_count: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub customer_notes: String,
}

#[derive(Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBooking {
    pub id: Uuid,
    pub service_id: Uuid,
    pub package_id: Option<Uuid>,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub guest_count: Option<i32>,
    pub total_amount: f64,
    pub customer_notes: String,
    pub payment_status: String,
    pub booking_status: String,
}

/// A capacity of zero means the service doesn't cap guests.
pub fn fits_capacity(capacity: i32, guest_count: Option<i32>) -> bool {
    match guest_count {
        Some(guests) if capacity > 0 => guests <= capacity,
        _ => true,
    }
}

pub fn total_amount(base_price: f64, package_price: Option<f64>) -> f64 {
    package_price.unwrap_or(base_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_services_take_any_party() {
        assert!(fits_capacity(0, Some(5_000)));
        assert!(fits_capacity(200, None));
    }

    #[test]
    fn guests_over_capacity_are_refused() {
        assert!(fits_capacity(200, Some(200)));
        assert!(!fits_capacity(200, Some(201)));
    }

    #[test]
    fn package_price_overrides_base_price() {
        assert_eq!(total_amount(1500.0, None), 1500.0);
        assert_eq!(total_amount(1500.0, Some(4200.0)), 4200.0);
    }
}
