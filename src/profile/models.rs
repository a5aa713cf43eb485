use crate::schema::profiles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

pub const UNKNOWN_COVERAGE: &str = "غير محدد";

#[derive(Debug, Serialize, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub role: String,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_enabled: bool,
    pub avatar_url: Option<String>,
    pub pricing_model: Value,
    pub points: i32,
    pub is_approved: bool,
    pub is_marfa_enrolled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PublicProfile {
    pub id: Uuid,
    pub full_name: String,
    pub role: String,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_enabled: bool,
    pub avatar_url: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = profiles)]
pub struct NewProfile {
    pub id: Uuid,
    pub full_name: String,
    pub role: String,
    pub pricing_model: Value,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettings {
    #[validate(length(min = 1, max = 100))]
    pub business_name: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub phone: Option<String>,
    pub whatsapp_enabled: Option<bool>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[validate(range(min = 0.0))]
    pub setup_fee: Option<f64>,
    #[validate(length(min = 1, max = 60))]
    pub coverage: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = profiles)]
pub struct ProfileChangeset {
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_enabled: Option<bool>,
    pub avatar_url: Option<String>,
    pub pricing_model: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalPayload {
    pub approved: bool,
}

/// Writes the settings keys into the pricing model, keeping every other key.
pub fn merge_pricing(existing: &Value, setup_fee: Option<f64>, coverage: Option<&str>) -> Value {
    let mut merged = match existing {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    if let Some(fee) = setup_fee {
        merged.insert("setup_fee".to_owned(), Value::from(fee));
    }
    if let Some(coverage) = coverage {
        merged.insert("coverage".to_owned(), Value::from(coverage));
    }

    Value::Object(merged)
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VendorRow {
    pub id: Uuid,
    pub business_name: Option<String>,
    pub pricing_model: Value,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct VendorComparison {
    pub id: Uuid,
    pub business_name: Option<String>,
    pub coverage: String,
    pub setup_fee: Option<f64>,
    pub best_value: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub limit: Option<i64>,
}

/// Fees were stored as form strings before they became numbers, so accept both.
fn numeric_fee(pricing: &Value) -> Option<f64> {
    let fee = match pricing.get("setup_fee")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    fee.filter(|f| f.is_finite())
}

pub fn compare_vendors(rows: Vec<VendorRow>) -> Vec<VendorComparison> {
    let mut vendors: Vec<VendorComparison> = rows
        .into_iter()
        .map(|row| VendorComparison {
            id: row.id,
            business_name: row.business_name,
            coverage: row
                .pricing_model
                .get("coverage")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_COVERAGE)
                .to_owned(),
            setup_fee: numeric_fee(&row.pricing_model),
            best_value: false,
        })
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for (idx, vendor) in vendors.iter().enumerate() {
        if let Some(fee) = vendor.setup_fee {
            if best.is_none_or(|(_, lowest)| fee < lowest) {
                best = Some((idx, fee));
            }
        }
    }

    if let Some((idx, _)) = best {
        vendors[idx].best_value = true;
    }
    vendors
}

#[derive(Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Dashboard {
    Client {
        profile: Profile,
        requests: i64,
        bookings: i64,
    },
    Provider {
        profile: Profile,
        services: i64,
        pending_requests: i64,
        bookings: i64,
    },
    Investor {
        profile: Profile,
        approved: bool,
    },
    Entrepreneur {
        profile: Profile,
        enrolled: bool,
    },
    Admin {
        profile: Profile,
        open_sessions: i64,
        consultations: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vendor(pricing: Value) -> VendorRow {
        VendorRow {
            id: Uuid::new_v4(),
            business_name: Some("vendor".to_owned()),
            pricing_model: pricing,
        }
    }

    #[test]
    fn merge_keeps_unrelated_pricing_keys() {
        let merged = merge_pricing(
            &json!({"starting_price": 900, "coverage": "Hail"}),
            Some(250.0),
            Some("National"),
        );

        assert_eq!(
            merged,
            json!({"starting_price": 900, "coverage": "National", "setup_fee": 250.0})
        );
    }

    #[test]
    fn merge_replaces_non_object_models() {
        assert_eq!(merge_pricing(&Value::Null, None, Some("Hail")), json!({"coverage": "Hail"}));
    }

    #[test]
    fn cheapest_numeric_fee_is_best_value() {
        let vendors = compare_vendors(vec![
            vendor(json!({"setup_fee": "1200"})),
            vendor(json!({"setup_fee": 800, "coverage": "Hail"})),
            vendor(json!({"setup_fee": "call us"})),
        ]);

        let flags: Vec<bool> = vendors.iter().map(|v| v.best_value).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(vendors[1].coverage, "Hail");
        assert_eq!(vendors[0].coverage, UNKNOWN_COVERAGE);
    }

    #[test]
    fn ties_keep_the_first_vendor() {
        let vendors = compare_vendors(vec![
            vendor(json!({"setup_fee": 500})),
            vendor(json!({"setup_fee": 500})),
        ]);
        assert!(vendors[0].best_value);
        assert!(!vendors[1].best_value);
    }

    #[test]
    fn no_numeric_fee_means_no_best_value() {
        let vendors = compare_vendors(vec![vendor(json!({})), vendor(json!({"setup_fee": null}))]);
        assert!(vendors.iter().all(|v| !v.best_value));
    }

    #[test]
    fn non_finite_fees_never_win() {
        let vendors = compare_vendors(vec![
            vendor(json!({"setup_fee": "NaN"})),
            vendor(json!({"setup_fee": 100})),
            vendor(json!({"setup_fee": "inf"})),
        ]);

        assert_eq!(vendors[0].setup_fee, None);
        assert_eq!(vendors[2].setup_fee, None);
        let flags: Vec<bool> = vendors.iter().map(|v| v.best_value).collect();
        assert_eq!(flags, vec![false, true, false]);
    }
}
