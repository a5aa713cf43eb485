use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    #[serde(default = "default_event_type")]
    pub event_type: String,
    pub total: f64,
}

fn default_event_type() -> String {
    "wedding".to_owned()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BudgetPlan {
    pub event_type: String,
    pub venue: f64,
    pub catering: f64,
    pub styling: f64,
    pub extras: f64,
    pub total: f64,
}

impl BudgetPlan {
    /// Venue 40%, catering 30%, styling 20%, extras 10%.
    pub fn split(event_type: String, total: f64) -> Option<Self> {
        if !total.is_finite() || total <= 0.0 {
            return None;
        }

        Some(BudgetPlan {
            event_type,
            venue: total * 0.4,
            catering: total * 0.3,
            styling: total * 0.2,
            extras: total * 0.1,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_follows_fixed_shares() {
        let plan = BudgetPlan::split("wedding".to_owned(), 20_000.0).unwrap();
        assert_eq!(plan.venue, 8_000.0);
        assert_eq!(plan.catering, 6_000.0);
        assert_eq!(plan.styling, 4_000.0);
        assert_eq!(plan.extras, 2_000.0);
    }

    #[test]
    fn non_positive_budgets_have_no_plan() {
        assert!(BudgetPlan::split("wedding".to_owned(), 0.0).is_none());
        assert!(BudgetPlan::split("wedding".to_owned(), -5.0).is_none());
        assert!(BudgetPlan::split("wedding".to_owned(), f64::NAN).is_none());
    }
}
