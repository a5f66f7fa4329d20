use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{AlertPriority, SampleAlert};
use crate::utils::time::format_hours_before;

const UNKNOWN: &str = "Unknown";

struct Scenario {
    amount: f64,
    description: &'static str,
    location: Option<&'static str>,
    merchant: Option<&'static str>,
    risk_score: f64,
    factors: &'static [&'static str],
}

const SCENARIOS: [Scenario; 5] = [
    Scenario {
        amount: 5000.00,
        description: "ATM Withdrawal - Foreign Location",
        location: Some("Nigeria, Lagos"),
        merchant: None,
        risk_score: 0.95,
        factors: &["Foreign location", "High amount", "Unusual ATM usage"],
    },
    Scenario {
        amount: 1200.00,
        description: "Online Purchase - Crypto Exchange",
        location: None,
        merchant: Some("CryptoBuy Exchange"),
        risk_score: 0.85,
        factors: &["High-risk merchant", "Large crypto purchase", "New merchant"],
    },
    Scenario {
        amount: 300.00,
        description: "Multiple rapid transactions",
        location: None,
        merchant: Some("Various merchants"),
        risk_score: 0.75,
        factors: &["High frequency", "Multiple merchants", "Short time window"],
    },
    Scenario {
        amount: 2500.00,
        description: "Late night casino transaction",
        location: None,
        merchant: Some("Golden Palace Casino"),
        risk_score: 0.90,
        factors: &["Off-hours transaction", "Gambling merchant", "High amount"],
    },
    Scenario {
        amount: 800.00,
        description: "Unusual geographic pattern",
        location: Some("Multiple states same day"),
        merchant: None,
        risk_score: 0.80,
        factors: &["Geographic inconsistency", "Travel pattern anomaly"],
    },
];

/// Number of distinct demo scenarios.
pub const SAMPLE_SCENARIO_COUNT: usize = SCENARIOS.len();

fn scenario_id(kind: &str, index: usize) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("sample-{}-{}", kind, index).as_bytes())
}

/// Up to `num_alerts` demo alerts, the i-th stamped `i` hours before `now`.
/// Output depends only on the arguments.
pub fn generate_sample_alerts(num_alerts: usize, now: DateTime<Utc>) -> Vec<SampleAlert> {
    SCENARIOS
        .iter()
        .take(num_alerts)
        .enumerate()
        .map(|(i, scenario)| SampleAlert {
            id: scenario_id("alert", i),
            transaction_id: scenario_id("transaction", i),
            amount: scenario.amount,
            description: scenario.description.to_string(),
            risk_score: scenario.risk_score,
            risk_factors: scenario.factors.iter().map(|f| f.to_string()).collect(),
            timestamp: format_hours_before(now, i as i64),
            status: "OPEN".to_string(),
            location: scenario.location.unwrap_or(UNKNOWN).to_string(),
            merchant: scenario.merchant.unwrap_or(UNKNOWN).to_string(),
            priority: AlertPriority::from_score(scenario.risk_score),
        })
        .collect()
}
