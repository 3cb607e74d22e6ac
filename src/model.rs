use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categories offered by the form and the filter select. The backend accepts
/// any string, so records may carry values outside this list.
pub const CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Health",
    "Other",
];

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of the create and update requests.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub date: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpenseList {
    pub expenses: Vec<Expense>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label/value pairs, truncated to the shorter of the two lists.
    pub fn points(&self) -> Vec<(String, f64)> {
        self.labels
            .iter()
            .cloned()
            .zip(self.data.iter().copied())
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    pub total_spending: f64,
    pub monthly_spending: f64,
    pub today_spending: f64,
    #[serde(default)]
    pub category_totals: BTreeMap<String, f64>,
    #[serde(default)]
    pub chart_data: ChartSeries,
}

/// `{message}` on success, `{error}` otherwise. Either may be missing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_without_notes_field_decodes() {
        let raw = r#"{"id":1,"title":"Coffee","category":"Food","amount":4.5,"date":"2024-01-05"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.notes, None);
        assert_eq!(expense.amount, 4.5);
    }

    #[test]
    fn stats_decode_with_empty_aggregates() {
        let raw = r#"{
            "total_spending": 0,
            "monthly_spending": 0,
            "today_spending": 0,
            "category_totals": {},
            "chart_data": {"labels": [], "data": []}
        }"#;
        let stats: DashboardStats = serde_json::from_str(raw).unwrap();
        assert!(stats.category_totals.is_empty());
        assert!(stats.chart_data.is_empty());
    }

    #[test]
    fn chart_points_pair_labels_with_values() {
        let series = ChartSeries {
            labels: vec!["2024-01".to_string(), "2024-02".to_string()],
            data: vec![10.0],
        };
        assert_eq!(series.points(), vec![("2024-01".to_string(), 10.0)]);
    }
}
