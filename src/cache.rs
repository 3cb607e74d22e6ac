use crate::model::Expense;

#[derive(Clone, Debug, PartialEq)]
pub enum CacheStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Server-authoritative snapshot of every expense. The snapshot is only ever
/// replaced as a whole; searches and category filters are computed from it
/// on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseCache {
    expenses: Vec<Expense>,
    status: CacheStatus,
}

impl Default for ExpenseCache {
    fn default() -> Self {
        ExpenseCache {
            expenses: Vec::new(),
            status: CacheStatus::Loading,
        }
    }
}

impl ExpenseCache {
    pub fn replace(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
        self.status = CacheStatus::Ready;
    }

    /// A failed load keeps the previous snapshot for edit lookups but the
    /// table shows the error instead of it.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = CacheStatus::Failed(message.into());
    }

    pub fn status(&self) -> &CacheStatus {
        &self.status
    }

    pub fn find(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn filter(&self, search: &str, category: &str) -> Vec<Expense> {
        filter_expenses(&self.expenses, search, category)
    }
}

#[cfg(test)]
impl ExpenseCache {
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }
}

pub fn matches(expense: &Expense, search: &str, category: &str) -> bool {
    let search_ok = if search.is_empty() {
        true
    } else {
        let needle = search.to_lowercase();
        expense.title.to_lowercase().contains(&needle)
            || expense
                .notes
                .as_deref()
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false)
    };
    let category_ok = category.is_empty() || expense.category == category;
    search_ok && category_ok
}

pub fn filter_expenses(expenses: &[Expense], search: &str, category: &str) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| matches(e, search, category))
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample() -> Vec<Expense> {
        vec![
            Expense {
                id: 1,
                title: "Coffee".to_string(),
                category: "Food".to_string(),
                amount: 4.5,
                date: "2024-01-05".to_string(),
                notes: None,
            },
            Expense {
                id: 2,
                title: "Bus".to_string(),
                category: "Transport".to_string(),
                amount: 2.0,
                date: "2024-01-06".to_string(),
                notes: Some("monthly pass".to_string()),
            },
        ]
    }

    fn ids(expenses: &[Expense]) -> Vec<i64> {
        expenses.iter().map(|e| e.id).collect()
    }

    fn loaded() -> ExpenseCache {
        let mut cache = ExpenseCache::default();
        cache.replace(sample());
        cache
    }

    #[test]
    fn search_matches_notes() {
        assert_eq!(ids(&loaded().filter("pass", "")), vec![2]);
    }

    #[test]
    fn category_filter_is_exact() {
        assert_eq!(ids(&loaded().filter("", "Food")), vec![1]);
        assert!(loaded().filter("", "food").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_on_title() {
        assert_eq!(ids(&loaded().filter("cOFF", "")), vec![1]);
    }

    #[test]
    fn empty_query_returns_snapshot_in_order() {
        let cache = loaded();
        assert_eq!(cache.filter("", ""), cache.all().to_vec());
    }

    #[test]
    fn both_predicates_must_hold() {
        assert!(loaded().filter("pass", "Food").is_empty());
        assert_eq!(ids(&loaded().filter("bus", "Transport")), vec![2]);
    }

    #[test]
    fn missing_notes_never_match_search() {
        assert!(loaded().filter("monthly", "Food").is_empty());
    }

    #[test]
    fn every_result_satisfies_the_predicate() {
        let cache = loaded();
        for search in ["", "o", "pass", "BUS", "zzz"] {
            for category in ["", "Food", "Transport", "Other"] {
                let result = cache.filter(search, category);
                assert!(result.iter().all(|e| matches(e, search, category)));
                let expected = cache
                    .all()
                    .iter()
                    .filter(|e| matches(e, search, category))
                    .count();
                assert_eq!(result.len(), expected);
            }
        }
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let mut cache = loaded();
        cache.fail("offline");
        assert_eq!(cache.status(), &CacheStatus::Failed("offline".to_string()));
        assert!(cache.find(2).is_some());
    }

    #[test]
    fn starts_loading() {
        assert_eq!(ExpenseCache::default().status(), &CacheStatus::Loading);
    }
}
