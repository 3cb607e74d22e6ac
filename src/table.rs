use yew::prelude::*;

use crate::cache::CacheStatus;
use crate::format::{format_date, format_money};
use crate::icons::{icon_edit, icon_trash};
use crate::model::Expense;

pub const COLUMN_COUNT: usize = 6;

pub fn category_badge(category: &str) -> &'static str {
    match category {
        "Food" => "success",
        "Transport" => "info",
        "Shopping" => "warning",
        "Entertainment" => "primary",
        "Bills" => "danger",
        "Health" => "success",
        _ => "secondary",
    }
}

fn badge_class(tag: &str) -> &'static str {
    match tag {
        "success" => "bg-green-100 text-green-700",
        "info" => "bg-sky-100 text-sky-700",
        "warning" => "bg-amber-100 text-amber-700",
        "primary" => "bg-blue-100 text-blue-700",
        "danger" => "bg-red-100 text-red-700",
        _ => "bg-secondary text-secondary-foreground",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub category: String,
    pub badge: &'static str,
    pub amount: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableBody {
    Placeholder(&'static str),
    Rows(Vec<ExpenseRow>),
}

#[cfg(test)]
impl TableBody {
    fn row_count(&self) -> usize {
        match self {
            TableBody::Placeholder(_) => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }
}

pub fn expense_row(expense: &Expense, currency_symbol: &str) -> ExpenseRow {
    let notes = match expense.notes.as_deref() {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => "-".to_string(),
    };
    ExpenseRow {
        id: expense.id,
        date: format_date(&expense.date),
        title: expense.title.clone(),
        category: expense.category.clone(),
        badge: category_badge(&expense.category),
        amount: format_money(expense.amount, currency_symbol),
        notes,
    }
}

pub fn table_body(status: &CacheStatus, expenses: &[Expense], currency_symbol: &str) -> TableBody {
    match status {
        CacheStatus::Loading => TableBody::Placeholder("Loading..."),
        CacheStatus::Failed(_) => TableBody::Placeholder("Error loading expenses"),
        CacheStatus::Ready if expenses.is_empty() => TableBody::Placeholder("No expenses found"),
        CacheStatus::Ready => TableBody::Rows(
            expenses
                .iter()
                .map(|e| expense_row(e, currency_symbol))
                .collect(),
        ),
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpenseTableProps {
    pub status: CacheStatus,
    pub expenses: Vec<Expense>,
    pub currency_symbol: String,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
}

#[function_component(ExpenseTable)]
pub fn expense_table(props: &ExpenseTableProps) -> Html {
    let body = table_body(&props.status, &props.expenses, &props.currency_symbol);

    html! {
        <div class="overflow-x-auto">
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                        <th class="px-6 py-4 font-bold">{"Date"}</th>
                        <th class="px-6 py-4 font-bold">{"Title"}</th>
                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                        <th class="px-6 py-4 font-bold">{"Amount"}</th>
                        <th class="px-6 py-4 font-bold">{"Notes"}</th>
                        <th class="px-6 py-4 font-bold">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody id="expensesTableBody" class="divide-y divide-border">
                    { match body {
                        TableBody::Placeholder(text) => html! {
                            <tr><td colspan={COLUMN_COUNT.to_string()} class="px-6 py-6 text-center text-muted-foreground">{ text }</td></tr>
                        },
                        TableBody::Rows(rows) => rows.into_iter().map(|row| {
                            let on_edit = {
                                let on_edit = props.on_edit.clone();
                                let id = row.id;
                                Callback::from(move |_| on_edit.emit(id))
                            };
                            let on_delete = {
                                let on_delete = props.on_delete.clone();
                                let id = row.id;
                                Callback::from(move |_| on_delete.emit(id))
                            };
                            html! {
                                <tr key={row.id} class="text-sm hover:bg-muted/30 transition-colors">
                                    <td class="px-6 py-4 text-muted-foreground">{ row.date }</td>
                                    <td class="px-6 py-4 text-foreground">{ row.title }</td>
                                    <td class="px-6 py-4">
                                        <span class={classes!("badge", format!("badge-{}", row.badge), badge_class(row.badge), "px-3", "py-1", "rounded-full", "text-[10px]", "font-bold")}>{ row.category }</span>
                                    </td>
                                    <td class="px-6 py-4 font-semibold text-foreground">{ row.amount }</td>
                                    <td class="px-6 py-4 text-muted-foreground">{ row.notes }</td>
                                    <td class="px-6 py-4 flex gap-2">
                                        <button class="action-btn edit-btn p-1 rounded hover:bg-secondary" title="Edit" onclick={on_edit}>{ icon_edit() }</button>
                                        <button class="action-btn delete-btn p-1 rounded hover:bg-secondary" title="Delete" onclick={on_delete}>{ icon_trash() }</button>
                                    </td>
                                </tr>
                            }
                        }).collect::<Html>(),
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::sample;

    #[test]
    fn empty_list_renders_single_placeholder() {
        let body = table_body(&CacheStatus::Ready, &[], "$");
        assert_eq!(body, TableBody::Placeholder("No expenses found"));
        assert_eq!(body.row_count(), 1);
        assert_eq!(COLUMN_COUNT, 6);
    }

    #[test]
    fn rows_follow_input_order() {
        let mut expenses = sample();
        expenses.reverse();
        let TableBody::Rows(rows) = table_body(&CacheStatus::Ready, &expenses, "$") else {
            panic!("expected rows");
        };
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn row_formats_fields() {
        let row = expense_row(&sample()[0], "$");
        assert_eq!(row.date, "Jan 5, 2024");
        assert_eq!(row.amount, "$4.50");
        assert_eq!(row.badge, "success");
        assert_eq!(row.notes, "-");
    }

    #[test]
    fn unknown_category_gets_neutral_badge() {
        assert_eq!(category_badge("Travel"), "secondary");
        assert_eq!(category_badge("Bills"), "danger");
        assert_eq!(category_badge("Other"), "secondary");
    }

    #[test]
    fn failed_load_replaces_table() {
        let body = table_body(&CacheStatus::Failed("x".to_string()), &sample(), "$");
        assert_eq!(body, TableBody::Placeholder("Error loading expenses"));
    }
}
