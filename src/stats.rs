use yew::prelude::*;

use crate::format::format_money;
use crate::icons::{icon_credit_card, icon_trending_up, icon_wallet};
use crate::model::DashboardStats;
use crate::site::use_fade_in;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatIcon {
    Wallet,
    TrendingUp,
    CreditCard,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatLine {
    pub id: &'static str,
    pub title: &'static str,
    pub value: String,
    pub icon: StatIcon,
}

/// The three scalar cards, in display order.
pub fn stat_lines(stats: &DashboardStats, symbol: &str) -> [StatLine; 3] {
    [
        StatLine {
            id: "totalSpending",
            title: "Total Spending",
            value: format_money(stats.total_spending, symbol),
            icon: StatIcon::Wallet,
        },
        StatLine {
            id: "monthlySpending",
            title: "This Month",
            value: format_money(stats.monthly_spending, symbol),
            icon: StatIcon::TrendingUp,
        },
        StatLine {
            id: "todaySpending",
            title: "Today",
            value: format_money(stats.today_spending, symbol),
            icon: StatIcon::CreditCard,
        },
    ]
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub line: StatLine,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let node = use_fade_in();
    let line = &props.line;
    html! {
        <div ref={node} class="stat-card bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ line.title }</p>
                <h3 id={line.id} class="text-2xl font-bold text-[#1D617A] tracking-tight">{ line.value.clone() }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match line.icon {
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::TrendingUp => icon_trending_up(),
                        StatIcon::CreditCard => icon_credit_card(),
                    }
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_use_symbol_and_two_decimals() {
        let stats = DashboardStats {
            total_spending: 120.0,
            monthly_spending: 45.5,
            today_spending: 4.126,
            ..DashboardStats::default()
        };
        let lines = stat_lines(&stats, "£");
        let values: Vec<&str> = lines.iter().map(|l| l.value.as_str()).collect();
        assert_eq!(values, vec!["£120.00", "£45.50", "£4.13"]);
    }
}
