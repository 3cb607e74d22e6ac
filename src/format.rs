use chrono::NaiveDate;

pub fn format_money(amount: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// `2024-01-05` becomes `Jan 5, 2024`. Anything that is not an ISO date is
/// shown as received.
pub fn format_date(raw: &str) -> String {
    let day = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(4.5, "$"), "$4.50");
        assert_eq!(format_money(0.0, "₹"), "₹0.00");
        assert_eq!(format_money(1234.567, "€"), "€1234.57");
    }

    #[test]
    fn iso_dates_render_short_month() {
        assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-31T10:00:00"), "Dec 31, 2023");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }
}
