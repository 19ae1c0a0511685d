//! Display formatting for dates, durations and prices.

use chrono::{Local, NaiveDate};

/// Today's date in the visitor's local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`, the format date inputs and the API use.
pub fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_param(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Long form used on the summary and confirmation, e.g. "Monday, January 15, 2024".
pub fn format_booking_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {} min", h, m),
    }
}

/// Prices are shown in reais with a decimal comma.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let (whole, fraction) = (cents / 100, (cents % 100).abs());

    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if cents < 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_round_trip_through_params() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(date_param(date), "2024-01-15");
        assert_eq!(parse_date_param(" 2024-01-15 "), Some(date));
        assert_eq!(parse_date_param("15/01/2024"), None);
        assert_eq!(format_booking_date(date), "Monday, January 15, 2024");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(30), "30 min");
        assert_eq!(format_duration(60), "1 h");
        assert_eq!(format_duration(90), "1 h 30 min");
    }

    #[test]
    fn prices() {
        assert_eq!(format_price(40.0), "R$ 40,00");
        assert_eq!(format_price(1234.5), "R$ 1.234,50");
        assert_eq!(format_price(0.0), "R$ 0,00");
    }
}
