use super::{AMOUNT_MAX, AMOUNT_MIN, LOOKBACK_MONTHS, hacker_phrase};
use chrono::{Days, Months, NaiveDate};
use rand::Rng;
use uuid::Uuid;

/// Column names of every `transactions_{i}.csv`.
pub const CSV_HEADER: [&str; 4] = ["UserID", "Timestamp", "Amount", "Description"];

/// One synthetic transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
}

impl Transaction {
    /// A random transaction dated within [`date_window`] of `today`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Self {
        let (start, end) = date_window(today);
        let span = (end - start).num_days().max(0) as u64;
        let date = start
            .checked_add_days(Days::new(rng.random_range(0..=span)))
            .unwrap_or(end);
        Self {
            // Random bytes with the version/variant bits set: a v4 UUID
            user_id: uuid::Builder::from_random_bytes(rng.random()).into_uuid(),
            date,
            amount: rng.random_range(AMOUNT_MIN..=AMOUNT_MAX),
            description: hacker_phrase(rng),
        }
    }

    /// CSV fields in [`CSV_HEADER`] order.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.user_id.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", self.amount),
            self.description.clone(),
        ]
    }
}

/// Inclusive `(earliest, latest)` date range for transactions.
///
/// Month subtraction clamps to the last valid day, so 31 August looks back to
/// 28/29 February.
pub fn date_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::file_rng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_is_six_months_back() {
        assert_eq!(
            date_window(date(2026, 10, 14)),
            (date(2026, 4, 14), date(2026, 10, 14))
        );
    }

    #[test]
    fn window_clamps_month_end() {
        assert_eq!(date_window(date(2026, 8, 31)).0, date(2026, 2, 28));
    }

    #[test]
    fn random_rows_stay_in_bounds() {
        let today = date(2026, 10, 14);
        let (start, end) = date_window(today);
        let mut rng = file_rng(42, "transactions_0.csv");
        for _ in 0..1000 {
            let tx = Transaction::random(&mut rng, today);
            assert!(tx.date >= start && tx.date <= end, "{}", tx.date);
            assert!((AMOUNT_MIN..=AMOUNT_MAX).contains(&tx.amount));
            assert_eq!(tx.user_id.get_version_num(), 4);
        }
    }

    #[test]
    fn record_formats_fields() {
        let tx = Transaction {
            user_id: Uuid::nil(),
            date: date(2026, 1, 5),
            amount: 7.5,
            description: "Hack the bus!".into(),
        };
        assert_eq!(
            tx.to_record(),
            [
                "00000000-0000-0000-0000-000000000000".to_string(),
                "2026-01-05".to_string(),
                "7.50".to_string(),
                "Hack the bus!".to_string(),
            ]
        );
    }
}
