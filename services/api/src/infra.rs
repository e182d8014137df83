use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned = raw.trim().replace(',', "");
    let amount = Decimal::from_str(&cleaned)
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))?;

    if amount < Decimal::ZERO {
        return Err(format!("amount '{raw}' must not be negative"));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_requires_iso_format() {
        assert_eq!(
            parse_date(" 2025-06-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"))
        );
        assert!(parse_date("06/01/2025").is_err());
    }

    #[test]
    fn parse_amount_accepts_separators_and_rejects_negatives() {
        assert_eq!(parse_amount("650,000,000"), Ok(Decimal::from(650_000_000)));
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("six hundred").is_err());
    }
}
