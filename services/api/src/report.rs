use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use senior_rights::config::AppConfig;
use senior_rights::error::AppError;
use senior_rights::rights::{ClaimLine, EvaluationView, RightsAnalysisEngine};
use senior_rights::RightsRecordImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// CSV export with one row per collateral item
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Date used to resolve claim deadline dates (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the assessments as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EstimateArgs {
    /// Official housing price used for the small-deposit estimate
    #[arg(long, value_parser = crate::infra::parse_amount)]
    pub(crate) official_price: Option<Decimal>,
    /// Initial appraisal value used for the current-year tax estimate
    #[arg(long, value_parser = crate::infra::parse_amount)]
    pub(crate) appraisal: Option<Decimal>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs { csv, as_of, json } = args;

    let config = AppConfig::load()?;
    let engine = RightsAnalysisEngine::new(config.estimation);
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let views: Vec<EvaluationView> = RightsRecordImporter::from_path(&csv, as_of)?
        .iter()
        .map(|record| {
            EvaluationView::evaluate(
                &engine,
                &record.evidence,
                &record.property,
                Some(&record.distribution),
            )
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&views) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Assessment payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!(
        "Senior rights report for {} ({} records, as of {})",
        csv.display(),
        views.len(),
        as_of
    );
    for view in &views {
        println!();
        for line in render_view(view) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let policy = &config.estimation;

    println!(
        "Small deposit estimate: {}",
        format_won(policy.small_deposit(args.official_price))
    );
    println!(
        "Current-year tax estimate: {}",
        format_won(policy.current_tax(args.appraisal))
    );

    Ok(())
}

pub(crate) fn render_view(view: &EvaluationView) -> Vec<String> {
    let assessment = &view.assessment;
    let mut lines = vec![format!(
        "{} [{} / {:?}] deposit {} | wage {} | tax {}",
        view.record_id,
        assessment.category.label(),
        assessment.stage,
        assessment.deposit_case,
        assessment.wage_case,
        assessment.tax_case
    )];

    let claims: [(&str, &ClaimLine); 7] = [
        ("Senior mortgage", &assessment.senior_mortgage),
        ("Lien", &assessment.lien),
        ("Small deposit", &assessment.small_deposit),
        ("Lease deposit", &assessment.lease_deposit),
        ("Wage claim", &assessment.wage_claim),
        ("Current-year tax", &assessment.current_tax),
        ("Senior tax", &assessment.senior_tax),
    ];
    for (label, line) in claims {
        lines.push(format!(
            "  - {label}: {} ({})",
            format_won(line.reflected),
            line.reason
        ));
    }
    lines.push(format!(
        "  Senior rights total: {}",
        format_won(view.senior_rights_total)
    ));

    if let Some(summary) = &view.distribution {
        lines.push(format!(
            "  Distributable {} | after senior {} | recovery {}%",
            format_won(summary.distributable_amount),
            format_won(summary.amount_after_senior),
            summary.recovery_rate
        ));
        lines.push(format!(
            "  Risk {}: {}",
            summary.risk.level.label(),
            summary.risk.reason
        ));
    }

    lines
}

/// Whole won with thousands separators.
pub(crate) fn format_won(amount: Decimal) -> String {
    let rounded = amount.round().to_string();
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped} KRW")
}
