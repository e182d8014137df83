//! CSV import of collateral evidence exported from the case-tracking system.

mod normalizer;
mod parser;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::rights::{
    AuctionContext, AuctionStatus, ClaimEvidenceRecord, DebtorType, DepositEvidence,
    DistributionInputs, DueDiligenceAmounts, EvidenceError, PropertyDescriptor, RecordId,
    TaxEvidence, Valuation, WageEvidence,
};
use parser::RightsRow;

#[derive(Debug, thiserror::Error)]
pub enum RecordImportError {
    #[error("failed to read rights export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rights CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("{record}: column `{column}` has unrecognized flag `{value}`")]
    InvalidFlag {
        record: String,
        column: &'static str,
        value: String,
    },
    #[error("{record}: column `{column}` has unparseable amount `{value}`")]
    InvalidAmount {
        record: String,
        column: &'static str,
        value: String,
    },
    #[error("{record}: column `{column}` has unparseable date `{value}`")]
    InvalidDate {
        record: String,
        column: &'static str,
        value: String,
    },
    #[error("{record}: {source}")]
    Evidence {
        record: String,
        source: EvidenceError,
    },
}

/// One collateral item ready for the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedRecord {
    pub evidence: ClaimEvidenceRecord,
    pub property: PropertyDescriptor,
    pub distribution: DistributionInputs,
}

pub struct RightsRecordImporter;

impl RightsRecordImporter {
    /// `as_of` resolves `Claim Deadline Date` when the deadline flag is blank.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        as_of: NaiveDate,
    ) -> Result<Vec<ImportedRecord>, RecordImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, as_of)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        as_of: NaiveDate,
    ) -> Result<Vec<ImportedRecord>, RecordImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut records = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            // header is line 1
            let label = row
                .record_id
                .clone()
                .unwrap_or_else(|| format!("row {}", index + 2));
            records.push(convert_row(row, &RowCells { label }, as_of)?);
        }

        tracing::info!(records = records.len(), "imported rights records");
        Ok(records)
    }
}

fn convert_row(
    row: RightsRow,
    cells: &RowCells,
    as_of: NaiveDate,
) -> Result<ImportedRecord, RecordImportError> {
    let deadline_flag = cells.flag("Claim Deadline Passed", &row.claim_deadline_passed)?;
    let deadline_date = cells.date("Claim Deadline Date", &row.claim_deadline_date)?;
    let claim_deadline_passed = match (deadline_flag, deadline_date) {
        (Some(passed), _) => passed,
        (None, Some(deadline)) => deadline < as_of,
        (None, None) => false,
    };

    let amounts = DueDiligenceAmounts {
        senior_mortgage: cells.amount_or_zero("Senior Mortgage", &row.senior_mortgage)?,
        lien: cells.amount_or_zero("Lien", &row.lien)?,
        small_deposit: cells.amount_or_zero("Small Deposit", &row.small_deposit)?,
        lease_deposit: cells.amount_or_zero("Lease Deposit", &row.lease_deposit)?,
        wage_claim: cells.amount_or_zero("Wage Claim", &row.wage_claim)?,
        current_tax: cells.amount_or_zero("Current Tax", &row.current_tax)?,
        senior_tax: cells.amount_or_zero("Senior Tax", &row.senior_tax)?,
    };
    amounts
        .validate()
        .map_err(|source| RecordImportError::Evidence {
            record: cells.label.clone(),
            source,
        })?;

    let deposit = DepositEvidence {
        survey_report_submitted: cells.flag("Survey Report Submitted", &row.survey_report_submitted)?,
        has_tenant: cells.flag("Has Tenant", &row.has_tenant)?,
        tenant_claim_submitted: cells.flag("Tenant Claim Submitted", &row.tenant_claim_submitted)?,
        tenant_date_before_mortgage: cells.flag(
            "Tenant Date Before Mortgage",
            &row.tenant_date_before_mortgage,
        )?,
        tenant_registry_available: cells
            .flag("Tenant Registry Available", &row.tenant_registry_available)?
            .unwrap_or(false),
        commercial_lease_registry_available: cells
            .flag(
                "Commercial Lease Registry Available",
                &row.commercial_lease_registry_available,
            )?
            .unwrap_or(false),
        address_match: cells.flag("Address Match", &row.address_match)?,
    };

    let wage = WageEvidence {
        debtor_type: row
            .debtor_type
            .as_deref()
            .map(DebtorType::from_label)
            .unwrap_or_default(),
        has_wage_claim: cells.flag_or_false("Has Wage Claim", &row.has_wage_claim)?,
        wage_claim_submitted: cells.flag_or_false("Wage Claim Submitted", &row.wage_claim_submitted)?,
        provisional_seizure_estimated: cells.flag_or_false(
            "Provisional Seizure Estimated",
            &row.provisional_seizure_estimated,
        )?,
    };

    let tax = TaxEvidence {
        current_tax_claim: cells.flag_or_false("Current Tax Claim", &row.current_tax_claim)?,
        senior_tax_claim: cells.flag_or_false("Senior Tax Claim", &row.senior_tax_claim)?,
    };

    let valuation = Valuation {
        housing_official_price: cells.amount("Housing Official Price", &row.housing_official_price)?,
        initial_appraisal_value: cells
            .amount("Initial Appraisal Value", &row.initial_appraisal_value)?,
    };

    let distribution = DistributionInputs {
        expected_winning_bid: cells.amount("Expected Winning Bid", &row.expected_winning_bid)?,
        auction_fees: cells.amount("Auction Fees", &row.auction_fees)?,
        loan_cap: cells.amount("Loan Cap", &row.loan_cap)?,
    };

    let evidence = ClaimEvidenceRecord {
        record_id: RecordId(cells.label.clone()),
        amounts,
        auction: AuctionContext {
            status: row
                .auction_status
                .as_deref()
                .map(AuctionStatus::from_label)
                .unwrap_or_default(),
            claim_deadline_passed,
        },
        deposit,
        wage,
        tax,
        valuation,
    };

    Ok(ImportedRecord {
        evidence,
        property: PropertyDescriptor {
            property_type: row.property_type,
        },
        distribution,
    })
}

/// Cell interpretation with the row label attached to every failure.
struct RowCells {
    label: String,
}

impl RowCells {
    fn flag(
        &self,
        column: &'static str,
        value: &Option<String>,
    ) -> Result<Option<bool>, RecordImportError> {
        value
            .as_deref()
            .map(|raw| {
                normalizer::parse_flag(raw).ok_or_else(|| RecordImportError::InvalidFlag {
                    record: self.label.clone(),
                    column,
                    value: raw.to_string(),
                })
            })
            .transpose()
    }

    fn flag_or_false(
        &self,
        column: &'static str,
        value: &Option<String>,
    ) -> Result<bool, RecordImportError> {
        Ok(self.flag(column, value)?.unwrap_or(false))
    }

    fn amount(
        &self,
        column: &'static str,
        value: &Option<String>,
    ) -> Result<Option<Decimal>, RecordImportError> {
        value
            .as_deref()
            .map(|raw| {
                normalizer::parse_amount(raw).ok_or_else(|| RecordImportError::InvalidAmount {
                    record: self.label.clone(),
                    column,
                    value: raw.to_string(),
                })
            })
            .transpose()
    }

    fn amount_or_zero(
        &self,
        column: &'static str,
        value: &Option<String>,
    ) -> Result<Decimal, RecordImportError> {
        Ok(self.amount(column, value)?.unwrap_or(Decimal::ZERO))
    }

    fn date(
        &self,
        column: &'static str,
        value: &Option<String>,
    ) -> Result<Option<NaiveDate>, RecordImportError> {
        value
            .as_deref()
            .map(|raw| {
                normalizer::parse_date(raw).ok_or_else(|| RecordImportError::InvalidDate {
                    record: self.label.clone(),
                    column,
                    value: raw.to_string(),
                })
            })
            .transpose()
    }
}
