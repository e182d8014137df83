use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Flat export row; every cell is kept raw and interpreted by the importer.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RightsRow {
    #[serde(rename = "Record ID", deserialize_with = "empty_string_as_none")]
    pub(crate) record_id: Option<String>,
    #[serde(rename = "Property Type", deserialize_with = "empty_string_as_none")]
    pub(crate) property_type: Option<String>,
    #[serde(rename = "Auction Status", deserialize_with = "empty_string_as_none")]
    pub(crate) auction_status: Option<String>,
    #[serde(rename = "Claim Deadline Passed", deserialize_with = "empty_string_as_none")]
    pub(crate) claim_deadline_passed: Option<String>,
    #[serde(rename = "Claim Deadline Date", deserialize_with = "empty_string_as_none")]
    pub(crate) claim_deadline_date: Option<String>,

    #[serde(rename = "Senior Mortgage", deserialize_with = "empty_string_as_none")]
    pub(crate) senior_mortgage: Option<String>,
    #[serde(rename = "Lien", deserialize_with = "empty_string_as_none")]
    pub(crate) lien: Option<String>,
    #[serde(rename = "Small Deposit", deserialize_with = "empty_string_as_none")]
    pub(crate) small_deposit: Option<String>,
    #[serde(rename = "Lease Deposit", deserialize_with = "empty_string_as_none")]
    pub(crate) lease_deposit: Option<String>,
    #[serde(rename = "Wage Claim", deserialize_with = "empty_string_as_none")]
    pub(crate) wage_claim: Option<String>,
    #[serde(rename = "Current Tax", deserialize_with = "empty_string_as_none")]
    pub(crate) current_tax: Option<String>,
    #[serde(rename = "Senior Tax", deserialize_with = "empty_string_as_none")]
    pub(crate) senior_tax: Option<String>,

    #[serde(rename = "Survey Report Submitted", deserialize_with = "empty_string_as_none")]
    pub(crate) survey_report_submitted: Option<String>,
    #[serde(rename = "Has Tenant", deserialize_with = "empty_string_as_none")]
    pub(crate) has_tenant: Option<String>,
    #[serde(rename = "Tenant Claim Submitted", deserialize_with = "empty_string_as_none")]
    pub(crate) tenant_claim_submitted: Option<String>,
    #[serde(
        rename = "Tenant Date Before Mortgage",
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) tenant_date_before_mortgage: Option<String>,
    #[serde(
        rename = "Tenant Registry Available",
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) tenant_registry_available: Option<String>,
    #[serde(
        rename = "Commercial Lease Registry Available",
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) commercial_lease_registry_available: Option<String>,
    #[serde(rename = "Address Match", deserialize_with = "empty_string_as_none")]
    pub(crate) address_match: Option<String>,

    #[serde(rename = "Debtor Type", deserialize_with = "empty_string_as_none")]
    pub(crate) debtor_type: Option<String>,
    #[serde(rename = "Has Wage Claim", deserialize_with = "empty_string_as_none")]
    pub(crate) has_wage_claim: Option<String>,
    #[serde(rename = "Wage Claim Submitted", deserialize_with = "empty_string_as_none")]
    pub(crate) wage_claim_submitted: Option<String>,
    #[serde(
        rename = "Provisional Seizure Estimated",
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) provisional_seizure_estimated: Option<String>,
    #[serde(rename = "Current Tax Claim", deserialize_with = "empty_string_as_none")]
    pub(crate) current_tax_claim: Option<String>,
    #[serde(rename = "Senior Tax Claim", deserialize_with = "empty_string_as_none")]
    pub(crate) senior_tax_claim: Option<String>,

    #[serde(rename = "Housing Official Price", deserialize_with = "empty_string_as_none")]
    pub(crate) housing_official_price: Option<String>,
    #[serde(
        rename = "Initial Appraisal Value",
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) initial_appraisal_value: Option<String>,
    #[serde(rename = "Expected Winning Bid", deserialize_with = "empty_string_as_none")]
    pub(crate) expected_winning_bid: Option<String>,
    #[serde(rename = "Auction Fees", deserialize_with = "empty_string_as_none")]
    pub(crate) auction_fees: Option<String>,
    #[serde(rename = "Loan Cap", deserialize_with = "empty_string_as_none")]
    pub(crate) loan_cap: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RightsRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<RightsRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
