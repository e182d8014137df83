use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::distribution::{simulate, DistributionInputs, DistributionSummary};
use super::domain::{ClaimEvidenceRecord, PropertyDescriptor, RecordId};
use super::outcome::RightsAssessment;
use super::RightsAnalysisEngine;
use crate::error::AppError;
use crate::import::{ImportedRecord, RightsRecordImporter};

/// Router builder exposing the rights-analysis endpoints.
pub fn rights_router(engine: Arc<RightsAnalysisEngine>) -> Router {
    Router::new()
        .route("/api/v1/rights/evaluate", post(evaluate_handler))
        .route("/api/v1/rights/estimates", post(estimates_handler))
        .route("/api/v1/rights/import", post(import_handler))
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub evidence: ClaimEvidenceRecord,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub distribution: Option<DistributionInputs>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationView {
    pub record_id: RecordId,
    pub assessment: RightsAssessment,
    pub senior_rights_total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionSummary>,
}

impl EvaluationView {
    /// Evaluate one record and, when sale figures are given, project the distribution.
    pub fn evaluate(
        engine: &RightsAnalysisEngine,
        evidence: &ClaimEvidenceRecord,
        property: &PropertyDescriptor,
        distribution: Option<&DistributionInputs>,
    ) -> Self {
        let assessment = engine.evaluate(evidence, Some(property));
        let distribution = distribution.map(|inputs| simulate(&assessment, inputs));

        Self {
            record_id: evidence.record_id.clone(),
            senior_rights_total: assessment.senior_rights_total(),
            assessment,
            distribution,
        }
    }
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<RightsAnalysisEngine>>,
    Json(request): Json<EvaluateRequest>,
) -> Response {
    if let Err(error) = request.evidence.amounts.validate() {
        let payload = json!({
            "record_id": request.evidence.record_id,
            "error": error.to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let property = PropertyDescriptor {
        property_type: request.property_type,
    };
    let view = EvaluationView::evaluate(
        &engine,
        &request.evidence,
        &property,
        request.distribution.as_ref(),
    );

    (StatusCode::OK, Json(view)).into_response()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EstimateRequest {
    pub housing_official_price: Option<Decimal>,
    pub initial_appraisal_value: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub small_deposit: Decimal,
    pub current_tax: Decimal,
}

pub(crate) async fn estimates_handler(
    State(engine): State<Arc<RightsAnalysisEngine>>,
    Json(request): Json<EstimateRequest>,
) -> Json<EstimateResponse> {
    let policy = engine.policy();
    Json(EstimateResponse {
        small_deposit: policy.small_deposit(request.housing_official_price),
        current_tax: policy.current_tax(request.initial_appraisal_value),
    })
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub csv: String,
    /// Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub as_of: NaiveDate,
    pub records: Vec<EvaluationView>,
}

pub(crate) async fn import_handler(
    State(engine): State<Arc<RightsAnalysisEngine>>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let as_of = request
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let imported = RightsRecordImporter::from_reader(Cursor::new(request.csv.into_bytes()), as_of)?;

    let records = imported
        .iter()
        .map(|ImportedRecord { evidence, property, distribution }| {
            EvaluationView::evaluate(&engine, evidence, property, Some(distribution))
        })
        .collect();

    Ok(Json(ImportResponse { as_of, records }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        rights_router(Arc::new(RightsAnalysisEngine::default()))
    }

    async fn post_json(path: &str, payload: Value) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::post(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[tokio::test]
    async fn evaluate_route_returns_assessment_and_distribution() {
        let (status, body) = post_json(
            "/api/v1/rights/evaluate",
            json!({
                "evidence": {
                    "record_id": "P-1",
                    "amounts": { "small_deposit": 42000000, "senior_mortgage": 100000000 },
                    "auction": { "status": "opened", "claim_deadline_passed": true },
                    "deposit": {
                        "survey_report_submitted": true,
                        "has_tenant": true,
                        "tenant_claim_submitted": true
                    },
                    "tax": { "current_tax_claim": true }
                },
                "property_type": "다세대주택",
                "distribution": { "expected_winning_bid": 300000000, "loan_cap": 100000000 }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record_id"], "P-1");
        assert_eq!(body["assessment"]["deposit_case"], "CASE_R1");
        assert_eq!(body["assessment"]["small_deposit"]["reflected"], "42000000");
        assert_eq!(body["assessment"]["tax_case"], "TAX_T2");
        assert_eq!(body["senior_rights_total"], "142000000");
        assert_eq!(body["distribution"]["auction_fees"], "4500000");
        assert_eq!(body["distribution"]["amount_after_senior"], "153500000");
        assert_eq!(body["distribution"]["recovery_amount"], "100000000");
        assert_eq!(body["distribution"]["risk"]["level"], "low");
        let recovery: Decimal = body["distribution"]["recovery_rate"]
            .as_str()
            .expect("decimal string")
            .parse()
            .expect("decimal parses");
        assert_eq!(recovery, Decimal::ONE_HUNDRED);
    }

    #[tokio::test]
    async fn evaluate_route_rejects_negative_amounts() {
        let (status, body) = post_json(
            "/api/v1/rights/evaluate",
            json!({
                "evidence": { "record_id": "P-2", "amounts": { "wage_claim": -1 } }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["record_id"], "P-2");
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("wage_claim"));
    }

    #[tokio::test]
    async fn estimates_route_applies_the_policy() {
        let (status, body) = post_json(
            "/api/v1/rights/estimates",
            json!({ "housing_official_price": 950000000, "initial_appraisal_value": 200000000 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["small_deposit"], "55000000");
        assert_eq!(body["current_tax"], "600000");
    }

    #[tokio::test]
    async fn import_route_evaluates_every_row() {
        let csv = "Record ID,Property Type,Auction Status,Claim Deadline Date,Survey Report Submitted\n\
L-1,토지,opened,2025-01-10,N\n\
S-1,상가,not_opened,,\n";
        let (status, body) = post_json(
            "/api/v1/rights/import",
            json!({ "csv": csv, "as_of": "2025-02-01" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let records = body["records"].as_array().expect("records array");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["assessment"]["deposit_case"], "CASE_L5");
        assert_eq!(records[1]["assessment"]["deposit_case"], "CASE_C15");
    }

    #[tokio::test]
    async fn import_route_reports_bad_rows_as_bad_request() {
        let (status, body) = post_json(
            "/api/v1/rights/import",
            json!({ "csv": "Record ID,Has Tenant\nP-1,perhaps\n", "as_of": "2025-02-01" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("Has Tenant"));
    }
}
