//! AWS Lambda handler for offer computations
//!
//! Accepts an offer request as JSON and returns the complete offer
//! result. Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;

use offer_engine::{
    AdvisorProfile, FirmDeal, FirmParameter, InMemoryBestDealStore, MarketData, OfferConfig,
    OfferEngine,
};

fn default_horizon_years() -> u32 {
    offer_engine::projection::DEFAULT_HORIZON_YEARS
}

fn default_growth_rate() -> f64 {
    offer_engine::projection::DEFAULT_ANNUAL_GROWTH_RATE
}

fn default_current_grid() -> f64 {
    offer_engine::projection::DEFAULT_CURRENT_GRID_PAYOUT
}

/// Input for one offer computation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferRequest {
    /// Advisor book profile; lenient coercion applies to every field
    #[serde(default)]
    profile: AdvisorProfile,

    /// Raw firm names the caller wants compared
    #[serde(default)]
    firms: Vec<String>,

    /// External parameter table rows
    #[serde(default)]
    parameters: Vec<FirmParameter>,

    /// External deal table rows
    #[serde(default)]
    deals: Vec<FirmDeal>,

    /// Whether the caller's tier honors advanced business-mix attributes
    #[serde(default)]
    premium_access: bool,

    /// Previously recorded best deal for percent-change reporting
    #[serde(default)]
    previous_best_deal: Option<f64>,

    #[serde(default = "default_horizon_years")]
    horizon_years: u32,

    #[serde(default = "default_growth_rate")]
    annual_growth_rate: f64,

    #[serde(default = "default_current_grid")]
    current_grid_payout: f64,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

fn json_response(status_code: i64, body: String) -> LambdaFunctionUrlResponse {
    LambdaFunctionUrlResponse {
        status_code,
        headers: cors_headers(),
        body: Some(body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status_code: i64, message: &str) -> LambdaFunctionUrlResponse {
    json_response(status_code, format!(r#"{{"error":"{}"}}"#, message))
}

async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let request_context = &event.payload.request_context;
    let method = request_context
        .http
        .method
        .as_deref()
        .unwrap_or("POST");

    // CORS preflight
    if method == "OPTIONS" {
        return Ok(json_response(200, String::new()));
    }

    let body = event.payload.body.as_deref().unwrap_or("{}");

    let request: OfferRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => return Ok(error_response(400, &format!("Invalid JSON: {}", e))),
    };

    let market = MarketData::new(request.parameters, request.deals);
    let config = OfferConfig {
        horizon_years: request.horizon_years,
        annual_growth_rate: request.annual_growth_rate,
        current_grid_payout: request.current_grid_payout,
        premium_access: request.premium_access,
    };

    let history = match request.previous_best_deal {
        Some(value) => InMemoryBestDealStore::with_value(value),
        None => InMemoryBestDealStore::new(),
    };

    let engine = OfferEngine::new(config);
    let result = engine.compute(&request.profile, &request.firms, &market, &history);

    match serde_json::to_string(&result) {
        Ok(body) => Ok(json_response(200, body)),
        Err(e) => Ok(error_response(500, &format!("Serialization failed: {}", e))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
