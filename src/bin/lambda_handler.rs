//! AWS Lambda handler for savings projections
//!
//! Accepts calculator inputs as JSON and returns the yearly schedule and
//! summary. Optional `compare_rates` runs the same plan at other rates.
//!
//! Supports Lambda Function URLs for direct HTTP access. Requests longer
//! than [`MAX_YEARS`] or with more than [`MAX_COMPARE_RATES`] comparison
//! rates are refused with 400.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

use savings_projection::config::Config;
use savings_projection::error::ProjectionError;
use savings_projection::projection::{ProjectionSummary, YearlyProjection};
use savings_projection::{project, ProjectionInput, ScenarioRunner};

/// Longest horizon served, matching the calculator's widest year option
/// with room to spare
pub const MAX_YEARS: i32 = 100;

/// Most comparison rates accepted in one request
pub const MAX_COMPARE_RATES: usize = 10;

/// Input configuration for the projection; missing fields use the
/// configured calculator defaults
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    #[serde(default)]
    pub initial_amount: Option<f64>,

    #[serde(default)]
    pub monthly_contribution: Option<f64>,

    /// Annual rate in percent
    #[serde(default)]
    pub interest_rate: Option<f64>,

    #[serde(default)]
    pub years: Option<i32>,

    /// Additional annual rates (percent) to compare against
    #[serde(default)]
    pub compare_rates: Vec<f64>,
}

impl ProjectionRequest {
    fn to_input(&self, defaults: &ProjectionInput) -> ProjectionInput {
        ProjectionInput::new(
            self.initial_amount.unwrap_or(defaults.initial_amount),
            self.monthly_contribution.unwrap_or(defaults.monthly_contribution),
            self.interest_rate.unwrap_or(defaults.annual_interest_rate_percent),
            self.years.unwrap_or(defaults.years),
        )
    }
}

/// Output from the projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub input: ProjectionInput,
    pub summary: ProjectionSummary,
    pub years: Vec<YearlyProjection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comparisons: Vec<RateComparison>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateComparison {
    pub interest_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ProjectionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request, config: &Config) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let input = request.to_input(&config.defaults);
    if input.years > MAX_YEARS {
        return error_response(400, &format!("years must be at most {}", MAX_YEARS));
    }
    if request.compare_rates.len() > MAX_COMPARE_RATES {
        return error_response(
            400,
            &format!("at most {} comparison rates are accepted", MAX_COMPARE_RATES),
        );
    }

    let result = match project(&input) {
        Ok(result) => result,
        Err(e @ ProjectionError::InvalidInput(_)) => return error_response(400, &e.to_string()),
    };

    let comparisons = if request.compare_rates.is_empty() {
        Vec::new()
    } else {
        ScenarioRunner::new()
            .run_rates(&input, &request.compare_rates)
            .into_iter()
            .zip(&request.compare_rates)
            .map(|(outcome, &rate)| match outcome {
                Ok(r) => RateComparison { interest_rate: rate, summary: Some(r.summary()), error: None },
                Err(e) => RateComparison { interest_rate: rate, summary: None, error: Some(e.to_string()) },
            })
            .collect()
    };

    let response = ProjectionResponse {
        input,
        summary: result.summary(),
        years: result.years,
        comparisons,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let config = Config::load()?;
    let config = &config;
    run(service_fn(move |event: Request| async move { handler(event, config).await })).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn request(method: &str, body: Body) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .body(body)
            .unwrap()
    }

    async fn call(event: Request) -> (u16, Value) {
        let response = handler(event, &Config::default()).await.unwrap();
        let status = response.status().as_u16();
        let body = match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            Body::Binary(bytes) => serde_json::from_slice(bytes).unwrap(),
            Body::Empty => Value::Null,
        };
        (status, body)
    }

    async fn post(body: &str) -> (u16, Value) {
        call(request("POST", Body::from(body))).await
    }

    #[test]
    fn test_request_defaults() {
        let request: ProjectionRequest = serde_json::from_str("{}").unwrap();
        let input = request.to_input(&ProjectionInput::default());
        assert_eq!(input, ProjectionInput::default());
    }

    #[test]
    fn test_request_fields() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"initialAmount": 500, "interestRate": 3.5, "years": 20, "compareRates": [4, 6]}"#,
        )
        .unwrap();
        let input = request.to_input(&ProjectionInput::default());
        assert_eq!(input, ProjectionInput::new(500.0, 100.0, 3.5, 20));
        assert_eq!(request.compare_rates, vec![4.0, 6.0]);
    }

    #[tokio::test]
    async fn test_preflight() {
        let response = handler(request("OPTIONS", Body::Empty), &Config::default()).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert!(matches!(response.body(), Body::Empty));
    }

    #[tokio::test]
    async fn test_projection_response() {
        let (status, body) = post(r#"{"years": 1}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body["summary"]["finalBalance"], 2279.0);
        assert_eq!(body["summary"]["totalInterest"], 79.0);
        assert_eq!(body["years"].as_array().unwrap().len(), 1);
        assert_eq!(body["years"][0]["cumulativeContributions"], 2200.0);
        assert!(body.get("comparisons").is_none());
    }

    #[tokio::test]
    async fn test_empty_body_uses_defaults() {
        let (status, body) = call(request("POST", Body::Empty)).await;
        assert_eq!(status, 200);
        assert_eq!(body["years"].as_array().unwrap().len(), 10);
        assert_eq!(body["summary"]["finalBalance"], 17175.0);
    }

    #[tokio::test]
    async fn test_rate_comparisons() {
        let (status, body) = post(r#"{"years": 1, "compareRates": [0, 5]}"#).await;
        assert_eq!(status, 200);

        let comparisons = body["comparisons"].as_array().unwrap();
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0]["interestRate"], 0.0);
        assert_eq!(comparisons[0]["summary"]["finalBalance"], 2200.0);
        assert_eq!(comparisons[1]["summary"]["finalBalance"], 2279.0);
        assert!(comparisons.iter().all(|c| c.get("error").is_none()));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (status, body) = post("{not json").await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let (status, body) = post(r#"{"years": 0}"#).await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().starts_with("invalid input"));
    }

    #[tokio::test]
    async fn test_limits() {
        let (status, body) = post(r#"{"years": 178956970}"#).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "years must be at most 100");

        let (status, _) = post(&format!(r#"{{"years": {}}}"#, MAX_YEARS)).await;
        assert_eq!(status, 200);

        let rates = vec!["5"; MAX_COMPARE_RATES + 1].join(",");
        let (status, body) = post(&format!(r#"{{"years": 1, "compareRates": [{}]}}"#, rates)).await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("comparison rates"));
    }
}
