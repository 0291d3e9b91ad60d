use axum::{
    extract::{Query, State},
    response::Json,
};
use common::errors::ErrorResponse;
use common::models::{ReportAndForecast, StationFeatureCollection};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::pipeline::AqhiPipeline;
use crate::reshaper::Trim;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AqhiPipeline>,
}

/// Every outcome of `GET /`, always sent with status 200
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AqhiResponse {
    Features(StationFeatureCollection),
    Report(ReportAndForecast),
    Error(ErrorResponse),
}

/// Query parameters, read leniently: the first occurrence of a key wins and
/// unparsable flags are `false`.
#[derive(Debug, Default, PartialEq)]
pub struct AqhiQuery {
    pub data_type: Option<String>,
    pub last: bool,
    pub recent: bool,
}

impl AqhiQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Self {
            data_type: first("data_type").map(str::to_string),
            last: first("last").is_some_and(parse_bool),
            recent: first("recent").is_some_and(parse_bool),
        }
    }
}

/// Boolean spellings accepted by the original service
pub fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "aqhi-service" }))
}

#[utoipa::path(
    get,
    path = "/",
    params(
        ("data_type" = Option<String>, Query, description = "`data` for station history, `repo` for report and forecast"),
        ("last" = Option<bool>, Query, description = "Keep only each station's last measurement"),
        ("recent" = Option<bool>, Query, description = "Keep only each station's first measurement")
    ),
    responses(
        (status = 200, description = "Station features, report/forecast, or an error payload", body = AqhiResponse)
    ),
    tag = "aqhi"
)]
pub async fn get_aqhi(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<AqhiResponse> {
    let query = AqhiQuery::from_pairs(&pairs);
    info!(data_type = ?query.data_type, last = query.last, recent = query.recent, "AQHI request received");

    let response = match query.data_type.as_deref() {
        Some("data") => {
            let trim = Trim::from_flags(query.last, query.recent);
            match state.pipeline.station_data(trim).await {
                Ok(collection) => AqhiResponse::Features(collection),
                Err(e) => {
                    warn!(error = %e, "Station data request failed");
                    AqhiResponse::Error(ErrorResponse::new(e.to_string()))
                }
            }
        }
        Some("repo") => AqhiResponse::Report(state.pipeline.report_and_forecast().await),
        _ => AqhiResponse::Error(ErrorResponse::new("Invalid data_type.")),
    };

    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_bool_accepts_go_spellings() {
        for value in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(parse_bool(value), "{value}");
        }
        for value in ["0", "f", "false", "yes", "", "tRuE", "2"] {
            assert!(!parse_bool(value), "{value}");
        }
    }

    #[test]
    fn query_defaults_when_absent() {
        assert_eq!(AqhiQuery::from_pairs(&[]), AqhiQuery::default());
    }

    #[test]
    fn query_reads_all_fields() {
        let query = AqhiQuery::from_pairs(&pairs(&[
            ("data_type", "data"),
            ("last", "true"),
            ("recent", "1"),
        ]));
        assert_eq!(query.data_type.as_deref(), Some("data"));
        assert!(query.last);
        assert!(query.recent);
    }

    #[test]
    fn malformed_flags_fall_back_to_false() {
        let query = AqhiQuery::from_pairs(&pairs(&[("last", "maybe"), ("recent", "")]));
        assert!(!query.last);
        assert!(!query.recent);
    }

    #[test]
    fn first_occurrence_wins() {
        let query = AqhiQuery::from_pairs(&pairs(&[
            ("data_type", "repo"),
            ("data_type", "data"),
            ("last", "false"),
            ("last", "true"),
        ]));
        assert_eq!(query.data_type.as_deref(), Some("repo"));
        assert!(!query.last);
    }
}
