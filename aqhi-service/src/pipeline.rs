use common::errors::{AppError, ErrorResponse};
use common::models::{ReportAndForecast, ReportSection, StationFeatureCollection};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::api_client::{AqhiClient, VariableExtractor};
use crate::reshaper::{Trim, build_feature_collection, decode_records};

pub const STATION_DATA_VARIABLE: &str = "station_24_data";
pub const REPORT_VARIABLE: &str = "aqhi_report";
pub const FORECAST_VARIABLE: &str = "aqhi_forecast";

/// Wires the extraction client to the two upstream documents
pub struct AqhiPipeline {
    client: Arc<AqhiClient>,
    pollutant_url: String,
    forecast_url: String,
    station_extractor: VariableExtractor,
    report_extractor: VariableExtractor,
    forecast_extractor: VariableExtractor,
}

impl AqhiPipeline {
    pub fn new(client: Arc<AqhiClient>, pollutant_url: String, forecast_url: String) -> Self {
        Self {
            client,
            pollutant_url,
            forecast_url,
            station_extractor: VariableExtractor::new(STATION_DATA_VARIABLE),
            report_extractor: VariableExtractor::new(REPORT_VARIABLE),
            forecast_extractor: VariableExtractor::new(FORECAST_VARIABLE),
        }
    }

    /// Past-24-hour pollutant history reshaped into station features
    #[instrument(skip(self))]
    pub async fn station_data(&self, trim: Trim) -> Result<StationFeatureCollection, AppError> {
        let raw = self
            .client
            .fetch_and_extract(&self.pollutant_url, &self.station_extractor)
            .await?;
        let groups = decode_records(raw)?;
        let collection = build_feature_collection(groups, trim);

        info!(stations = collection.features.len(), "Built station feature collection");
        Ok(collection)
    }

    /// Report and forecast are fetched independently; either may fail alone.
    #[instrument(skip(self))]
    pub async fn report_and_forecast(&self) -> ReportAndForecast {
        let (report, forecast) = tokio::join!(
            self.client.fetch_and_extract(&self.forecast_url, &self.report_extractor),
            self.client.fetch_and_extract(&self.forecast_url, &self.forecast_extractor),
        );

        ReportAndForecast {
            aqhi_report: to_section(REPORT_VARIABLE, report),
            aqhi_forecast: to_section(FORECAST_VARIABLE, forecast),
        }
    }
}

fn to_section(variable: &str, result: Result<Vec<serde_json::Value>, AppError>) -> ReportSection {
    match result {
        Ok(data) => ReportSection::Data(data),
        Err(e) => {
            warn!(variable = %variable, error = %e, "Report fetch failed");
            ReportSection::Error(ErrorResponse::new(format!("No match found for {}.", variable)))
        }
    }
}
