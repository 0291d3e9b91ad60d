use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::errors::ErrorResponse;
use common::models::{
    Measurement, PointGeometry, ReportAndForecast, ReportSection, StationFeature,
    StationFeatureCollection, StationProperties,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_aqhi,
    ),
    components(schemas(
        handlers::AqhiResponse,
        StationFeatureCollection,
        StationFeature,
        StationProperties,
        Measurement,
        PointGeometry,
        ReportAndForecast,
        ReportSection,
        ErrorResponse,
    )),
    tags(
        (name = "aqhi", description = "Air Quality Health Index data"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
