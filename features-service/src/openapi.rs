use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{
    FeatureCollection, FeatureRequest, PointGeometry, StationReading, WeatherStationFeature,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_features,
        handlers::get_feature,
        handlers::create_feature,
        handlers::update_feature,
        handlers::delete_feature,
    ),
    components(schemas(
        FeatureCollection,
        WeatherStationFeature,
        FeatureRequest,
        StationReading,
        PointGeometry,
        common::errors::ErrorResponse,
    )),
    tags(
        (name = "features", description = "Weather station feature management"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
