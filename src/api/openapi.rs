use crate::api::schemas::{ErrorDetail, ErrorResponse};
use crate::api::test::{SuccessTestResponse, TestResponse};
use crate::health::{HealthResponse, ReadinessResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts Backend API",
        version = "1.0.0",
        description = "API documentation for the accounts backend",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Ops endpoints
        crate::health::health,
        crate::health::readiness,

        // Placeholder surface
        crate::api::test::test,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessTestResponse,
            ErrorResponse,
            ErrorDetail,

            // DTOs
            TestResponse,
            HealthResponse,
            ReadinessResponse
        )
    ),
    tags(
        (name = "ops", description = "Liveness and readiness probes"),
        (name = "test", description = "Placeholder endpoints"),
    )
)]
pub struct ApiDoc;
