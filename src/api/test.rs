use actix_web::{get, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::api::ApiResponse;

#[derive(Serialize, ToSchema)]
pub struct TestResponse {
    /// Fixed marker so callers can tell the endpoint is wired up
    #[schema(example = "ok")]
    pub status: &'static str,
}

/// Placeholder endpoint kept while the public surface grows.
///
/// Takes no parameters and carries no business semantics; it only proves
/// routing and serialization work end to end.
#[utoipa::path(
    get,
    path = "/test/",
    tag = "test",
    responses((status = 200, description = "Routing works", body = SuccessTestResponse))
)]
#[get("/test/")]
pub async fn test() -> impl Responder {
    ApiResponse::success(TestResponse { status: "ok" })
}

// utoipa cannot name the generic wrapper inline in `body`, so alias it.
pub type SuccessTestResponse = crate::api::schemas::SuccessResponse<TestResponse>;

#[cfg(test)]
mod tests {
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_get_test_route_succeeds_without_payload() {
        let app = test::init_service(App::new().service(super::test)).await;

        let req = test::TestRequest::get().uri("/test/").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], serde_json::json!(true));
        assert_eq!(body["data"]["status"], serde_json::json!("ok"));
    }

    #[actix_web::test]
    async fn test_other_methods_are_not_routed() {
        let app = test::init_service(App::new().service(super::test)).await;

        let req = test::TestRequest::post().uri("/test/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 405);
    }
}
