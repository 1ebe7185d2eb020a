use actix_web::{get, http::header::ContentType, post, web, HttpResponse, Responder};
use corkboard_api_schema::assignments::{SaveAssignmentsResponse, EMPTY_ASSIGNMENTS};

use crate::api_state::ApiState;
use crate::error::ApiError;

/// Streams the stored document through untouched.
#[get("/assignments")]
pub async fn get_assignments(state: web::Data<ApiState>) -> Result<HttpResponse, ApiError> {
    let store = state.store.clone();
    let raw = web::block(move || store.read_assignments_raw()).await??;
    let body = raw.unwrap_or_else(|| EMPTY_ASSIGNMENTS.as_bytes().to_vec());
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Accepts any JSON value, whatever the request content type says.
#[post("/assignments")]
pub async fn save_assignments(
    state: web::Data<ApiState>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(&body).map_err(ApiError::InvalidJson)?;

    let store = state.store.clone();
    web::block(move || store.save_assignments(&value)).await??;
    log::info!("saved assignments document ({} bytes received)", body.len());

    Ok(web::Json(SaveAssignmentsResponse::saved()))
}

#[cfg(test)]
mod tests {
    use actix_web::{
        http::{header, StatusCode},
        test,
    };
    use corkboard_api_schema::{
        assignments::{SaveAssignmentsResponse, SaveStatus},
        error::ErrorResponse,
    };
    use serde_json::{json, Value};

    use crate::test_utils::{init_test_app, TestRoot};

    fn save_request(body: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/assignments")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(body.to_string())
    }

    #[actix_web::test]
    async fn test_get_before_first_save() {
        let root = TestRoot::new();
        let app = init_test_app!(root);

        let req = test::TestRequest::get().uri("/assignments").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(test::read_body(res).await, "{}");
    }

    #[actix_web::test]
    async fn test_save_then_get() {
        let root = TestRoot::new();
        let app = init_test_app!(root);

        let req = save_request(r#"{"1": "catA"}"#).to_request();
        let res: SaveAssignmentsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(res.status, SaveStatus::Saved);

        let req = test::TestRequest::get().uri("/assignments").to_request();
        let document: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(document, json!({"1": "catA"}));
    }

    #[actix_web::test]
    async fn test_second_save_replaces_first() {
        let root = TestRoot::new();
        let app = init_test_app!(root);

        for body in [r#"{"1": "catA", "2": "catB"}"#, r#"{"3": "catC"}"#] {
            let res = test::call_service(&app, save_request(body).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/assignments").to_request();
        let document: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(document, json!({"3": "catC"}));
    }

    #[actix_web::test]
    async fn test_save_keeps_key_order() {
        let root = TestRoot::new();
        let app = init_test_app!(root);

        let req = save_request(r#"{"zebra": "catA", "apple": "catB"}"#).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            std::fs::read_to_string(&root.config.assignments_file).unwrap(),
            r#"{"zebra":"catA","apple":"catB"}"#
        );
    }

    #[actix_web::test]
    async fn test_get_returns_stored_bytes_verbatim() {
        let root = TestRoot::new();
        let app = init_test_app!(root);
        let stored = "{\n  \"kept\": \"as written\"\n}\n";
        std::fs::write(&root.config.assignments_file, stored).unwrap();

        let req = test::TestRequest::get().uri("/assignments").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, stored);
    }

    #[actix_web::test]
    async fn test_save_without_json_content_type() {
        let root = TestRoot::new();
        let app = init_test_app!(root);

        let req = test::TestRequest::post()
            .uri("/assignments")
            .set_payload(r#"["a", "b"]"#)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            std::fs::read_to_string(&root.config.assignments_file).unwrap(),
            r#"["a","b"]"#
        );
    }

    #[actix_web::test]
    async fn test_invalid_json_keeps_previous_document() {
        let root = TestRoot::new();
        let app = init_test_app!(root);

        let res = test::call_service(&app, save_request(r#"{"1":"catA"}"#).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = test::call_service(&app, save_request("not-json").to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = test::read_body_json(res).await;
        assert!(!error.error.is_empty());

        let req = test::TestRequest::get().uri("/assignments").to_request();
        let document: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(document, json!({"1": "catA"}));
    }

    #[actix_web::test]
    async fn test_oversized_document_is_rejected() {
        let root = TestRoot::new();
        let app = init_test_app!(root);

        let body = format!(
            r#"{{"big": "{}"}}"#,
            "x".repeat(root.config.max_assignments_bytes)
        );
        let res = test::call_service(&app, save_request(&body).to_request()).await;
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!root.config.assignments_file.exists());
    }
}
