mod support;

use actix_web::test;
use migration::count_applied_migrations;
use serde_json::Value;
use support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_eq!(body["migrations"], "m20250824_000002_seed_catalog");
    assert!(!body["app_version"].as_str().unwrap().is_empty());
    assert!(!body["time"].as_str().unwrap().is_empty());

    Ok(())
}

#[actix_web::test]
async fn all_migrations_apply_on_a_fresh_database() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    assert_eq!(count_applied_migrations(state.db()).await?, 2);
    Ok(())
}
