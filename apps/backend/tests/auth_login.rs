mod support;

use actix_web::test;
use serde_json::json;
use support::{build_test_state, create_test_app};

#[actix_web::test]
async fn login_creates_and_reuses_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    // First login with a new phone creates the user
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "phone": "+14155552671" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let user_id = body["user_id"].as_str().unwrap().to_owned();
    assert!(!user_id.is_empty());
    assert_eq!(body["phone"], "+14155552671");

    // Second login with the same phone reuses the same user
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "phone": "+14155552671" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id.as_str());

    Ok(())
}

#[actix_web::test]
async fn login_trims_surrounding_whitespace() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "phone": "  +919876543210  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["phone"], "+919876543210");

    Ok(())
}

#[actix_web::test]
async fn login_rejects_malformed_phone() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    for bad in ["14155552671", "+0415555", "+1", "", "+14155abc71"] {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "phone": bad }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "phone {bad:?} should be rejected");

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "INVALID_PHONE");
    }

    Ok(())
}
