mod support;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use serde_json::{json, Value};
use support::{build_test_state, create_test_app};

async fn login<S>(app: &S, phone: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "phone": phone }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    body["user_id"].as_str().unwrap().to_owned()
}

async fn start_game<S>(app: &S, theme_id: &str, user_id: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/game/start")
        .set_json(json!({ "theme_id": theme_id, "user_id": user_id }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    body["session_id"].as_str().unwrap().to_owned()
}

async fn press<S>(app: &S, session_id: &str, digit: u8) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/game/input/dtmf")
        .set_json(json!({ "session_id": session_id, "digit": digit }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    test::read_body_json(resp).await
}

async fn submit_guess<S>(app: &S, session_id: &str, text: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/game/guess")
        .set_json(json!({ "session_id": session_id, "text": text }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    test::read_body_json(resp).await
}

async fn reveal_name<S>(app: &S, session_id: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/game/debug/reveal")
        .set_json(json!({ "session_id": session_id }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let body: Value = test::read_body_json(resp).await;
    body["selected"]["name"].as_str().unwrap().to_owned()
}

async fn win_game<S>(app: &S, theme_id: &str, user_id: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let session_id = start_game(app, theme_id, user_id).await;
    press(app, &session_id, 2).await;
    let name = reveal_name(app, &session_id).await;
    let won = submit_guess(app, &session_id, &name).await;
    assert_eq!(won["status"], "WON");
    session_id
}

async fn lose_game<S>(app: &S, theme_id: &str, user_id: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let session_id = start_game(app, theme_id, user_id).await;
    for _ in 0..3 {
        press(app, &session_id, 2).await;
        submit_guess(app, &session_id, "zzz qqq xxx").await;
    }
    session_id
}

#[actix_web::test]
async fn ended_menu_shows_ranked_leaderboard() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let winner = login(&app, "+14155552001").await;
    let loser = login(&app, "+14155552002").await;

    let winner_session = win_game(&app, "sports", &winner).await;
    lose_game(&app, "sports", &loser).await;

    // The winner's ENDED menu, digit 2 → leaderboard for the session's theme
    let board = press(&app, &winner_session, 2).await;
    assert_eq!(board["theme_id"], "sports");

    let top10 = board["top10"].as_array().unwrap();
    assert_eq!(top10.len(), 2);

    // A win with no hints and no wrong guesses scores at least the base plus
    // both unused-resource bonuses
    assert_eq!(top10[0]["rank"], 1);
    assert_eq!(top10[0]["wins"], 1);
    assert_eq!(top10[0]["losses"], 0);
    assert!(top10[0]["total_score"].as_i64().unwrap() >= 1000);

    assert_eq!(top10[1]["rank"], 2);
    assert_eq!(top10[1]["wins"], 0);
    assert_eq!(top10[1]["losses"], 1);
    assert_eq!(top10[1]["total_score"], 0);

    // Phones are masked: prefix and last four survive, middle is starred
    let masked = top10[0]["phone"].as_str().unwrap();
    assert!(masked.starts_with("+14"));
    assert!(masked.ends_with("2001"));
    assert!(masked.contains('*'));
    assert_ne!(masked, "+14155552001");

    // The requesting user's own row rides along
    assert_eq!(board["me"]["rank"], 1);
    assert_eq!(board["me"]["wins"], 1);

    Ok(())
}

#[actix_web::test]
async fn leaderboard_is_scoped_to_the_theme() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let player = login(&app, "+14155552003").await;
    win_game(&app, "movies", &player).await;
    let history_session = lose_game(&app, "history", &player).await;

    // The history board must not count the movies win
    let board = press(&app, &history_session, 2).await;
    assert_eq!(board["theme_id"], "history");
    let top10 = board["top10"].as_array().unwrap();
    assert_eq!(top10.len(), 1);
    assert_eq!(top10[0]["wins"], 0);
    assert_eq!(top10[0]["losses"], 1);
    assert_eq!(top10[0]["total_score"], 0);

    Ok(())
}

#[actix_web::test]
async fn replaying_overwrites_the_session_result() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await?;

    let player = login(&app, "+14155552004").await;
    let session_id = win_game(&app, "sports", &player).await;

    // Restarting from ENDED reuses the flow; the old session keeps exactly
    // one result row (unique per session)
    let restarted = press(&app, &session_id, 1).await;
    assert_eq!(restarted["status"], "ACTIVE");

    let result = backend::repos::game_results::find_by_session(state.db(), &session_id)
        .await?
        .unwrap();
    assert!(result.score >= 1000);
    assert_eq!(result.hints_used, 0);
    assert_eq!(result.wrong_guesses, 0);

    Ok(())
}
