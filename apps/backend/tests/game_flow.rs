mod support;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::{json, Value};
use support::{build_test_state, create_test_app};
use time::{Duration, OffsetDateTime};

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

async fn start_game<S>(app: &S, theme_id: &str, user_id: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/game/start")
        .set_json(json!({ "theme_id": theme_id, "user_id": user_id }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    test::read_body_json(resp).await
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
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    body["selected"]["name"].as_str().unwrap().to_owned()
}

fn digits(value: &Value) -> Vec<u8> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_u64().unwrap() as u8)
        .collect()
}

#[actix_web::test]
async fn lists_seeded_themes_ordered_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/game/themes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body["themes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["History", "Movies", "Sports"]);

    Ok(())
}

#[actix_web::test]
async fn start_opens_question_set_mode() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550001").await;
    let session = start_game(&app, "sports", &user_id).await;

    assert_eq!(session["status"], "ACTIVE");
    assert_eq!(session["mode"], "QUESTION_SET");
    assert_eq!(digits(&session["allowed_digits"]), vec![1, 2, 9]);
    assert_eq!(session["counters"]["hints_used"], 0);
    assert_eq!(session["counters"]["max_hints"], 5);
    assert_eq!(session["counters"]["wrong_guesses"], 0);
    assert_eq!(session["counters"]["max_guesses"], 3);
    let prompt = session["prompt"].as_str().unwrap();
    assert!(prompt.contains("\"Sports\""));
    assert!(prompt.contains("Press 1 for a hint or press 2 to guess."));

    Ok(())
}

#[actix_web::test]
async fn start_by_phone_creates_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/game/start")
        .set_json(json!({ "theme_id": "movies", "user_phone": "+14155550002" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ACTIVE");

    Ok(())
}

#[actix_web::test]
async fn start_requires_user_identity() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/game/start")
        .set_json(json!({ "theme_id": "movies" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "user_id or user_phone is required");

    Ok(())
}

#[actix_web::test]
async fn start_supersedes_previous_active_session() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550003").await;
    let first = start_game(&app, "sports", &user_id).await;
    let second = start_game(&app, "history", &user_id).await;
    assert_ne!(first["session_id"], second["session_id"]);

    // The superseded session keeps ENDED_REPLACED for audit and behaves
    // like any ended session: 0 repeats the replay menu.
    let resp = press(&app, first["session_id"].as_str().unwrap(), 0).await;
    assert_eq!(resp["status"], "ENDED_REPLACED");
    assert_eq!(resp["mode"], "ENDED");
    assert_eq!(digits(&resp["allowed_digits"]), vec![1, 2, 3, 9]);
    assert!(resp["prompt"].as_str().unwrap().contains("Press 1 to play again."));

    Ok(())
}

#[actix_web::test]
async fn exact_guess_wins_and_scores() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550004").await;
    let session = start_game(&app, "sports", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    // Switch to guess input
    let resp = press(&app, &session_id, 2).await;
    assert_eq!(resp["mode"], "GUESS_INPUT");
    assert_eq!(resp["prompt"], "I'm listening! Who is the hidden personality?");
    assert_eq!(digits(&resp["allowed_digits"]), vec![9]);

    let name = reveal_name(&app, &session_id).await;
    let won = submit_guess(&app, &session_id, &name).await;

    assert_eq!(won["status"], "WON");
    assert_eq!(won["mode"], "ENDED");
    assert_eq!(won["reveal"]["name"], name.as_str());
    assert_eq!(digits(&won["allowed_digits"]), vec![1, 2, 3, 9]);
    // Win prompt never names the personality
    assert!(!won["prompt"].as_str().unwrap().contains(&name));

    Ok(())
}

#[actix_web::test]
async fn partial_guess_asks_for_confirmation() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550005").await;
    let session = start_game(&app, "sports", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    press(&app, &session_id, 2).await;
    let name = reveal_name(&app, &session_id).await;

    // Extra token drops the match below exact, triggering confirmation
    let confirm = submit_guess(&app, &session_id, &format!("{name} junior")).await;
    assert_eq!(confirm["mode"], "GUESS_CONFIRM");
    assert_eq!(
        confirm["prompt"],
        format!("Did you mean {name}? Press 1 for Yes, 2 for No.")
    );
    assert_eq!(digits(&confirm["allowed_digits"]), vec![1, 2, 9]);

    // Pressing 0 repeats the confirmation question
    let repeat = press(&app, &session_id, 0).await;
    assert_eq!(
        repeat["prompt"],
        "Did you mean the suggested personality? Press 1 for Yes, 2 for No."
    );

    // Yes resolves the pending candidate and wins
    let won = press(&app, &session_id, 1).await;
    assert_eq!(won["status"], "WON");
    assert_eq!(won["reveal"]["name"], name.as_str());

    Ok(())
}

#[actix_web::test]
async fn declining_confirmation_returns_to_guess_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550006").await;
    let session = start_game(&app, "movies", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    press(&app, &session_id, 2).await;
    let name = reveal_name(&app, &session_id).await;

    let confirm = submit_guess(&app, &session_id, &format!("{name} junior")).await;
    assert_eq!(confirm["mode"], "GUESS_CONFIRM");

    let declined = press(&app, &session_id, 2).await;
    assert_eq!(declined["mode"], "GUESS_INPUT");
    assert_eq!(declined["prompt"], "Okay. Type your guess again.");
    // Declining does not burn a guess
    assert_eq!(declined["counters"]["wrong_guesses"], 0);

    Ok(())
}

#[actix_web::test]
async fn three_wrong_guesses_lose_the_game() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550007").await;
    let session = start_game(&app, "history", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();
    let name = reveal_name(&app, &session_id).await;

    // First two misses bounce back to the question menu
    for expected_wrong in 1..=2 {
        press(&app, &session_id, 2).await;
        let miss = submit_guess(&app, &session_id, "zzz qqq xxx").await;
        assert_eq!(miss["status"], "ACTIVE");
        assert_eq!(miss["mode"], "QUESTION_SET");
        assert_eq!(miss["result"], "INCORRECT");
        assert_eq!(miss["counters"]["wrong_guesses"], expected_wrong);
        assert_eq!(digits(&miss["allowed_digits"]), vec![1, 2, 9]);
    }

    // Third miss ends the game and reveals the personality
    press(&app, &session_id, 2).await;
    let lost = submit_guess(&app, &session_id, "zzz qqq xxx").await;
    assert_eq!(lost["status"], "FAILED_GUESSES");
    assert_eq!(lost["mode"], "ENDED");
    assert_eq!(lost["reveal"]["name"], name.as_str());
    assert!(lost["prompt"].as_str().unwrap().contains(&name));

    Ok(())
}

#[actix_web::test]
async fn guess_outside_guess_input_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550008").await;
    let session = start_game(&app, "sports", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/game/guess")
        .set_json(json!({ "session_id": session_id, "text": "anyone" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MODE_VIOLATION");
    assert_eq!(body["detail"], "Guess not allowed in mode QUESTION_SET");

    Ok(())
}

#[actix_web::test]
async fn empty_guess_reprompts_without_burning_a_guess() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550009").await;
    let session = start_game(&app, "sports", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    press(&app, &session_id, 2).await;
    let resp = submit_guess(&app, &session_id, "   ").await;
    assert_eq!(resp["prompt"], "Empty guess. Type the personality's name.");
    assert_eq!(resp["counters"]["wrong_guesses"], 0);
    assert_eq!(resp["mode"], "GUESS_INPUT");

    Ok(())
}

#[actix_web::test]
async fn hint_flow_reveals_attribute_and_consumes_hint() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550010").await;
    let session = start_game(&app, "sports", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    // Request a question set
    let offered = press(&app, &session_id, 1).await;
    assert_eq!(offered["mode"], "HINT_SELECTION");
    let set = offered["question_set"].as_array().unwrap();
    assert!(!set.is_empty() && set.len() <= 4);
    for (i, q) in set.iter().enumerate() {
        assert_eq!(q["dtmf"].as_u64().unwrap(), i as u64 + 1);
        assert!(!q["text"].as_str().unwrap().is_empty());
    }
    let allowed = digits(&offered["allowed_digits"]);
    assert!(allowed.contains(&1));
    assert!(allowed.contains(&9));

    // Pressing 0 repeats the question menu without consuming anything
    let repeat = press(&app, &session_id, 0).await;
    assert_eq!(repeat["counters"]["hints_used"], 0);

    // Pick the first question
    let answered = press(&app, &session_id, 1).await;
    assert_eq!(answered["mode"], "QUESTION_SET");
    assert_eq!(answered["counters"]["hints_used"], 1);
    assert_eq!(answered["summary"].as_array().unwrap().len(), 1);
    let answer = answered["summary"][0]["answer"].as_str().unwrap();
    assert!(!answer.is_empty());
    assert_eq!(digits(&answered["allowed_digits"]), vec![1, 2, 9]);

    Ok(())
}

#[actix_web::test]
async fn exhausting_hints_forces_guess_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550011").await;
    let session = start_game(&app, "sports", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    let mut last = session;
    for _ in 0..5 {
        let offered = press(&app, &session_id, 1).await;
        assert_eq!(offered["mode"], "HINT_SELECTION");
        last = press(&app, &session_id, 1).await;
    }

    assert_eq!(last["counters"]["hints_used"], 5);
    assert_eq!(last["mode"], "GUESS_INPUT");
    assert_eq!(last["prompt"], "Hints exhausted! Time to guess. Type your guess now.");

    Ok(())
}

#[actix_web::test]
async fn global_exit_ends_the_session() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550012").await;
    let session = start_game(&app, "movies", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    let exited = press(&app, &session_id, 9).await;
    assert_eq!(exited["status"], "ENDED_EXIT");
    assert_eq!(exited["mode"], "ENDED");
    assert_eq!(digits(&exited["allowed_digits"]), vec![1, 2, 3, 9]);

    // The ENDED menu can restart the same theme
    let restarted = press(&app, &session_id, 1).await;
    assert_eq!(restarted["status"], "ACTIVE");
    assert_eq!(restarted["mode"], "QUESTION_SET");
    assert_ne!(restarted["session_id"], session_id.as_str());

    Ok(())
}

#[actix_web::test]
async fn ended_menu_hands_off_to_lobby() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550013").await;
    let session = start_game(&app, "movies", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    press(&app, &session_id, 9).await;
    let lobby = press(&app, &session_id, 3).await;
    assert_eq!(lobby["mode"], "THEME_MENU");
    assert!(lobby["prompt"].as_str().unwrap().starts_with("Welcome to AI Genie."));
    assert!(lobby["digit_map"].is_object());

    Ok(())
}

#[actix_web::test]
async fn idle_session_times_out_on_next_press() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550014").await;
    let session = start_game(&app, "history", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    // Backdate the session past the idle window
    let model = backend::repos::game_sessions::find_by_id(state.db(), &session_id)
        .await?
        .unwrap();
    let mut am: backend::entities::game_sessions::ActiveModel = model.into();
    am.last_activity_at = Set(OffsetDateTime::now_utc() - Duration::minutes(11));
    am.update(state.db()).await?;

    let timed_out = press(&app, &session_id, 2).await;
    assert_eq!(timed_out["status"], "FAILED_TIMEOUT");
    assert_eq!(timed_out["mode"], "ENDED");
    assert!(timed_out["prompt"]
        .as_str()
        .unwrap()
        .starts_with("Session expired due to inactivity."));

    Ok(())
}

#[actix_web::test]
async fn debug_reveal_does_not_mutate_session() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let user_id = login(&app, "+14155550015").await;
    let session = start_game(&app, "sports", &user_id).await;
    let session_id = session["session_id"].as_str().unwrap().to_owned();

    let first = reveal_name(&app, &session_id).await;
    let second = reveal_name(&app, &session_id).await;
    assert_eq!(first, second);

    // Session still alive in QUESTION_SET
    let resp = press(&app, &session_id, 0).await;
    assert_eq!(resp["status"], "ACTIVE");

    Ok(())
}
