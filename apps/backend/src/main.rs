use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::ai::http::AzureOpenAi;
use backend::ai::{Disabled, TextGenerator};
use backend::config::ai::AiConfig;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::app_state::AppState;
use backend::{connect_and_migrate, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let ai_config = AiConfig::from_env();
    let ai: Arc<dyn TextGenerator> = match AzureOpenAi::from_config(&ai_config) {
        Some(client) => {
            tracing::info!("AI text generation enabled");
            Arc::new(client)
        }
        None => {
            tracing::info!("AI text generation disabled, using base prompts");
            Arc::new(Disabled)
        }
    };

    let data = web::Data::new(AppState::new(db, ai));

    tracing::info!(%host, %port, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
