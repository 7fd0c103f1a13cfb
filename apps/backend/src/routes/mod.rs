use actix_web::web;

pub mod auth;
pub mod game;
pub mod health;
pub mod lobby;

/// Configure application routes for both the HttpServer and test apps.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Auth routes: /auth/**
    cfg.service(web::scope("/auth").configure(auth::configure_routes));

    // Game routes: /game/**
    cfg.service(web::scope("/game").configure(game::configure_routes));

    // Lobby routes: /lobby/**
    cfg.service(web::scope("/lobby").configure(lobby::configure_routes));
}
