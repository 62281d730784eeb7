use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::config::Config;

pub fn create_router(state: AppState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origin
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let board_routes = Router::new()
        .route(
            "/",
            get(handlers::boards::list_boards).post(handlers::boards::create_board),
        )
        .route(
            "/{id}",
            get(handlers::boards::get_board)
                .patch(handlers::boards::update_board)
                .delete(handlers::boards::delete_board),
        )
        .route("/{id}/lists", get(handlers::boards::get_board_lists))
        .route("/{id}/cards", get(handlers::boards::get_board_cards))
        .route(
            "/{id}/activities",
            get(handlers::boards::get_board_activities),
        );

    let list_routes = Router::new()
        .route("/", post(handlers::lists::create_list))
        .route(
            "/{id}",
            get(handlers::lists::get_list)
                .patch(handlers::lists::update_list)
                .delete(handlers::lists::delete_list),
        )
        .route("/{id}/cards", get(handlers::lists::get_list_cards));

    let card_routes = Router::new()
        .route("/", post(handlers::cards::create_card))
        .route(
            "/{id}",
            get(handlers::cards::get_card)
                .patch(handlers::cards::update_card)
                .delete(handlers::cards::delete_card),
        );

    let activity_routes = Router::new()
        .route("/", post(handlers::activities::create_activity))
        .route("/{id}", delete(handlers::activities::delete_activity));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::liveness))
        .nest("/boards", board_routes)
        .nest("/lists", list_routes)
        .nest("/cards", card_routes)
        .nest("/activities", activity_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
