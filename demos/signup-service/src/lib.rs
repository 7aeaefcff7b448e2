pub mod models;
pub mod routes;
pub mod services;

use axum::routing::get;
use axum::Router;
use errform::ErrorHandler;

use services::UserService;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub errors: ErrorHandler,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/users", get(routes::list_users).post(routes::create_user))
        .route(
            "/users/{id}",
            get(routes::get_user).delete(routes::delete_user),
        )
        .layer(errform::catch_panic_layer())
        .with_state(state)
}
