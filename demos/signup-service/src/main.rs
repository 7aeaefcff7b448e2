use errform::{ErrformConfig, ErrorHandler, FormatterConfig};
use signup_service::services::UserService;
use signup_service::{app, AppState};

#[tokio::main]
async fn main() {
    errform::init_tracing();

    // load() succeeds even when application.yaml is absent (env vars still overlay).
    let config = ErrformConfig::load("dev").unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to empty configuration");
        ErrformConfig::empty()
    });
    let formatter = FormatterConfig::from_config(&config).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid errors.* configuration, using defaults");
        FormatterConfig::default()
    });

    let state = AppState {
        users: UserService::new(),
        errors: ErrorHandler::new(formatter),
    };

    let addr = "0.0.0.0:3000";
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, addr, "failed to bind");
            return;
        }
    };
    tracing::info!(addr, "signup-service listening");
    if let Err(err) = axum::serve(listener, app(state)).await {
        tracing::error!(error = %err, "server error");
    }
}
