//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::HeaderValue,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use validator::Validate;

use crate::{
    config::CorsConfig,
    error::{AppError, AppResult},
    AppState,
};

/// JSON body extractor that runs `validator` rules before the handler sees the payload
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path extractor whose rejection is reported as a validation error
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> AppResult<Router> {
    let cors = cors_layer(&state.config.cors)?;
    let static_files = ServeDir::new(&state.config.static_files.dir);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Ok(Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .nest_service("/static", static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        ))
}

/// One allowed origin, any method and header, credentials allowed
fn cors_layer(config: &CorsConfig) -> AppResult<CorsLayer> {
    // Credentialed requests cannot use a wildcard origin
    if config.allowed_origin == "*" {
        return Err(AppError::Internal(
            "CORS origin must be explicit when credentials are allowed".to_string(),
        ));
    }

    let origin = HeaderValue::from_str(&config.allowed_origin).map_err(|e| {
        AppError::Internal(format!(
            "Invalid CORS origin {:?}: {}",
            config.allowed_origin, e
        ))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_rejects_invalid_origin() {
        let config = CorsConfig {
            allowed_origin: "http://bad\norigin".to_string(),
        };
        assert!(matches!(cors_layer(&config), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_cors_rejects_wildcard_origin() {
        let config = CorsConfig {
            allowed_origin: "*".to_string(),
        };
        assert!(matches!(cors_layer(&config), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_cors_accepts_configured_origin() {
        let config = CorsConfig {
            allowed_origin: "http://localhost:53163".to_string(),
        };
        assert!(cors_layer(&config).is_ok());
    }
}
