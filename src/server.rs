//! HTTP surface: resolve every `GET` request into its i18n context.

use crate::adapter::redirector::{RedirectorBag, RedirectorChain};
use crate::builder::{request_host, RouteParameters};
use crate::definitions::{PARAM_HOST, ROUTE_TYPE_ROUTE};
use crate::error::I18nError;
use crate::manager::I18nContextManager;
use axum::{
    extract::{Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, LOCATION},
        Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

struct ServerError(I18nError);

impl ServerError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            I18nError::RouteItem(_) => StatusCode::BAD_REQUEST,
            I18nError::ZoneSiteNotFound(_) => StatusCode::NOT_FOUND,
            I18nError::AdapterNotFound(_) | I18nError::OptionValidation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Context resolution failed ({}): {}", status, self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<I18nError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<I18nContextManager>,
}

pub fn router(manager: Arc<I18nContextManager>) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(resolve_context)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { manager })
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Context summary for requests carrying a locale; otherwise a redirect
/// chosen by the zone's redirectors.
async fn resolve_context(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ServerError> {
    let (parts, _body) = request.into_parts();
    if parts.method != Method::GET {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let manager = &state.manager;
    let registries = manager.registries().current();
    if let Some(context) = manager.build_context_by_request_in(&registries, &parts, None, true)? {
        return Ok(Json(context.summary()?).into_response());
    }

    let mut parameters = RouteParameters::new();
    if let Some(host) = request_host(&parts) {
        parameters.insert(PARAM_HOST.to_string(), Value::String(host));
    }
    let context =
        manager.build_context_by_parameters_in(&registries, ROUTE_TYPE_ROUTE, &parameters, true)?;

    let accept_language = parts
        .headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let bag = RedirectorBag::new(context.zone()).with_accept_language(accept_language);

    match RedirectorChain::new(registries.redirectors()).run(&bag) {
        Some(decision) => {
            info!(
                "Redirecting {} to {} ({})",
                parts.uri.path(),
                decision.url,
                decision.redirector
            );
            Ok((StatusCode::FOUND, [(LOCATION, decision.url)]).into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no redirect target in zone \"{}\"", context.zone().name()) })),
        )
            .into_response()),
    }
}
