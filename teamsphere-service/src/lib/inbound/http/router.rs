use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowHeaders;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::current_user::current_user;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::user::ports::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthenticationServicePort>,
    pub user_repository: Arc<dyn UserRepository>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthenticationServicePort>,
    user_repository: Arc<dyn UserRepository>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        user_repository,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(authenticate));

    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Authorization headers carry bearer tokens and are never recorded.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([header::AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::authentication::errors::AuthError;
    use crate::domain::authentication::models::AuthenticateCommand;
    use crate::domain::authentication::models::AuthenticationResponse;
    use crate::domain::authentication::models::RegisterCommand;
    use crate::domain::user::models::User;
    use crate::user::errors::UserError;

    const SECRET: &str =
        "dGhpcy1pcy1hLXZlcnktc2VjdXJlLXNlY3JldC1rZXktZm9yLXRlc3RpbmctcHVycG9zZXMtb25seQo=";

    struct RejectingService;

    #[async_trait]
    impl AuthenticationServicePort for RejectingService {
        async fn register(
            &self,
            _command: RegisterCommand,
        ) -> Result<AuthenticationResponse, AuthError> {
            Err(AuthError::BadCredentials)
        }

        async fn authenticate(
            &self,
            _command: AuthenticateCommand,
        ) -> Result<AuthenticationResponse, AuthError> {
            Err(AuthError::BadCredentials)
        }
    }

    struct EmptyRepository;

    #[async_trait]
    impl UserRepository for EmptyRepository {
        async fn save(&self, user: User) -> Result<User, UserError> {
            Ok(user)
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, UserError> {
            Ok(None)
        }
    }

    fn router() -> Router {
        let authenticator =
            Authenticator::from_base64_secret(SECRET, chrono::Duration::hours(1)).unwrap();
        create_router(
            Arc::new(RejectingService),
            Arc::new(EmptyRepository),
            Arc::new(authenticator),
        )
    }

    #[tokio::test]
    async fn test_cors_preflight_mirrors_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/auth/login")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], 401);
        assert_eq!(body["data"]["message"], "Missing Authorization header");
    }

    #[tokio::test]
    async fn test_login_failure_maps_to_unauthorized() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"email":"john.doe@example.com","password":"wrong"}"#,
            ))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
