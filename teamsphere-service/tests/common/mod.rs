use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::SigningKey;
use chrono::Duration;
use teamsphere::domain::authentication::service::AuthenticationService;
use teamsphere::domain::user::models::User;
use teamsphere::inbound::http::router::create_router;
use teamsphere::outbound::security::Argon2PasswordEncoder;
use teamsphere::outbound::security::DaoAuthenticationManager;
use teamsphere::user::errors::UserError;
use teamsphere::user::ports::UserRepository;
use tokio::sync::RwLock;

pub const TEST_SECRET: &str =
    "dGhpcy1pcy1hLXZlcnktc2VjdXJlLXNlY3JldC1rZXktZm9yLXRlc3RpbmctcHVycG9zZXMtb25seQo=";

/// User store keyed by email, enforcing the same uniqueness as the database
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let email = user.email.as_str().to_string();
        if users.contains_key(&email) {
            return Err(UserError::EmailAlreadyExists(email));
        }
        users.insert(email, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let password_encoder = Arc::new(Argon2PasswordEncoder::new());
        let authentication_manager = Arc::new(DaoAuthenticationManager::new(
            Arc::clone(&user_repository),
            Arc::clone(&password_encoder),
        ));
        let authenticator = Arc::new(
            Authenticator::from_base64_secret(TEST_SECRET, Duration::hours(24))
                .expect("Failed to build authenticator"),
        );

        let auth_service = Arc::new(AuthenticationService::new(
            Arc::clone(&user_repository),
            password_encoder,
            authentication_manager,
            Arc::clone(&authenticator),
        ));

        let router = create_router(auth_service, user_repository, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::new(
            SigningKey::from_base64(TEST_SECRET).expect("Failed to decode test secret"),
        );

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the issued token
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/register")
            .json(&serde_json::json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Pull `data.token` out of a successful auth response
pub async fn token_from(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["token"]
        .as_str()
        .expect("Response has no token")
        .to_string()
}
