//! HTTP client for the inventory REST API.
//!
//! One generic dispatch path serves every typed resource method: compose the
//! URL, derive headers from the token store, send, and translate failures
//! into [`ApiError`]. Transport-level unreachability (connection refused,
//! host down) is the one failure class handled twice: when mock mode is
//! enabled the same request is handed to the in-memory [`MockBackend`] and
//! its answer is returned instead.
//!
//! Login bypasses the generic path on purpose: the backend takes it
//! form-encoded as `username`/`password`, unlike every other endpoint.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::auth::headers;
use crate::auth::token::TokenStore;
use crate::config::ClientConfig;
use crate::mock::MockBackend;
use crate::models::{
    AuthResponse, Batch, BatchPatch, Category, CategoryPatch, LoginCredentials, NewBatch,
    NewCategory, NewProduct, Product, ProductPatch, RegisterData, User, UserPatch,
};

/// Typed client over the REST backend, with optional mock fallback.
///
/// Stateless in live mode, a thin proxy over the remote store. In mock
/// mode it owns the in-memory collections for the life of the client.
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
    tokens: TokenStore,
    mock: Option<MockBackend>,
}

impl ApiClient {
    /// Build a client from configuration. The mock backend is seeded here,
    /// once, when the fallback is enabled.
    pub fn new(config: ClientConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        // No client-side timeout: a hung request is left to the transport.
        let http = reqwest::Client::builder().build()?;
        let mock = config.mock_fallback.then(MockBackend::new);

        Ok(Self {
            config,
            http,
            tokens,
            mock,
        })
    }

    // ── Generic dispatch ─────────────────────────────────────────

    /// Send one request and return the response body as JSON. An empty 2xx
    /// body (204-style deletes) comes back as an empty object.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        extra_headers: &[(&'static str, String)],
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let header_set =
            headers::merge_headers(headers::auth_headers(&self.tokens), extra_headers);

        let mut request = self.http.request(method.clone(), &url);
        for (name, value) in header_set {
            request = request.header(name, value);
        }
        if let Some(body) = &body {
            request = request.body(body.to_string());
        }

        tracing::debug!(%method, endpoint, "dispatching request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if is_unreachable(&e) => {
                return self.fallback(&method, endpoint, body.as_ref(), &e);
            }
            // Transport failures unrelated to reachability propagate unchanged.
            Err(e) => return Err(e.into()),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail: error_detail(response, status).await,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            Ok(Value::Object(serde_json::Map::new()))
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }

    /// [`Self::request`], decoded into a typed result.
    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = self.request(method, endpoint, body, &[]).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Unreachable-server handling: delegate the identical request to the
    /// mock backend when enabled, otherwise surface a connectivity error.
    fn fallback(
        &self,
        method: &Method,
        endpoint: &str,
        body: Option<&Value>,
        cause: &reqwest::Error,
    ) -> Result<Value, ApiError> {
        match &self.mock {
            Some(mock) => {
                tracing::warn!(endpoint, "server unreachable, serving from mock backend");
                mock.handle(method, endpoint, body)
            }
            None => {
                tracing::debug!("server unreachable, no fallback: {cause}");
                Err(ApiError::Unreachable(self.config.base_url.clone()))
            }
        }
    }

    // ── Auth ─────────────────────────────────────────────────────

    /// Authenticate against `/users/login`. This endpoint is the protocol's
    /// documented oddity: credentials travel form-encoded as
    /// `username`/`password` rather than as JSON.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/users/login", self.config.base_url);
        let form = [
            ("username", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = match self.http.post(&url).form(&form).send().await {
            Ok(response) => response,
            Err(e) if is_unreachable(&e) => {
                return match &self.mock {
                    Some(mock) => {
                        tracing::warn!("server unreachable, logging in against mock backend");
                        mock.login(&credentials.email, &credentials.password)
                    }
                    None => Err(ApiError::Unreachable(self.config.base_url.clone())),
                };
            }
            Err(e) => return Err(e.into()),
        };

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            // One message regardless of which field was wrong.
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail: error_detail(response, status).await,
            });
        }

        Ok(response.json::<AuthResponse>().await?)
    }

    /// Create an account. Registration input is validated locally first;
    /// a bad confirmation or short password never reaches the network.
    pub async fn register(
        &self,
        data: &RegisterData,
        confirm_password: &str,
    ) -> Result<User, ApiError> {
        data.validate(confirm_password)?;
        self.request_as(Method::POST, "/users", Some(serde_json::to_value(data)?))
            .await
    }

    // ── Users ────────────────────────────────────────────────────

    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.request_as(Method::GET, "/users", None).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.request_as(Method::GET, &format!("/users/{id}"), None)
            .await
    }

    pub async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<User, ApiError> {
        self.request_as(
            Method::PUT,
            &format!("/users/{id}"),
            Some(serde_json::to_value(patch)?),
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::DELETE, &format!("/users/{id}"), None, &[])
            .await?;
        Ok(())
    }

    // ── Products ─────────────────────────────────────────────────

    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        self.request_as(Method::GET, "/produtos", None).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        self.request_as(Method::GET, &format!("/produtos/{id}"), None)
            .await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.request_as(
            Method::POST,
            "/produtos",
            Some(serde_json::to_value(product)?),
        )
        .await
    }

    pub async fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<Product, ApiError> {
        self.request_as(
            Method::PUT,
            &format!("/produtos/{id}"),
            Some(serde_json::to_value(patch)?),
        )
        .await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::DELETE, &format!("/produtos/{id}"), None, &[])
            .await?;
        Ok(())
    }

    // ── Batches ──────────────────────────────────────────────────

    pub async fn get_batches(&self) -> Result<Vec<Batch>, ApiError> {
        self.request_as(Method::GET, "/lotes", None).await
    }

    pub async fn get_batch(&self, id: i64) -> Result<Batch, ApiError> {
        self.request_as(Method::GET, &format!("/lotes/{id}"), None)
            .await
    }

    pub async fn create_batch(&self, batch: &NewBatch) -> Result<Batch, ApiError> {
        self.request_as(Method::POST, "/lotes", Some(serde_json::to_value(batch)?))
            .await
    }

    pub async fn update_batch(&self, id: i64, patch: &BatchPatch) -> Result<Batch, ApiError> {
        self.request_as(
            Method::PUT,
            &format!("/lotes/{id}"),
            Some(serde_json::to_value(patch)?),
        )
        .await
    }

    pub async fn delete_batch(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::DELETE, &format!("/lotes/{id}"), None, &[])
            .await?;
        Ok(())
    }

    // ── Categories ───────────────────────────────────────────────

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.request_as(Method::GET, "/generos", None).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, ApiError> {
        self.request_as(Method::GET, &format!("/generos/{id}"), None)
            .await
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        self.request_as(
            Method::POST,
            "/generos",
            Some(serde_json::to_value(category)?),
        )
        .await
    }

    pub async fn update_category(
        &self,
        id: i64,
        patch: &CategoryPatch,
    ) -> Result<Category, ApiError> {
        self.request_as(
            Method::PUT,
            &format!("/generos/{id}"),
            Some(serde_json::to_value(patch)?),
        )
        .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::DELETE, &format!("/generos/{id}"), None, &[])
            .await?;
        Ok(())
    }
}

/// Transport failure that means the host could not be reached at all, as
/// opposed to an exchange that completed or died mid-body.
fn is_unreachable(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}

/// Extract the server's `detail` message from an error response. A body
/// without a `detail` field falls back to a status-derived message; an
/// unparseable body falls back to a generic one.
async fn error_detail(response: reqwest::Response, status: StatusCode) -> String {
    match response.json::<Value>().await {
        Ok(body) => body
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        Err(e) => {
            tracing::warn!("unparseable error body for HTTP {status}: {e}");
            "Unknown error".to_string()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Base URL nothing listens on; every send fails at connect time,
    /// which is exactly the transport failure the fallback policy keys on.
    const DEAD_BASE_URL: &str = "http://127.0.0.1:9";

    fn test_client(mock_fallback: bool) -> (TempDir, ApiClient) {
        let tmp = TempDir::new().unwrap();
        let token_path = tmp.path().join("token");
        let tokens = TokenStore::new(&token_path);
        let config = ClientConfig {
            base_url: DEAD_BASE_URL.into(),
            mock_fallback,
            token_path,
        };
        let client = ApiClient::new(config, tokens).unwrap();
        (tmp, client)
    }

    #[tokio::test]
    async fn unreachable_server_falls_back_to_mock_list() {
        let (_tmp, client) = test_client(true);
        let products = client.get_products().await.unwrap();
        assert_eq!(products.len(), 8);
        assert_eq!(products[0].name, "Notebook Dell");
    }

    #[tokio::test]
    async fn unreachable_server_without_mock_is_a_connectivity_error() {
        let (_tmp, client) = test_client(false);
        let err = client.get_products().await.unwrap_err();
        assert!(err.is_unreachable());
        assert!(err.to_string().contains("could not reach server"));
    }

    #[tokio::test]
    async fn created_product_gets_id_nine_and_shows_up_in_the_list() {
        let (_tmp, client) = test_client(true);

        let created = client
            .create_product(&NewProduct {
                name: "Test".into(),
                description: None,
                price: 9.99,
                quantity: 1,
                category_id: None,
                barcode: "000".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 9);

        let products = client.get_products().await.unwrap();
        assert_eq!(products.len(), 9);
        assert!(products.iter().any(|p| p.id == 9 && p.name == "Test"));
    }

    #[tokio::test]
    async fn update_then_get_reflects_the_patch() {
        let (_tmp, client) = test_client(true);

        client
            .update_product(
                1,
                &ProductPatch {
                    quantity: Some(7),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let product = client.get_product(1).await.unwrap();
        assert_eq!(product.quantity, 7);
        assert_eq!(product.name, "Notebook Dell");
    }

    #[tokio::test]
    async fn delete_then_get_finds_nothing_and_stays_idempotent() {
        let (_tmp, client) = test_client(true);

        client.delete_category(4).await.unwrap();
        let err = client.get_category(4).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { id: 4, .. }));

        // Second delete: no error, collection unchanged.
        client.delete_category(4).await.unwrap();
        assert_eq!(client.get_categories().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn batch_round_trips_through_the_mock() {
        let (_tmp, client) = test_client(true);

        let created = client
            .create_batch(&NewBatch {
                product_id: 8,
                quantity: 20,
                entry_date: "2025-04-01".into(),
                expiration_date: None,
                code: "LOTE-D-2025-04".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 4);

        let fetched = client.get_batch(4).await.unwrap();
        assert_eq!(fetched.code, "LOTE-D-2025-04");
        assert_eq!(fetched.expiration_date, None);
    }

    #[tokio::test]
    async fn mock_login_succeeds_for_allow_listed_credentials() {
        let (_tmp, client) = test_client(true);
        let auth = client
            .login(&LoginCredentials {
                email: "joao@example.com".into(),
                password: "123456".into(),
            })
            .await
            .unwrap();
        assert!(auth.access_token.starts_with("mock-token-"));
    }

    #[tokio::test]
    async fn mock_login_rejects_bad_credentials() {
        let (_tmp, client) = test_client(true);
        let err = client
            .login(&LoginCredentials {
                email: "joao@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_without_mock_surfaces_connectivity_error() {
        let (_tmp, client) = test_client(false);
        let err = client
            .login(&LoginCredentials {
                email: "joao@example.com".into(),
                password: "123456".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn register_validation_fails_before_any_request() {
        // Mock disabled and the server dead: if validation didn't
        // short-circuit, this would surface as Unreachable instead.
        let (_tmp, client) = test_client(false);
        let data = RegisterData {
            name: "Ana Lima".into(),
            email: "ana@example.com".into(),
            password: "12345".into(),
        };

        let err = client.register(&data, "12345").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn register_through_the_mock_creates_the_next_user() {
        let (_tmp, client) = test_client(true);
        let data = RegisterData {
            name: "Ana Lima".into(),
            email: "ana@example.com".into(),
            password: "123456".into(),
        };

        let user = client.register(&data, "123456").await.unwrap();
        assert_eq!(user.id, 4);
        assert_eq!(user.email, "ana@example.com");
    }

    #[tokio::test]
    async fn user_update_merges_through_the_mock() {
        let (_tmp, client) = test_client(true);

        let updated = client
            .update_user(
                2,
                &UserPatch {
                    name: Some("Maria S. Santos".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Maria S. Santos");
        assert_eq!(updated.email, "maria@example.com");
    }
}
