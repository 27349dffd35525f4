//! In-memory REST emulation for offline use.
//!
//! When the real backend is unreachable and mock mode is enabled, the API
//! client hands the same (method, endpoint, body) triple to this backend
//! and returns its answer instead of propagating the transport failure.
//!
//! ## Design
//! - Four `Vec`-backed collections (users, produtos, lotes, generos) behind
//!   one mutex, seeded once at construction from [`data`]'s fixtures
//! - Autoincrement ids: `max(existing) + 1`, so deleting the tail reuses ids
//! - Updates decode into the typed per-resource patch before merging, so
//!   unknown fields are rejected rather than spread into the record
//! - `PUT`/`GET` on a missing id answer an explicit not-found; `DELETE` of a
//!   missing id stays a silent no-op (idempotent)
//! - Login is special-cased against a fixed credential allow-list and never
//!   consults the mutable user collection

pub mod data;

use chrono::Utc;
use parking_lot::Mutex;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::models::{
    AuthResponse, Batch, BatchPatch, Category, CategoryPatch, NewBatch, NewCategory, NewProduct,
    Product, ProductPatch, RegisterData, User, UserPatch,
};

/// A REST collection the mock can serve: its wire behaviors hang off the
/// record type via this trait, so the route handler stays generic.
trait Resource: Clone + Serialize {
    /// Singular name used in not-found messages.
    const NAME: &'static str;
    type Create: DeserializeOwned;
    type Patch: DeserializeOwned;

    fn id(&self) -> i64;
    fn create(payload: Self::Create, id: i64, created_at: String) -> Self;
    fn patch(&mut self, patch: Self::Patch);
}

impl Resource for User {
    const NAME: &'static str = "user";
    type Create = RegisterData;
    type Patch = UserPatch;

    fn id(&self) -> i64 {
        self.id
    }

    // The password from the registration payload is checked by the real
    // backend only; the mock drops it. Read models never hold one.
    fn create(payload: RegisterData, id: i64, _created_at: String) -> Self {
        Self {
            id,
            name: payload.name,
            email: payload.email,
        }
    }

    fn patch(&mut self, patch: UserPatch) {
        self.apply(patch);
    }
}

impl Resource for Product {
    const NAME: &'static str = "produto";
    type Create = NewProduct;
    type Patch = ProductPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn create(payload: NewProduct, id: i64, created_at: String) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            quantity: payload.quantity,
            category_id: payload.category_id,
            barcode: payload.barcode,
            created_at: Some(created_at),
            updated_at: None,
        }
    }

    fn patch(&mut self, patch: ProductPatch) {
        self.apply(patch);
    }
}

impl Resource for Batch {
    const NAME: &'static str = "lote";
    type Create = NewBatch;
    type Patch = BatchPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn create(payload: NewBatch, id: i64, created_at: String) -> Self {
        Self {
            id,
            product_id: payload.product_id,
            quantity: payload.quantity,
            entry_date: payload.entry_date,
            expiration_date: payload.expiration_date,
            code: payload.code,
            created_at: Some(created_at),
        }
    }

    fn patch(&mut self, patch: BatchPatch) {
        self.apply(patch);
    }
}

impl Resource for Category {
    const NAME: &'static str = "genero";
    type Create = NewCategory;
    type Patch = CategoryPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn create(payload: NewCategory, id: i64, created_at: String) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            created_at: Some(created_at),
        }
    }

    fn patch(&mut self, patch: CategoryPatch) {
        self.apply(patch);
    }
}

// ── Backend ──────────────────────────────────────────────────────

struct MockState {
    users: Vec<User>,
    products: Vec<Product>,
    batches: Vec<Batch>,
    categories: Vec<Category>,
}

/// In-memory stand-in for the REST backend. Owned by the API client; all
/// mutation goes through [`MockBackend::handle`].
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    /// A backend seeded with the sample fixtures.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                users: data::sample_users(),
                products: data::sample_products(),
                batches: data::sample_batches(),
                categories: data::sample_categories(),
            }),
        }
    }

    /// Serve one request. `path` is the endpoint as the client composes it,
    /// e.g. `/produtos` or `/produtos/3`; `body` is the JSON payload for
    /// `POST`/`PUT`.
    pub fn handle(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let trimmed = path.trim_matches('/');
        let mut parts = trimmed.split('/');
        let collection = parts.next().unwrap_or_default();
        let item = parts.next();
        if parts.next().is_some() {
            return Err(route_miss(path));
        }

        let id = match item {
            None => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| route_miss(path))?),
        };

        let mut state = self.state.lock();
        match collection {
            "users" => crud(&mut state.users, method, id, body, path),
            "produtos" => crud(&mut state.products, method, id, body, path),
            "lotes" => crud(&mut state.batches, method, id, body, path),
            "generos" => crud(&mut state.categories, method, id, body, path),
            _ => Err(route_miss(path)),
        }
    }

    /// Login emulation: checks the submitted credentials against the fixed
    /// allow-list and mints a token embedding the current time. The mutable
    /// user collection is deliberately not consulted.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let accepted = data::SAMPLE_CREDENTIALS
            .iter()
            .any(|(known_email, known_password)| {
                *known_email == email && *known_password == password
            });

        if !accepted {
            return Err(ApiError::InvalidCredentials);
        }

        Ok(AuthResponse {
            access_token: format!("mock-token-{}", Utc::now().timestamp()),
            token_type: "bearer".into(),
        })
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// One collection's worth of REST semantics.
fn crud<R: Resource>(
    items: &mut Vec<R>,
    method: &Method,
    id: Option<i64>,
    body: Option<&Value>,
    path: &str,
) -> Result<Value, ApiError> {
    match (method.as_str(), id) {
        ("GET", None) => Ok(serde_json::to_value(&*items)?),
        ("GET", Some(id)) => {
            let record = items
                .iter()
                .find(|record| record.id() == id)
                .ok_or(ApiError::NotFound {
                    resource: R::NAME,
                    id,
                })?;
            Ok(serde_json::to_value(record)?)
        }
        ("POST", None) => {
            let payload = decode_body::<R::Create>(body)?;
            let id = items.iter().map(Resource::id).max().unwrap_or(0) + 1;
            let record = R::create(payload, id, Utc::now().to_rfc3339());
            let value = serde_json::to_value(&record)?;
            items.push(record);
            Ok(value)
        }
        ("PUT", Some(id)) => {
            let patch = decode_body::<R::Patch>(body)?;
            let record = items
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or(ApiError::NotFound {
                    resource: R::NAME,
                    id,
                })?;
            record.patch(patch);
            Ok(serde_json::to_value(&*record)?)
        }
        // Idempotent: deleting an absent id is a silent no-op.
        ("DELETE", Some(id)) => {
            items.retain(|record| record.id() != id);
            Ok(Value::Object(serde_json::Map::new()))
        }
        _ => Err(route_miss(path)),
    }
}

fn decode_body<T: DeserializeOwned>(body: Option<&Value>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::Http {
        status: 400,
        detail: "missing request body".into(),
    })?;
    Ok(serde_json::from_value(body.clone())?)
}

/// What a real server would answer for a path it does not serve.
fn route_miss(path: &str) -> ApiError {
    ApiError::Http {
        status: 404,
        detail: format!("no mock route for {path}"),
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn list_products(mock: &MockBackend) -> Vec<Product> {
        let value = mock.handle(&Method::GET, "/produtos", None).unwrap();
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn get_collection_returns_seed_snapshot_in_order() {
        let mock = MockBackend::new();
        let products = list_products(&mock);
        assert_eq!(products.len(), 8);
        assert_eq!(products[0].name, "Notebook Dell");
        assert_eq!(products[7].name, "1984 - George Orwell");
    }

    #[test]
    fn get_item_finds_by_id() {
        let mock = MockBackend::new();
        let value = mock.handle(&Method::GET, "/generos/2", None).unwrap();
        let category: Category = serde_json::from_value(value).unwrap();
        assert_eq!(category.name, "Alimentos");
    }

    #[test]
    fn get_missing_item_is_an_explicit_not_found() {
        let mock = MockBackend::new();
        let err = mock.handle(&Method::GET, "/produtos/99", None).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { id: 99, .. }));
    }

    #[test]
    fn create_assigns_the_next_id_and_appends() {
        let mock = MockBackend::new();
        let body = serde_json::json!({
            "nome": "Test", "preco": 9.99, "quantidade": 1, "barcode": "000",
        });

        let value = mock.handle(&Method::POST, "/produtos", Some(&body)).unwrap();
        let created: Product = serde_json::from_value(value).unwrap();
        assert_eq!(created.id, 9);
        assert!(created.created_at.is_some());

        let products = list_products(&mock);
        assert_eq!(products.len(), 9);
        assert_eq!(products[8].name, "Test");
    }

    #[test]
    fn creating_in_an_emptied_collection_yields_ids_from_one() {
        let mock = MockBackend::new();
        for id in 1..=4 {
            mock.handle(&Method::DELETE, &format!("/generos/{id}"), None)
                .unwrap();
        }

        for (index, name) in ["Limpeza", "Bebidas", "Papelaria"].iter().enumerate() {
            let body = serde_json::json!({ "nome": name });
            let value = mock.handle(&Method::POST, "/generos", Some(&body)).unwrap();
            let created: Category = serde_json::from_value(value).unwrap();
            assert_eq!(created.id, index as i64 + 1);
        }
    }

    #[test]
    fn put_merges_patch_and_returns_updated_record() {
        let mock = MockBackend::new();
        let body = serde_json::json!({ "preco": 1199.99 });

        let value = mock.handle(&Method::PUT, "/produtos/1", Some(&body)).unwrap();
        let updated: Product = serde_json::from_value(value).unwrap();
        assert_eq!(updated.price, 1199.99);
        assert_eq!(updated.name, "Notebook Dell");

        let products = list_products(&mock);
        assert_eq!(products[0].price, 1199.99);
    }

    #[test]
    fn put_on_missing_id_is_an_explicit_not_found() {
        let mock = MockBackend::new();
        let body = serde_json::json!({ "preco": 1.0 });
        let err = mock
            .handle(&Method::PUT, "/produtos/42", Some(&body))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: "produto", id: 42 }));
        // No record was touched.
        assert_eq!(list_products(&mock).len(), 8);
    }

    #[test]
    fn put_with_unknown_fields_is_rejected() {
        let mock = MockBackend::new();
        let body = serde_json::json!({ "preco": 1.0, "cor": "azul" });
        let err = mock
            .handle(&Method::PUT, "/produtos/1", Some(&body))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn delete_is_idempotent() {
        let mock = MockBackend::new();
        mock.handle(&Method::DELETE, "/lotes/2", None).unwrap();
        let after_first = mock.handle(&Method::GET, "/lotes", None).unwrap();
        let after_first: Vec<Batch> = serde_json::from_value(after_first).unwrap();
        assert_eq!(after_first.len(), 2);

        // Second delete of the same id: no error, no size change.
        mock.handle(&Method::DELETE, "/lotes/2", None).unwrap();
        let after_second = mock.handle(&Method::GET, "/lotes", None).unwrap();
        let after_second: Vec<Batch> = serde_json::from_value(after_second).unwrap();
        assert_eq!(after_second.len(), 2);
    }

    #[test]
    fn login_accepts_allow_listed_credentials() {
        let mock = MockBackend::new();
        let auth = mock.login("joao@example.com", "123456").unwrap();
        assert!(auth.access_token.starts_with("mock-token-"));
        assert_eq!(auth.token_type, "bearer");
    }

    #[test]
    fn login_rejects_wrong_password_with_one_message() {
        let mock = MockBackend::new();
        let err = mock.login("joao@example.com", "wrong").unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));

        let err = mock.login("nobody@example.com", "123456").unwrap_err();
        assert_eq!(err.to_string(), "invalid email or password");
    }

    #[test]
    fn login_ignores_the_mutable_user_collection() {
        let mock = MockBackend::new();
        for id in 1..=3 {
            mock.handle(&Method::DELETE, &format!("/users/{id}"), None)
                .unwrap();
        }
        assert!(mock.login("joao@example.com", "123456").is_ok());
    }

    #[test]
    fn register_creates_a_user_without_a_password() {
        let mock = MockBackend::new();
        let body = serde_json::json!({
            "nome": "Ana Lima", "email": "ana@example.com", "senha": "123456",
        });

        let value = mock.handle(&Method::POST, "/users", Some(&body)).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["nome"], "Ana Lima");
        assert!(value.get("senha").is_none());
    }

    #[test]
    fn unknown_route_answers_like_a_404() {
        let mock = MockBackend::new();
        let err = mock.handle(&Method::GET, "/vendas", None).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
    }
}
