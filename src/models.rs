//! Wire types for the inventory REST API.
//!
//! The backend speaks Portuguese field names (`nome`, `preco`, `lotes`, ...);
//! struct fields use English names and are mapped back with serde renames so
//! the wire format stays byte-compatible with the existing server.
//!
//! ## Design
//! - Create payloads (`New*` / `RegisterData`) and update payloads (`*Patch`)
//!   are separate types rather than partial copies of the records themselves.
//! - All inbound payload types carry `deny_unknown_fields`, so a stray or
//!   misspelled field is rejected at the boundary instead of silently merged.
//! - Patches are all-optional; a present field overwrites, an absent (or
//!   `null`) field leaves the record untouched.

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;

/// Minimum accepted password length at registration.
const MIN_PASSWORD_LEN: usize = 6;

// ── Users & auth ─────────────────────────────────────────────────

/// A registered user. Passwords never appear on read paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

/// Registration payload (`POST /users`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterData {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl RegisterData {
    /// Client-side registration checks, run before any request is sent:
    /// the confirmation must match and the password must be long enough.
    pub fn validate(&self, confirm_password: &str) -> Result<(), ApiError> {
        if self.password != confirm_password {
            return Err(ApiError::Validation("passwords do not match".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Partial user update (`PUT /users/{id}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "senha", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Shallow-merge a patch into this record. Password changes are accepted
    /// on the wire but dropped here. Read models never hold one.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

/// Login form input. Submitted form-encoded as `username` / `password` to
/// `/users/login`, the one endpoint that does not speak JSON.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
}

// ── Products ─────────────────────────────────────────────────────

/// A stocked product. `category_id` references a [`Category`] but the
/// reference is not enforced client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "genero_id")]
    pub category_id: Option<i64>,
    pub barcode: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Product creation payload (`POST /produtos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "genero_id", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub barcode: String,
}

/// Partial product update (`PUT /produtos/{id}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "preco", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "quantidade", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(rename = "genero_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl Product {
    /// Shallow-merge a patch into this record.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(barcode) = patch.barcode {
            self.barcode = barcode;
        }
    }
}

// ── Batches ──────────────────────────────────────────────────────

/// A stock batch (lote). `product_id` references a [`Product`]; dates travel
/// as plain `YYYY-MM-DD` strings, as the backend sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    #[serde(rename = "produto_id")]
    pub product_id: i64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "data_entrada")]
    pub entry_date: String,
    #[serde(rename = "data_validade")]
    pub expiration_date: Option<String>,
    #[serde(rename = "codigo")]
    pub code: String,
    pub created_at: Option<String>,
}

/// Batch creation payload (`POST /lotes`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewBatch {
    #[serde(rename = "produto_id")]
    pub product_id: i64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "data_entrada")]
    pub entry_date: String,
    #[serde(rename = "data_validade", default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(rename = "codigo")]
    pub code: String,
}

/// Partial batch update (`PUT /lotes/{id}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchPatch {
    #[serde(rename = "produto_id", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(rename = "quantidade", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(rename = "data_entrada", skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,
    #[serde(rename = "data_validade", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Batch {
    /// Shallow-merge a patch into this record.
    pub fn apply(&mut self, patch: BatchPatch) {
        if let Some(product_id) = patch.product_id {
            self.product_id = product_id;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(entry_date) = patch.entry_date {
            self.entry_date = entry_date;
        }
        if let Some(expiration_date) = patch.expiration_date {
            self.expiration_date = Some(expiration_date);
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
    }
}

// ── Categories ───────────────────────────────────────────────────

/// A product category (genero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    pub created_at: Option<String>,
}

/// Category creation payload (`POST /generos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCategory {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial category update (`PUT /generos/{id}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryPatch {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Shallow-merge a patch into this record.
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
