//! Seed fixtures for the mock backend.
//!
//! Loaded once when [`super::MockBackend`] is constructed; every mock-mode
//! session starts from this same snapshot. Ids are assigned 1..N here so the
//! first record created on top of the seeds continues the sequence.

use crate::models::{Batch, Category, Product, User};

/// Email/password pairs the mock login endpoint accepts.
pub const SAMPLE_CREDENTIALS: &[(&str, &str)] = &[
    ("joao@example.com", "123456"),
    ("maria@example.com", "123456"),
    ("pedro@example.com", "123456"),
];

pub fn sample_users() -> Vec<User> {
    let user = |id, name: &str, email: &str| User {
        id,
        name: name.into(),
        email: email.into(),
    };

    vec![
        user(1, "João Silva", "joao@example.com"),
        user(2, "Maria Santos", "maria@example.com"),
        user(3, "Pedro Costa", "pedro@example.com"),
    ]
}

pub fn sample_categories() -> Vec<Category> {
    let category = |id, name: &str, description: &str| Category {
        id,
        name: name.into(),
        description: Some(description.into()),
        created_at: None,
    };

    vec![
        category(1, "Eletrônicos", "Produtos eletrônicos em geral"),
        category(2, "Alimentos", "Alimentos e bebidas"),
        category(3, "Roupas", "Vestuário e acessórios"),
        category(4, "Livros", "Livros e materiais de leitura"),
    ]
}

pub fn sample_products() -> Vec<Product> {
    let product = |id, name: &str, description: &str, price, quantity, category_id, barcode: &str| {
        Product {
            id,
            name: name.into(),
            description: Some(description.into()),
            price,
            quantity,
            category_id: Some(category_id),
            barcode: barcode.into(),
            created_at: None,
            updated_at: None,
        }
    };

    vec![
        product(1, "Notebook Dell", "Notebook Dell Inspiron 15", 1299.99, 12, 1, "123456789001"),
        product(2, "Mouse Logitech", "Mouse sem fio Logitech MX Master", 99.99, 40, 1, "123456789002"),
        product(3, "Teclado Mecânico", "Teclado mecânico RGB", 249.99, 25, 1, "123456789003"),
        product(4, "Arroz Integral 5kg", "Arroz integral tipo 1 - 5kg", 28.50, 100, 2, "987654321001"),
        product(5, "Feijão Carioca 1kg", "Feijão carioca premium - 1kg", 8.99, 200, 2, "987654321002"),
        product(6, "Camiseta Básica", "Camiseta básica 100% algodão", 39.99, 80, 3, "555666777001"),
        product(7, "Calça Jeans", "Calça jeans azul escuro", 119.99, 60, 3, "555666777002"),
        product(8, "1984 - George Orwell", "Romance distópico de George Orwell", 45.90, 35, 4, "222333444001"),
    ]
}

pub fn sample_batches() -> Vec<Batch> {
    let batch = |id, product_id, quantity, entry: &str, expiry: &str, code: &str| Batch {
        id,
        product_id,
        quantity,
        entry_date: entry.into(),
        expiration_date: Some(expiry.into()),
        code: code.into(),
        created_at: None,
    };

    vec![
        batch(1, 4, 100, "2025-01-15", "2025-06-15", "LOTE-A-2025-01"),
        batch(2, 5, 250, "2025-02-01", "2025-12-01", "LOTE-B-2025-02"),
        batch(3, 6, 75, "2025-03-10", "2026-03-10", "LOTE-C-2025-03"),
    ]
}

// ── Tests ────────────────────────────────────────────────────────
