//! Book Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Book entity (the single sellable product)
///
/// Price is stored as integer cents; [`Book::price`] exposes it as a decimal.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    /// Price in cents (always positive)
    pub price_cents: i64,
    pub is_active: bool,
    /// Units in stock (never negative)
    pub stock: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Book {
    /// Price as a decimal currency amount
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

/// Public view of the book (price endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPublic {
    pub title: String,
    pub price: Decimal,
    pub stock: i64,
    pub is_active: bool,
}

impl From<&Book> for BookPublic {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            price: book.price(),
            stock: book.stock,
            is_active: book.is_active,
        }
    }
}

/// Update price payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPriceUpdate {
    pub price: Decimal,
}

/// Update stock payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStockUpdate {
    pub stock: i64,
}
