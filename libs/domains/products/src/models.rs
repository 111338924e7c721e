use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};

/// Product entity
///
/// Built by [`Product::new`] or rebuilt from storage by
/// [`Product::reconstitute`]; afterwards it only changes through the
/// validating `update_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: String,
    /// Owning user's id (not checked against the users store)
    user_id: String,
    name: String,
    /// Price in cents
    price: i64,
    stock: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input for creating a product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProduct {
    /// Caller-chosen id; generated when absent or empty
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub price: i64,
    pub stock: i32,
}

/// Partial update for a product
///
/// `None` leaves the field untouched; `Some` sets it and is validated, so
/// `Some(0)` stock is a legal explicit zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
}

impl Product {
    /// Create a new product
    ///
    /// Checks owner, name, price and stock in that order and reports the
    /// first violation.
    pub fn new(input: CreateProduct) -> ProductResult<Self> {
        validate_user_id(&input.user_id)?;
        validate_name(&input.name)?;
        validate_price(input.price)?;
        validate_stock(input.stock)?;

        let id = match input.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::now_v7().to_string(),
        };
        let now = Utc::now();

        Ok(Self {
            id,
            user_id: input.user_id,
            name: input.name,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a product from trusted storage without validation
    pub fn reconstitute(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        stock: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            price,
            stock,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn update_name(&mut self, name: impl Into<String>) -> ProductResult<()> {
        let name = name.into();
        validate_name(&name)?;

        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn update_price(&mut self, price: i64) -> ProductResult<()> {
        validate_price(price)?;

        self.price = price;
        self.touch();
        Ok(())
    }

    pub fn update_stock(&mut self, stock: i32) -> ProductResult<()> {
        validate_stock(stock)?;

        self.stock = stock;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }

    pub(crate) fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }
}

/// Current time, or 1µs past `previous` when the clock has not moved beyond it
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

fn validate_user_id(user_id: &str) -> ProductResult<()> {
    if user_id.is_empty() {
        return Err(ProductError::Validation(
            "user_id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> ProductResult<()> {
    if name.is_empty() {
        return Err(ProductError::Validation("name cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_price(price: i64) -> ProductResult<()> {
    if price <= 0 {
        return Err(ProductError::Validation(
            "price must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

fn validate_stock(stock: i32) -> ProductResult<()> {
    if stock < 0 {
        return Err(ProductError::Validation(
            "stock cannot be negative".to_string(),
        ));
    }
    Ok(())
}
