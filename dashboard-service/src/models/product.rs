use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";
pub const STATUS_OUT_OF_STOCK: &str = "out_of_stock";

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub website_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    pub stock_quantity: i32,
    pub status: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        website_id: Uuid,
        name: String,
        description: Option<String>,
        price: Option<f64>,
        sku: Option<String>,
        category_id: Option<Uuid>,
        stock_quantity: i32,
        status: String,
        images: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            website_id,
            name,
            description,
            price,
            sku,
            category_id,
            stock_quantity,
            status,
            images,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update.
    pub fn apply(mut self, update: ProductUpdate) -> Self {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = Some(price);
        }
        if let Some(sku) = update.sku {
            self.sku = Some(sku);
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(stock_quantity) = update.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        self.updated_at = Utc::now();
        self
    }
}

/// Partial update for a product.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    pub stock_quantity: Option<i32>,
    pub status: Option<String>,
    pub images: Option<Vec<String>>,
}

/// API shape for a product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub website_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    pub stock_quantity: i32,
    pub status: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            website_id: p.website_id,
            name: p.name,
            description: p.description,
            price: p.price,
            sku: p.sku,
            category_id: p.category_id,
            stock_quantity: p.stock_quantity,
            status: p.status,
            images: p.images,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_maps_stock_quantity_to_camel_case() {
        let product = Product::new(
            Uuid::new_v4(),
            "Widget".into(),
            None,
            Some(9.99),
            Some("W-1".into()),
            None,
            3,
            STATUS_ACTIVE.into(),
            vec!["https://img.example/1.png".into()],
        );
        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert!(json.get("stockQuantity").is_some());
        assert!(json.get("categoryId").is_some());
        assert!(json.get("stock_quantity").is_none());
    }

    #[test]
    fn apply_keeps_unset_fields() {
        let product = Product::new(
            Uuid::new_v4(),
            "Widget".into(),
            Some("desc".into()),
            Some(9.99),
            None,
            None,
            3,
            STATUS_ACTIVE.into(),
            vec![],
        );
        let updated = product.apply(ProductUpdate {
            stock_quantity: Some(0),
            status: Some(STATUS_OUT_OF_STOCK.into()),
            ..Default::default()
        });
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.description.as_deref(), Some("desc"));
        assert_eq!(updated.stock_quantity, 0);
        assert_eq!(updated.status, STATUS_OUT_OF_STOCK);
    }
}
