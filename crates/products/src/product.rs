use serde::{Deserialize, Serialize};

use orderdesk_core::{AggregateId, DomainError, DomainResult};

const MIN_NAME_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 10;
const MIN_PRICE: f64 = 0.01;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Catalog section. Legacy labels are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "Hamburguesas")]
    Burgers,
    #[serde(alias = "Bebidas")]
    Drinks,
    #[serde(alias = "Acompañamientos")]
    Sides,
}

/// Input for adding a product to the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: Category,
}

/// Partial replacement of a product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Catalog entry. Names are unique across the catalog (enforced by the store).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: f64,
    category: Category,
}

impl Product {
    pub fn create(id: ProductId, input: NewProduct) -> DomainResult<Self> {
        let product = Self {
            id,
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            category: input.category,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Apply a partial update; the product is left untouched when the result
    /// would be invalid.
    pub fn apply_changes(&mut self, changes: ProductChanges) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(name) = changes.name {
            next.name = name.trim().to_string();
        }
        if let Some(description) = changes.description {
            next.description = Some(description);
        }
        if let Some(price) = changes.price {
            next.price = price;
        }
        if let Some(category) = changes.category {
            next.category = category;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.chars().count() < MIN_NAME_LEN {
            return Err(DomainError::validation("name must be at least 3 characters long"));
        }
        if let Some(description) = &self.description {
            if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
                return Err(DomainError::validation(
                    "description must be at least 10 characters long",
                ));
            }
        }
        if !self.price.is_finite() || self.price < MIN_PRICE {
            return Err(DomainError::validation("price must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn burger() -> NewProduct {
        NewProduct {
            name: "Classic Burger".to_string(),
            description: Some("Beef patty, cheddar, pickles".to_string()),
            price: 8.5,
            category: Category::Burgers,
        }
    }

    fn product_id() -> ProductId {
        ProductId::new(AggregateId::new())
    }

    #[test]
    fn create_trims_name() {
        let mut input = burger();
        input.name = "  Cola  ".to_string();
        let product = Product::create(product_id(), input).unwrap();
        assert_eq!(product.name(), "Cola");
    }

    #[test]
    fn create_rejects_short_fields() {
        let mut input = burger();
        input.name = "ab".to_string();
        assert!(Product::create(product_id(), input).is_err());

        let mut input = burger();
        input.description = Some("short".to_string());
        assert!(Product::create(product_id(), input).is_err());

        let mut input = burger();
        input.description = None;
        assert!(Product::create(product_id(), input).is_ok());
    }

    #[test]
    fn invalid_changes_leave_product_untouched() {
        let mut product = Product::create(product_id(), burger()).unwrap();
        let before = product.clone();

        let err = product
            .apply_changes(ProductChanges {
                price: Some(0.0),
                name: Some("Double Burger".to_string()),
                ..ProductChanges::default()
            })
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(product, before);
    }

    #[test]
    fn accepts_legacy_category_labels() {
        let input: NewProduct = serde_json::from_value(json!({
            "name": "Fries",
            "price": 3.0,
            "category": "Acompañamientos"
        }))
        .unwrap();
        assert_eq!(input.category, Category::Sides);

        let product = Product::create(product_id(), input).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["category"], json!("sides"));
        assert_eq!(value["description"], json!(null));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_value::<ProductChanges>(json!({ "stock": 3 }));
        assert!(result.is_err());
    }

    proptest! {
        /// Property: any price below one cent is rejected.
        #[test]
        fn sub_cent_prices_are_rejected(price in -1000.0f64..0.01) {
            let mut input = burger();
            input.price = price;
            prop_assert!(Product::create(product_id(), input).is_err());
        }
    }
}
