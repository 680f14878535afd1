use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Stored product document.
///
/// `price` is an integer count of minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl Product {
    /// Build a new product with a freshly generated id.
    pub fn new(input: ProductInput) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            price: input.price,
        }
    }

    /// Replace every mutable field with the input's values.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
    }

    /// Price formatted as dollars, e.g. `$5.00`.
    pub fn display_price(&self) -> String {
        let sign = if self.price < 0 { "-" } else { "" };
        let cents = self.price.unsigned_abs();
        format!("{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

/// Convert a dollar amount to cents, rounding to the nearest cent.
pub fn price_from_dollars(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Request body for create and full-replacement update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    /// Product name
    #[validate(length(min = 1))]
    #[schema(example = "Widget")]
    pub name: String,

    /// Product description
    #[validate(length(min = 1))]
    #[schema(example = "A useful widget")]
    pub description: String,

    /// Price in cents
    #[schema(example = 500)]
    pub price: i64,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    /// 24-character hex ObjectId
    #[serde(rename = "productId")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductInput {
        ProductInput {
            name: "Widget".to_string(),
            description: "A useful widget".to_string(),
            price: 500,
        }
    }

    #[test]
    fn test_response_renames_id_and_drops_nothing_else() {
        let product = Product::new(widget());
        let id = product.id;
        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();

        assert_eq!(json["productId"], id.to_hex());
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["price"], 500);
        assert!(json.get("_id").is_none());
        assert!(json.get("__v").is_none());
    }

    #[test]
    fn test_stored_document_uses_underscore_id() {
        let product = Product::new(widget());
        let doc = mongodb::bson::to_document(&product).unwrap();

        assert_eq!(doc.get_object_id("_id").unwrap(), product.id);
        assert_eq!(doc.get_i64("price").unwrap(), 500);
    }

    #[test]
    fn test_apply_replaces_all_fields() {
        let mut product = Product::new(widget());
        let id = product.id;
        product.apply(ProductInput {
            name: "Widget2".into(),
            description: "Improved".into(),
            price: 600,
        });

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Widget2");
        assert_eq!(product.description, "Improved");
        assert_eq!(product.price, 600);
    }

    #[test]
    fn test_empty_fields_fail_validation() {
        let input = ProductInput {
            name: String::new(),
            description: String::new(),
            price: 1,
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("description"));
        assert!(widget().validate().is_ok());
    }

    #[test]
    fn test_price_helpers() {
        assert_eq!(price_from_dollars(5.0), 500);
        assert_eq!(price_from_dollars(19.99), 1999);

        let mut product = Product::new(widget());
        assert_eq!(product.display_price(), "$5.00");
        product.price = 1999;
        assert_eq!(product.display_price(), "$19.99");
        product.price = -5;
        assert_eq!(product.display_price(), "-$0.05");
    }
}
