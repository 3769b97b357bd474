use crate::domain::ProductCreate;

/// Image used when a vendor leaves the image field blank.
pub const DEFAULT_PRODUCT_IMAGE: &str = "https://images.example.com/products/placeholder.jpg";

/// Category used when a vendor leaves the category field blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// Raw text fields of the vendor "add product" form.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub stock: String,
}

impl ProductForm {
    /// Converts the form into creation params owned by `vendor_id`.
    ///
    /// Unparsable numbers become zero; blank image and category get defaults.
    pub fn into_create(self, vendor_id: impl Into<String>) -> ProductCreate {
        ProductCreate {
            name: self.name,
            description: self.description,
            price: parse_price(&self.price),
            image: non_blank_or(self.image, DEFAULT_PRODUCT_IMAGE),
            category: non_blank_or(self.category, DEFAULT_CATEGORY),
            stock: parse_stock(&self.stock),
            vendor_id: Some(vendor_id.into()),
        }
    }
}

fn parse_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|price| price.is_finite()).unwrap_or(0.0)
}

/// Whole units only; a fractional entry is truncated, a negative one is zero.
fn parse_stock(raw: &str) -> u32 {
    let raw = raw.trim();
    let whole = raw.split('.').next().unwrap_or(raw);
    whole.parse::<u32>().unwrap_or(0)
}

fn non_blank_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() { fallback.to_string() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parses_numbers() {
        let form = ProductForm {
            name: "Mug".into(),
            price: " 12.50 ".into(),
            stock: "7".into(),
            category: "Kitchen".into(),
            image: "mug.jpg".into(),
            ..Default::default()
        };
        let create = form.into_create("3");
        assert_eq!(create.price, 12.5);
        assert_eq!(create.stock, 7);
        assert_eq!(create.category, "Kitchen");
        assert_eq!(create.vendor_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_form_falls_back_on_bad_input() {
        let form = ProductForm {
            name: "Mystery".into(),
            price: "free".into(),
            stock: "-4".into(),
            ..Default::default()
        };
        let create = form.into_create("3");
        assert_eq!(create.price, 0.0);
        assert_eq!(create.stock, 0);
        assert_eq!(create.category, DEFAULT_CATEGORY);
        assert_eq!(create.image, DEFAULT_PRODUCT_IMAGE);
    }

    #[test]
    fn test_stock_truncates_fractions() {
        assert_eq!(parse_stock("12.9"), 12);
        assert_eq!(parse_stock(""), 0);
        assert_eq!(parse_price("inf"), 0.0);
    }
}
