/// Identifier a product is known by across the shop services.
pub type ProductId = u32;

/// Display metadata for a product, as served by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
        }
    }
}
