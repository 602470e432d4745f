//! Cart line items and the inputs that create them.

use serde::{Deserialize, Serialize};
use tote_core::{Price, ProductId};

use crate::catalog::Product;

/// One product and its quantity in the cart.
///
/// `title`, `price` and `image` are copies taken when the line was created,
/// so the cart can be displayed without the catalog. `quantity` is at least
/// 1 for every line held by a [`CartState`](super::CartState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Catalog record the line was added from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Box<Product>>,
    /// Snapshots written without a quantity load as a single unit.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CartLineItem {
    /// Whether this line represents `id`, either directly or through the
    /// embedded catalog record.
    #[must_use]
    pub fn is_for(&self, id: ProductId) -> bool {
        self.id == id || self.product.as_ref().is_some_and(|p| p.id == id)
    }
}

/// What to add to the cart.
///
/// Callers either name a product by id (optionally with display fields), or
/// hand over the full catalog record. Both resolve to one [`ProductId`]
/// before the cart is searched.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemRef {
    /// A flat reference.
    ById {
        id: ProductId,
        title: Option<String>,
        price: Option<Price>,
        image: Option<String>,
    },
    /// A catalog record; display fields are taken from it.
    ByProduct(Box<Product>),
}

impl ItemRef {
    /// A flat reference with no display fields.
    #[must_use]
    pub const fn id(id: ProductId) -> Self {
        Self::ById {
            id,
            title: None,
            price: None,
            image: None,
        }
    }

    /// A reference to a catalog record.
    #[must_use]
    pub fn product(product: Product) -> Self {
        Self::ByProduct(Box::new(product))
    }

    /// Set the display title of a flat reference. No effect on a product
    /// reference.
    #[must_use]
    pub fn with_title(mut self, value: impl Into<String>) -> Self {
        if let Self::ById { title, .. } = &mut self {
            *title = Some(value.into());
        }
        self
    }

    /// Set the unit price of a flat reference. No effect on a product
    /// reference.
    #[must_use]
    pub fn with_price(mut self, value: Price) -> Self {
        if let Self::ById { price, .. } = &mut self {
            *price = Some(value);
        }
        self
    }

    /// Set the image of a flat reference. No effect on a product reference.
    #[must_use]
    pub fn with_image(mut self, value: impl Into<String>) -> Self {
        if let Self::ById { image, .. } = &mut self {
            *image = Some(value.into());
        }
        self
    }

    /// The canonical id this reference resolves to.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        match self {
            Self::ById { id, .. } => *id,
            Self::ByProduct(product) => product.id,
        }
    }

    /// Build a new cart line for this reference.
    #[must_use]
    pub fn into_line(self, quantity: u32) -> CartLineItem {
        match self {
            Self::ById {
                id,
                title,
                price,
                image,
            } => CartLineItem {
                id,
                title,
                price,
                image,
                product: None,
                quantity,
            },
            Self::ByProduct(product) => CartLineItem {
                id: product.id,
                title: Some(product.title.clone()).filter(|t| !t.is_empty()),
                price: product.price,
                image: product.primary_image().map(str::to_owned),
                product: Some(product),
                quantity,
            },
        }
    }
}

impl From<ProductId> for ItemRef {
    fn from(id: ProductId) -> Self {
        Self::id(id)
    }
}

impl From<Product> for ItemRef {
    fn from(product: Product) -> Self {
        Self::product(product)
    }
}

/// A cart state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Merge `quantity` units of `item` into the cart.
    Add { item: ItemRef, quantity: u32 },
    /// Drop the line for a product.
    Remove(ProductId),
    /// Set a line's quantity; zero or below removes the line.
    UpdateQuantity { id: ProductId, quantity: i64 },
    /// Raise a line's quantity by one.
    Increment(ProductId),
    /// Lower a line's quantity by one, removing it at zero.
    Decrement(ProductId),
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Add one unit of `item`.
    #[must_use]
    pub fn add(item: impl Into<ItemRef>) -> Self {
        Self::Add {
            item: item.into(),
            quantity: 1,
        }
    }

    /// Add `quantity` units of `item`.
    #[must_use]
    pub fn add_many(item: impl Into<ItemRef>, quantity: u32) -> Self {
        Self::Add {
            item: item.into(),
            quantity,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove(_) => "remove",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
            Self::Clear => "clear",
        }
    }
}
