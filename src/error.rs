// src/error.rs

//! Error types for cookbook operations
//!
//! Every variant is a caller-input error: a rejected operation leaves the
//! cookbook unchanged and the process keeps serving.

use crate::cookbook::Quantity;
use thiserror::Error;

/// Result type alias for cookbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while normalizing names, admitting entries, or resolving recipes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Nothing was left of the input after normalization
    #[error("'{0}' could not be parsed into a name")]
    UnparsableName(String),

    /// An entry with this name is already in the cookbook
    #[error("an entry named '{0}' already exists")]
    DuplicateName(String),

    /// The entry type is neither `ingredient` nor `recipe`
    #[error("entry '{name}' has unknown type '{kind}'")]
    UnknownKind { name: String, kind: String },

    /// A required field for the entry type was not supplied
    #[error("entry '{name}' is missing required field '{field}'")]
    MissingField { name: String, field: &'static str },

    /// A recipe lists the same required item more than once
    #[error("recipe '{recipe}' requires '{item}' more than once")]
    DuplicateRequiredItem { recipe: String, item: String },

    /// An ingredient declared a negative cook time
    #[error("ingredient '{name}' has negative cook time {cook_time}")]
    NegativeCookTime { name: String, cook_time: i64 },

    /// The requested name is absent or names an ingredient
    #[error("'{0}' is not a recipe in the cookbook")]
    NotARecipe(String),

    /// A transitively required item is not in the cookbook
    #[error("recipe '{recipe}' requires '{item}', which is not in the cookbook")]
    MissingIngredient { recipe: String, item: String },

    /// The recipe graph loops back onto a recipe already being expanded
    #[error("cyclic reference: {}", path.join(" -> "))]
    CyclicReference { path: Vec<String> },

    /// A required item carries a quantity that is not a positive finite number
    #[error("recipe '{recipe}' requires '{item}' with invalid quantity {quantity}")]
    InvalidQuantity {
        recipe: String,
        item: String,
        quantity: Quantity,
    },

    /// Accumulated quantities or cook time left the representable range
    #[error("quantities for '{0}' overflow while resolving")]
    QuantityOverflow(String),
}

impl Error {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::UnparsableName(_) => "unparsable_name",
            Error::DuplicateName(_) => "duplicate_name",
            Error::UnknownKind { .. } => "unknown_kind",
            Error::MissingField { .. } => "missing_field",
            Error::DuplicateRequiredItem { .. } => "duplicate_required_item",
            Error::NegativeCookTime { .. } => "negative_cook_time",
            Error::NotARecipe(_) => "not_a_recipe",
            Error::MissingIngredient { .. } => "missing_ingredient",
            Error::CyclicReference { .. } => "cyclic_reference",
            Error::InvalidQuantity { .. } => "invalid_quantity",
            Error::QuantityOverflow(_) => "quantity_overflow",
        }
    }
}
