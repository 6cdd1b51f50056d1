// src/cookbook/model.rs

//! Cookbook data model
//!
//! Entries are a closed sum over ingredients and recipes. The JSON shape
//! matches the HTTP surface: an internally tagged object whose `type` field
//! is `"ingredient"` or `"recipe"`, with camelCase field names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of an [`Entry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Ingredient,
    Recipe,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Ingredient => "ingredient",
            EntryKind::Recipe => "recipe",
        }
    }

    /// Parse a wire type tag. Matching is exact: `"Recipe"` is not a kind.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "ingredient" => Some(EntryKind::Ingredient),
            "recipe" => Some(EntryKind::Recipe),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of a JSON number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Amount {
    Whole(i64),
    Fractional(f64),
}

/// An amount of an item, or a total cook time
///
/// Accepts any JSON number. Values with no fractional part that fit in an
/// `i64` are kept as integers, so `2.0` and `2` are the same quantity and
/// both serialize as `2`. Integer arithmetic is exact and checked; once a
/// fractional value is involved the result is a float that must stay finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Amount", into = "Amount")]
pub struct Quantity(Amount);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Amount::Whole(0));

    /// Strictly greater than zero and finite
    pub fn is_positive(&self) -> bool {
        match self.0 {
            Amount::Whole(n) => n > 0,
            Amount::Fractional(f) => f.is_finite() && f > 0.0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.0 {
            Amount::Whole(n) => n as f64,
            Amount::Fractional(f) => f,
        }
    }

    /// The value as an integer, if it has no fractional part
    pub fn as_i64(&self) -> Option<i64> {
        match self.0 {
            Amount::Whole(n) => Some(n),
            Amount::Fractional(_) => None,
        }
    }

    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        match (self.0, rhs.0) {
            (Amount::Whole(a), Amount::Whole(b)) => a.checked_add(b).map(Quantity::from),
            _ => Quantity::finite(self.as_f64() + rhs.as_f64()),
        }
    }

    pub fn checked_mul(self, rhs: Quantity) -> Option<Quantity> {
        match (self.0, rhs.0) {
            (Amount::Whole(a), Amount::Whole(b)) => a.checked_mul(b).map(Quantity::from),
            _ => Quantity::finite(self.as_f64() * rhs.as_f64()),
        }
    }

    fn finite(value: f64) -> Option<Quantity> {
        value.is_finite().then(|| Quantity::from(value))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ZERO
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Quantity(Amount::Whole(n))
    }
}

impl From<f64> for Quantity {
    fn from(f: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, which is out of range
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Quantity(Amount::Whole(f as i64))
        } else {
            Quantity(Amount::Fractional(f))
        }
    }
}

impl From<Amount> for Quantity {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Whole(n) => Quantity::from(n),
            Amount::Fractional(f) => Quantity::from(f),
        }
    }
}

impl From<Quantity> for Amount {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Amount::Whole(n) => write!(f, "{n}"),
            Amount::Fractional(x) => write!(f, "{x}"),
        }
    }
}

/// A reference from a recipe to another entry, or an output line of a [`Summary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub name: String,
    pub quantity: Quantity,
}

impl RequiredItem {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self::with_quantity(name, Quantity::from(quantity))
    }

    pub fn with_quantity(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A base ingredient with a fixed per-unit cook time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub cook_time: u64,
}

impl Ingredient {
    /// Cook time of one unit, as a quantity
    pub fn unit_cook_time(&self) -> Quantity {
        match i64::try_from(self.cook_time) {
            Ok(n) => Quantity::from(n),
            Err(_) => Quantity::from(self.cook_time as f64),
        }
    }
}

/// A composite entry built from other entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub required_items: Vec<RequiredItem>,
}

/// A validated cookbook entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

impl Entry {
    pub fn ingredient(name: impl Into<String>, cook_time: u64) -> Self {
        Entry::Ingredient(Ingredient {
            name: name.into(),
            cook_time,
        })
    }

    pub fn recipe(name: impl Into<String>, required_items: Vec<RequiredItem>) -> Self {
        Entry::Recipe(Recipe {
            name: name.into(),
            required_items,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Ingredient(ingredient) => &ingredient.name,
            Entry::Recipe(recipe) => &recipe.name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Ingredient(_) => EntryKind::Ingredient,
            Entry::Recipe(_) => EntryKind::Recipe,
        }
    }

    pub fn as_recipe(&self) -> Option<&Recipe> {
        match self {
            Entry::Recipe(recipe) => Some(recipe),
            Entry::Ingredient(_) => None,
        }
    }
}

/// An entry as submitted by a client, before validation
///
/// Every field that depends on the type tag is optional here so that
/// admission can report which rule the candidate breaks instead of failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_items: Option<Vec<RequiredItem>>,
}

impl EntryDraft {
    pub fn ingredient(name: impl Into<String>, cook_time: i64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Ingredient.as_str().to_string(),
            cook_time: Some(cook_time),
            required_items: None,
        }
    }

    pub fn recipe(name: impl Into<String>, required_items: Vec<RequiredItem>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Recipe.as_str().to_string(),
            cook_time: None,
            required_items: Some(required_items),
        }
    }
}

/// Flattened view of a recipe: base ingredients only, with total cook time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub name: String,
    pub cook_time: Quantity,
    pub ingredients: Vec<RequiredItem>,
}
