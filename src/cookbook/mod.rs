// src/cookbook/mod.rs

//! Cookbook core
//!
//! - `model`: entries (ingredients and recipes), drafts, and summaries
//! - `normalize`: free-form name cleanup
//! - `store`: the name-indexed entry store and the shared [`Cookbook`]
//! - `validate`: admission rules for new entries
//! - `resolve`: recursive expansion of a recipe into base ingredients
//!
//! # Example
//!
//! ```
//! use galley::cookbook::{Cookbook, EntryDraft, RequiredItem};
//!
//! let cookbook = Cookbook::new();
//! cookbook.admit(EntryDraft::ingredient("Bun", 10)).unwrap();
//! cookbook.admit(EntryDraft::ingredient("Patty", 20)).unwrap();
//! cookbook
//!     .admit(EntryDraft::recipe(
//!         "Burger",
//!         vec![RequiredItem::new("Bun", 2), RequiredItem::new("Patty", 1)],
//!     ))
//!     .unwrap();
//!
//! let summary = cookbook.summarize("Burger").unwrap();
//! assert_eq!(summary.cook_time.as_i64(), Some(40));
//! ```

pub mod model;
pub mod normalize;
pub mod resolve;
pub mod store;
pub mod validate;

pub use model::{
    Entry, EntryDraft, EntryKind, Ingredient, Quantity, Recipe, RequiredItem, Summary,
};
pub use normalize::normalize_name;
pub use resolve::resolve;
pub use store::{Cookbook, Entries};
pub use validate::validate;
