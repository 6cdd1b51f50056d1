// src/lib.rs

//! Galley
//!
//! An in-memory cookbook of base ingredients and composite recipes, served
//! over HTTP.
//!
//! # Architecture
//!
//! - Core: name normalization, entry admission, recipe resolution
//! - One shared [`Cookbook`] per process, passed explicitly to every handler
//! - Resolution walks the recipe graph iteratively with cycle detection
//! - HTTP transport behind the `server` feature

pub mod cookbook;
mod error;

#[cfg(feature = "server")]
pub mod server;

pub use cookbook::{
    normalize_name, Cookbook, Entries, Entry, EntryDraft, EntryKind, Ingredient, Quantity,
    Recipe, RequiredItem, Summary,
};
pub use error::{Error, Result};
