// src/server/handlers/mod.rs
//! HTTP request handlers for the cookbook server

pub mod entries;
pub mod parse;
pub mod stats;
pub mod summary;
