/*!
 * Persistence layer for the exam content store.
 *
 * This module provides SQLite-based storage for the exam content
 * hierarchy: exams, components, question banks, bank pages, questions,
 * question options, answers and source material.
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, StoreStats};
pub use repository::Repository;
