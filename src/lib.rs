/*!
 * # examstore - Exam Content Store
 *
 * A Rust library providing a SQLite-backed relational store for
 * examination content: exams, their components, question banks,
 * paginated source material, questions, answer options and correct
 * answers.
 *
 * ## Features
 *
 * - Strict content tree rooted at exams, with cascade deletes at every
 *   level: removing a record removes its whole subtree
 * - Caller-supplied identifiers (UUID strings by convention)
 * - Store-wide unique question bank codes
 * - Opaque structured fields (metadata, correct answers) stored and
 *   returned verbatim as JSON
 * - Async repository API safe to call from a tokio runtime
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite persistence:
 *   - `database::schema`: Table definitions and migrations
 *   - `database::connection`: Connection management and async access
 *   - `database::models`: Entity records
 *   - `database::repository`: The data-access contract
 * - `errors`: Error taxonomy surfaced to callers
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::models::{
    AnswerRecord, BankPageRecord, ComponentRecord, ExamRecord, MaterialRecord,
    QuestionBankRecord, QuestionOptionRecord, QuestionRecord,
};
pub use database::{DatabaseConnection, Repository, StoreStats};
pub use errors::{StoreError, StoreResult};
