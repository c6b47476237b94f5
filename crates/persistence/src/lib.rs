//! BuildFlow Persistence - SQLite storage for points, ledgers, and submissions

pub mod sqlite;

pub use sqlite::Database;
