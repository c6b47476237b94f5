//! SQLite database management

mod achievements;
mod config;
mod connection;
mod employees;
mod points;
mod submissions;
mod transactions;

pub use connection::Database;

pub use achievements::*;
pub use config::*;
pub use employees::*;
pub use points::*;
pub use submissions::*;
pub use transactions::*;
