// Database service module
// SQLite-backed key/value storage

mod connection;
mod schema;

pub use connection::Database;
