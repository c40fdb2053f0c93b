pub mod builds;
pub mod common;
pub mod customers;
pub mod deliveries;
pub mod health;
pub mod invoices;
pub mod parts;
pub mod suppliers;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;
