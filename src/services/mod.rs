// Shared soft-delete aware persistence helpers
pub mod store;

// One service per resource collection
pub mod builds;
pub mod customers;
pub mod deliveries;
pub mod invoices;
pub mod parts;
pub mod suppliers;

// Service factory for dependency injection
pub mod factory;
