pub mod build;
pub mod build_part;
pub mod customer;
pub mod delivery;
pub mod invoice;
pub mod part;
pub mod supplier;

pub use build::BuildStatus;
pub use delivery::DeliveryStatus;
pub use invoice::InvoiceStatus;
pub use part::StockStatus;
