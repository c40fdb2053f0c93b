use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{
    db::DbPool,
    events::EventSender,
    services::{
        builds::BuildService, customers::CustomerService, deliveries::DeliveryService,
        invoices::InvoiceService, parts::PartService, suppliers::SupplierService,
    },
};

/// Factory for creating service instances with shared dependencies
pub struct ServiceFactory {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    default_tax_rate: Decimal,
}

impl ServiceFactory {
    /// Creates a new service factory with the given dependencies
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        default_tax_rate: Decimal,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            default_tax_rate,
        }
    }

    pub fn part_service(&self) -> PartService {
        PartService::new(self.db_pool.clone(), self.event_sender.clone())
    }

    pub fn supplier_service(&self) -> SupplierService {
        SupplierService::new(self.db_pool.clone(), self.event_sender.clone())
    }

    pub fn customer_service(&self) -> CustomerService {
        CustomerService::new(self.db_pool.clone(), self.event_sender.clone())
    }

    pub fn build_service(&self) -> BuildService {
        BuildService::new(self.db_pool.clone(), self.event_sender.clone())
    }

    pub fn delivery_service(&self) -> DeliveryService {
        DeliveryService::new(self.db_pool.clone(), self.event_sender.clone())
    }

    pub fn invoice_service(&self) -> InvoiceService {
        InvoiceService::new(
            self.db_pool.clone(),
            self.event_sender.clone(),
            self.default_tax_rate,
        )
    }

    /// Gets a reference to the database pool
    pub fn db_pool(&self) -> &Arc<DbPool> {
        &self.db_pool
    }

    /// Gets a reference to the event sender
    pub fn event_sender(&self) -> &Arc<EventSender> {
        &self.event_sender
    }
}

/// Service container holding all service instances
#[derive(Clone)]
pub struct AppServices {
    pub parts: Arc<PartService>,
    pub suppliers: Arc<SupplierService>,
    pub customers: Arc<CustomerService>,
    pub builds: Arc<BuildService>,
    pub deliveries: Arc<DeliveryService>,
    pub invoices: Arc<InvoiceService>,
}

impl AppServices {
    /// Creates a new service container with all services initialized
    pub fn new(factory: &ServiceFactory) -> Self {
        Self {
            parts: Arc::new(factory.part_service()),
            suppliers: Arc::new(factory.supplier_service()),
            customers: Arc::new(factory.customer_service()),
            builds: Arc::new(factory.build_service()),
            deliveries: Arc::new(factory.delivery_service()),
            invoices: Arc::new(factory.invoice_service()),
        }
    }
}
