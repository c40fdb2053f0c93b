use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workshop API",
        version = env!("CARGO_PKG_VERSION"),
        description = r#"
# Workshop Management API

Backend for a small manufacturing business: parts inventory, suppliers,
customers, product builds with bills of materials, deliveries and invoices.

## Authentication

Every `/api/v1` endpoint requires a JWT bearer token:

```
Authorization: Bearer <your-jwt-token>
```

## Pagination

List endpoints accept `page` (default 1) and `per_page` (default 50,
max 100) and respond with `{items, total, page, per_page, total_pages}`.

## Errors

Errors share one JSON shape with appropriate HTTP status codes:

```json
{
  "error": "Conflict",
  "message": "Part with sku 'GEAR-M8-STL' already exists",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Parts", description = "Parts inventory endpoints"),
        (name = "Suppliers", description = "Supplier management endpoints"),
        (name = "Customers", description = "Customer management endpoints"),
        (name = "Builds", description = "Product build and bill of materials endpoints"),
        (name = "Deliveries", description = "Delivery tracking endpoints"),
        (name = "Invoices", description = "Invoicing endpoints")
    ),
    paths(
        // Parts
        crate::handlers::parts::list_parts,
        crate::handlers::parts::create_part,
        crate::handlers::parts::get_part,
        crate::handlers::parts::update_part,
        crate::handlers::parts::delete_part,
        crate::handlers::parts::adjust_stock,
        crate::handlers::parts::list_categories,

        // Suppliers
        crate::handlers::suppliers::list_suppliers,
        crate::handlers::suppliers::create_supplier,
        crate::handlers::suppliers::get_supplier,
        crate::handlers::suppliers::update_supplier,
        crate::handlers::suppliers::delete_supplier,

        // Customers
        crate::handlers::customers::list_customers,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,

        // Builds
        crate::handlers::builds::list_builds,
        crate::handlers::builds::create_build,
        crate::handlers::builds::get_build,
        crate::handlers::builds::update_build,
        crate::handlers::builds::delete_build,

        // Deliveries
        crate::handlers::deliveries::list_deliveries,
        crate::handlers::deliveries::create_delivery,
        crate::handlers::deliveries::get_delivery,
        crate::handlers::deliveries::update_delivery,
        crate::handlers::deliveries::delete_delivery,

        // Invoices
        crate::handlers::invoices::list_invoices,
        crate::handlers::invoices::create_invoice,
        crate::handlers::invoices::get_invoice,
        crate::handlers::invoices::update_invoice,
        crate::handlers::invoices::delete_invoice,
    ),
    components(
        schemas(
            // Part types
            crate::handlers::parts::PartResponse,
            crate::handlers::parts::CreatePartRequest,
            crate::handlers::parts::UpdatePartRequest,
            crate::handlers::parts::StockAdjustmentRequest,
            crate::entities::StockStatus,

            // Supplier types
            crate::handlers::suppliers::SupplierResponse,
            crate::handlers::suppliers::CreateSupplierRequest,
            crate::handlers::suppliers::UpdateSupplierRequest,

            // Customer types
            crate::handlers::customers::CustomerResponse,
            crate::handlers::customers::CreateCustomerRequest,
            crate::handlers::customers::UpdateCustomerRequest,

            // Build types
            crate::handlers::builds::BuildResponse,
            crate::handlers::builds::BuildPartResponse,
            crate::handlers::builds::BuildPartEntry,
            crate::handlers::builds::CreateBuildRequest,
            crate::handlers::builds::UpdateBuildRequest,
            crate::entities::BuildStatus,

            // Delivery types
            crate::handlers::deliveries::DeliveryResponse,
            crate::handlers::deliveries::CreateDeliveryRequest,
            crate::handlers::deliveries::UpdateDeliveryRequest,
            crate::entities::DeliveryStatus,

            // Invoice types
            crate::handlers::invoices::InvoiceResponse,
            crate::handlers::invoices::CreateInvoiceRequest,
            crate::handlers::invoices::UpdateInvoiceRequest,
            crate::entities::InvoiceStatus,

            // List wrappers
            crate::handlers::common::Paginated<crate::handlers::parts::PartResponse>,
            crate::handlers::common::Paginated<crate::handlers::suppliers::SupplierResponse>,
            crate::handlers::common::Paginated<crate::handlers::customers::CustomerResponse>,
            crate::handlers::common::Paginated<crate::handlers::builds::BuildResponse>,
            crate::handlers::common::Paginated<crate::handlers::deliveries::DeliveryResponse>,
            crate::handlers::common::Paginated<crate::handlers::invoices::InvoiceResponse>,

            // Error types
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_resource() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("/api/v1/parts"));
        assert!(json.contains("/api/v1/suppliers"));
        assert!(json.contains("/api/v1/customers"));
        assert!(json.contains("/api/v1/builds"));
        assert!(json.contains("/api/v1/deliveries"));
        assert!(json.contains("/api/v1/invoices"));
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("\"Bearer\""));
    }
}
