use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_parts_table::Migration),
            Box::new(m20240101_000002_create_suppliers_table::Migration),
            Box::new(m20240101_000003_create_customers_table::Migration),
            Box::new(m20240101_000004_create_builds_table::Migration),
            Box::new(m20240101_000005_create_build_parts_table::Migration),
            Box::new(m20240101_000006_create_deliveries_table::Migration),
            Box::new(m20240101_000007_create_invoices_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_parts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_parts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create parts table aligned with entities::part Model
            manager
                .create_table(
                    Table::create()
                        .table(Parts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Parts::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Parts::Sku)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Parts::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Parts::Description).text().null())
                        .col(ColumnDef::new(Parts::Category).string_len(100).null())
                        .col(ColumnDef::new(Parts::Specifications).json().null())
                        .col(
                            ColumnDef::new(Parts::CurrentStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Parts::MinimumStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Parts::UnitPrice).decimal_len(10, 2).null())
                        .col(
                            ColumnDef::new(Parts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Parts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Parts::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Useful indexes
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_parts_name")
                        .table(Parts::Table)
                        .col(Parts::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_parts_category")
                        .table(Parts::Table)
                        .col(Parts::Category)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Parts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Parts {
        Table,
        Id,
        Sku,
        Name,
        Description,
        Category,
        Specifications,
        CurrentStock,
        MinimumStock,
        UnitPrice,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20240101_000002_create_suppliers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_suppliers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create suppliers table aligned with entities::supplier Model.
            // Name uniqueness is enforced in the service against live rows
            // only, so there is deliberately no unique constraint here.
            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Suppliers::ContactPerson)
                                .string_len(255)
                                .null(),
                        )
                        .col(ColumnDef::new(Suppliers::Email).string_len(255).null())
                        .col(ColumnDef::new(Suppliers::Phone).string_len(50).null())
                        .col(
                            ColumnDef::new(Suppliers::AddressLine1)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::AddressLine2)
                                .string_len(255)
                                .null(),
                        )
                        .col(ColumnDef::new(Suppliers::City).string_len(100).null())
                        .col(ColumnDef::new(Suppliers::State).string_len(100).null())
                        .col(
                            ColumnDef::new(Suppliers::PostalCode)
                                .string_len(20)
                                .null(),
                        )
                        .col(ColumnDef::new(Suppliers::Country).string_len(100).null())
                        .col(ColumnDef::new(Suppliers::Website).string_len(255).null())
                        .col(ColumnDef::new(Suppliers::Notes).text().null())
                        .col(ColumnDef::new(Suppliers::Rating).integer().null())
                        .col(
                            ColumnDef::new(Suppliers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Suppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_suppliers_name")
                        .table(Suppliers::Table)
                        .col(Suppliers::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Suppliers {
        Table,
        Id,
        Name,
        ContactPerson,
        Email,
        Phone,
        AddressLine1,
        AddressLine2,
        City,
        State,
        PostalCode,
        Country,
        Website,
        Notes,
        Rating,
        IsActive,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20240101_000003_create_customers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create customers table aligned with entities::customer Model.
            // Email uniqueness is a live-rows-only service check, same as
            // supplier names.
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Name).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Customers::ContactPerson)
                                .string_len(255)
                                .null(),
                        )
                        .col(ColumnDef::new(Customers::Email).string_len(255).null())
                        .col(ColumnDef::new(Customers::Phone).string_len(50).null())
                        .col(
                            ColumnDef::new(Customers::CompanyName)
                                .string_len(255)
                                .null(),
                        )
                        .col(ColumnDef::new(Customers::TaxId).string_len(50).null())
                        .col(
                            ColumnDef::new(Customers::AddressLine1)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Customers::AddressLine2)
                                .string_len(255)
                                .null(),
                        )
                        .col(ColumnDef::new(Customers::City).string_len(100).null())
                        .col(ColumnDef::new(Customers::State).string_len(100).null())
                        .col(
                            ColumnDef::new(Customers::PostalCode)
                                .string_len(20)
                                .null(),
                        )
                        .col(ColumnDef::new(Customers::Country).string_len(100).null())
                        .col(ColumnDef::new(Customers::Website).string_len(255).null())
                        .col(ColumnDef::new(Customers::Notes).text().null())
                        .col(
                            ColumnDef::new(Customers::CustomerType)
                                .string_len(50)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Customers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_customers_name")
                        .table(Customers::Table)
                        .col(Customers::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_customers_email")
                        .table(Customers::Table)
                        .col(Customers::Email)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Name,
        ContactPerson,
        Email,
        Phone,
        CompanyName,
        TaxId,
        AddressLine1,
        AddressLine2,
        City,
        State,
        PostalCode,
        Country,
        Website,
        Notes,
        CustomerType,
        IsActive,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20240101_000004_create_builds_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_builds_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create builds table aligned with entities::build Model
            manager
                .create_table(
                    Table::create()
                        .table(Builds::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Builds::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Builds::Name).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Builds::ModelNumber)
                                .string_len(100)
                                .null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Builds::Description).text().null())
                        .col(ColumnDef::new(Builds::BasePrice).decimal_len(10, 2).null())
                        .col(
                            ColumnDef::new(Builds::Status)
                                .string_len(50)
                                .not_null()
                                .default("draft"),
                        )
                        .col(
                            ColumnDef::new(Builds::BuildTimeHours)
                                .decimal_len(10, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(Builds::Notes).text().null())
                        .col(
                            ColumnDef::new(Builds::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Builds::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Builds::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Builds::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_builds_name")
                        .table(Builds::Table)
                        .col(Builds::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_builds_status")
                        .table(Builds::Table)
                        .col(Builds::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Builds::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Builds {
        Table,
        Id,
        Name,
        ModelNumber,
        Description,
        BasePrice,
        Status,
        BuildTimeHours,
        Notes,
        IsActive,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20240101_000005_create_build_parts_table {

    use super::m20240101_000001_create_parts_table::Parts;
    use super::m20240101_000004_create_builds_table::Builds;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_build_parts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create build_parts junction aligned with entities::build_part Model
            manager
                .create_table(
                    Table::create()
                        .table(BuildParts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BuildParts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BuildParts::BuildId).uuid().not_null())
                        .col(ColumnDef::new(BuildParts::PartId).uuid().not_null())
                        .col(
                            ColumnDef::new(BuildParts::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(BuildParts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_build_parts_build_id")
                                .from(BuildParts::Table, BuildParts::BuildId)
                                .to(Builds::Table, Builds::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_build_parts_part_id")
                                .from(BuildParts::Table, BuildParts::PartId)
                                .to(Parts::Table, Parts::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_build_parts_build_id")
                        .table(BuildParts::Table)
                        .col(BuildParts::BuildId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_build_parts_part_id")
                        .table(BuildParts::Table)
                        .col(BuildParts::PartId)
                        .to_owned(),
                )
                .await?;

            // One association row per (build, part) pair
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_build_parts_build_part")
                        .table(BuildParts::Table)
                        .col(BuildParts::BuildId)
                        .col(BuildParts::PartId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BuildParts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum BuildParts {
        Table,
        Id,
        BuildId,
        PartId,
        Quantity,
        CreatedAt,
    }
}

mod m20240101_000006_create_deliveries_table {

    use super::m20240101_000003_create_customers_table::Customers;
    use super::m20240101_000004_create_builds_table::Builds;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_deliveries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create deliveries table aligned with entities::delivery Model.
            // The unique delivery_number constraint doubles as the backstop
            // for the numbering race.
            manager
                .create_table(
                    Table::create()
                        .table(Deliveries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Deliveries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::DeliveryNumber)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Deliveries::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Deliveries::BuildId).uuid().null())
                        .col(
                            ColumnDef::new(Deliveries::DeliveryDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ExpectedDeliveryDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ShippingAddressLine1)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ShippingAddressLine2)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ShippingCity)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ShippingState)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ShippingPostalCode)
                                .string_len(20)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ShippingCountry)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::TrackingNumber)
                                .string_len(255)
                                .null(),
                        )
                        .col(ColumnDef::new(Deliveries::Carrier).string_len(100).null())
                        .col(
                            ColumnDef::new(Deliveries::Status)
                                .string_len(50)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(Deliveries::ShippingCost)
                                .decimal_len(10, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(Deliveries::Notes).text().null())
                        .col(
                            ColumnDef::new(Deliveries::RequiresSignature)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Deliveries::SignedBy)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::SignatureDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Deliveries::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_deliveries_customer_id")
                                .from(Deliveries::Table, Deliveries::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_deliveries_build_id")
                                .from(Deliveries::Table, Deliveries::BuildId)
                                .to(Builds::Table, Builds::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_deliveries_customer_id")
                        .table(Deliveries::Table)
                        .col(Deliveries::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_deliveries_status")
                        .table(Deliveries::Table)
                        .col(Deliveries::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_deliveries_created_at")
                        .table(Deliveries::Table)
                        .col(Deliveries::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Deliveries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Deliveries {
        Table,
        Id,
        DeliveryNumber,
        CustomerId,
        BuildId,
        DeliveryDate,
        ExpectedDeliveryDate,
        ShippingAddressLine1,
        ShippingAddressLine2,
        ShippingCity,
        ShippingState,
        ShippingPostalCode,
        ShippingCountry,
        TrackingNumber,
        Carrier,
        Status,
        ShippingCost,
        Notes,
        RequiresSignature,
        SignedBy,
        SignatureDate,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20240101_000007_create_invoices_table {

    use super::m20240101_000003_create_customers_table::Customers;
    use super::m20240101_000006_create_deliveries_table::Deliveries;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_invoices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create invoices table aligned with entities::invoice Model
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Invoices::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::InvoiceNumber)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Invoices::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::DeliveryId).uuid().null())
                        .col(
                            ColumnDef::new(Invoices::InvoiceDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::DueDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::PaidDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::Subtotal)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::TaxRate)
                                .decimal_len(5, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::TaxAmount)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::DiscountAmount)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::TotalAmount)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::Status)
                                .string_len(50)
                                .not_null()
                                .default("draft"),
                        )
                        .col(
                            ColumnDef::new(Invoices::PaymentMethod)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::PaymentReference)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::BillingAddressLine1)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::BillingAddressLine2)
                                .string_len(255)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::BillingCity)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::BillingState)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::BillingPostalCode)
                                .string_len(20)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::BillingCountry)
                                .string_len(100)
                                .null(),
                        )
                        .col(ColumnDef::new(Invoices::Notes).text().null())
                        .col(ColumnDef::new(Invoices::TermsAndConditions).text().null())
                        .col(
                            ColumnDef::new(Invoices::ReminderSent)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Invoices::ReminderCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::LastReminderDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_invoices_customer_id")
                                .from(Invoices::Table, Invoices::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_invoices_delivery_id")
                                .from(Invoices::Table, Invoices::DeliveryId)
                                .to(Deliveries::Table, Deliveries::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_customer_id")
                        .table(Invoices::Table)
                        .col(Invoices::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_status")
                        .table(Invoices::Table)
                        .col(Invoices::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_created_at")
                        .table(Invoices::Table)
                        .col(Invoices::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Invoices {
        Table,
        Id,
        InvoiceNumber,
        CustomerId,
        DeliveryId,
        InvoiceDate,
        DueDate,
        PaidDate,
        Subtotal,
        TaxRate,
        TaxAmount,
        DiscountAmount,
        TotalAmount,
        Status,
        PaymentMethod,
        PaymentReference,
        BillingAddressLine1,
        BillingAddressLine2,
        BillingCity,
        BillingState,
        BillingPostalCode,
        BillingCountry,
        Notes,
        TermsAndConditions,
        ReminderSent,
        ReminderCount,
        LastReminderDate,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}
