use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait};
use uuid::Uuid;

use crate::entities::{build, customer, delivery, invoice, part, supplier};
use crate::errors::ServiceError;

/// Capability set shared by every soft-deletable resource: a stable
/// identity column, a deletion marker, searchable text columns and a
/// default list ordering. The provided methods implement the one
/// List/Get/ensure-unique/soft-delete repertoire all services share,
/// so each service only declares its columns here instead of
/// re-implementing the same queries.
///
/// All reads filter on `deleted_at IS NULL`; a soft-deleted row is
/// invisible to every provided method.
#[async_trait]
pub trait StoreEntity: EntityTrait
where
    Self::Model: IntoActiveModel<Self::ActiveModel>,
    Self::ActiveModel: ActiveModelBehavior + Send,
{
    /// Singular display name used in error messages.
    const RESOURCE: &'static str;
    const ID_COLUMN: Self::Column;
    const DELETED_AT_COLUMN: Self::Column;

    /// Columns matched by the case-insensitive substring search, OR-combined.
    fn search_columns() -> Vec<Self::Column>;

    /// Stable ordering applied to list queries.
    fn default_order() -> (Self::Column, Order);

    fn alive() -> Condition {
        Condition::all().add(Self::DELETED_AT_COLUMN.is_null())
    }

    /// OR-of-columns `LOWER(col) LIKE '%term%'` condition. LOWER keeps
    /// the semantics identical across Postgres and SQLite.
    fn search_condition(term: &str) -> Condition {
        let pattern = format!("%{}%", term.to_lowercase());
        let mut condition = Condition::any();
        for column in Self::search_columns() {
            condition = condition.add(Expr::expr(Func::lower(Expr::col(column))).like(&pattern));
        }
        condition
    }

    async fn find_alive<C>(db: &C, id: Uuid) -> Result<Option<Self::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        let model = Self::find()
            .filter(Self::alive())
            .filter(Self::ID_COLUMN.eq(id))
            .one(db)
            .await?;
        Ok(model)
    }

    /// Like [`find_alive`](Self::find_alive) but absent or soft-deleted
    /// rows become a NotFound naming the resource and id.
    async fn fetch_alive<C>(db: &C, id: Uuid) -> Result<Self::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        Self::find_alive(db, id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("{} with ID {} not found", Self::RESOURCE, id))
        })
    }

    /// One-shot paginated list: counts the rows matching the filter and
    /// optional search, then fetches the requested page in default order.
    async fn list_page<C>(
        db: &C,
        filter: Condition,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Self::Model>, u64), ServiceError>
    where
        C: ConnectionTrait,
    {
        let mut condition = Condition::all().add(Self::alive()).add(filter);
        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            condition = condition.add(Self::search_condition(term));
        }

        let query = Self::find().filter(condition);
        let total = query.clone().count(db).await?;

        let (column, direction) = Self::default_order();
        let items = query
            .order_by(column, direction)
            .offset(page.saturating_sub(1).saturating_mul(per_page))
            .limit(per_page)
            .all(db)
            .await?;

        Ok((items, total))
    }

    /// Rejects with Conflict when `value` is already held in `column` by
    /// a live row other than `exclude_id`. Soft-deleted rows do not
    /// reserve their values.
    async fn ensure_value_free<C>(
        db: &C,
        column: Self::Column,
        field: &str,
        value: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let mut query = Self::find().filter(Self::alive()).filter(column.eq(value));
        if let Some(id) = exclude_id {
            query = query.filter(Self::ID_COLUMN.ne(id));
        }

        if query.one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "{} with {} '{}' already exists",
                Self::RESOURCE,
                field,
                value
            )));
        }

        Ok(())
    }

    /// Stamps deleted_at on the row. The row stays in place and keeps
    /// its foreign-key references; it simply stops matching reads.
    async fn mark_deleted<C>(db: &C, model: Self::Model) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let mut active = model.into_active_model();
        active.set(Self::DELETED_AT_COLUMN, Utc::now().into());
        active.update(db).await?;
        Ok(())
    }
}

impl StoreEntity for part::Entity {
    const RESOURCE: &'static str = "Part";
    const ID_COLUMN: part::Column = part::Column::Id;
    const DELETED_AT_COLUMN: part::Column = part::Column::DeletedAt;

    fn search_columns() -> Vec<part::Column> {
        vec![
            part::Column::Sku,
            part::Column::Name,
            part::Column::Description,
        ]
    }

    fn default_order() -> (part::Column, Order) {
        (part::Column::Name, Order::Asc)
    }
}

impl StoreEntity for supplier::Entity {
    const RESOURCE: &'static str = "Supplier";
    const ID_COLUMN: supplier::Column = supplier::Column::Id;
    const DELETED_AT_COLUMN: supplier::Column = supplier::Column::DeletedAt;

    fn search_columns() -> Vec<supplier::Column> {
        vec![
            supplier::Column::Name,
            supplier::Column::Email,
            supplier::Column::ContactPerson,
        ]
    }

    fn default_order() -> (supplier::Column, Order) {
        (supplier::Column::Name, Order::Asc)
    }
}

impl StoreEntity for customer::Entity {
    const RESOURCE: &'static str = "Customer";
    const ID_COLUMN: customer::Column = customer::Column::Id;
    const DELETED_AT_COLUMN: customer::Column = customer::Column::DeletedAt;

    fn search_columns() -> Vec<customer::Column> {
        vec![
            customer::Column::Name,
            customer::Column::Email,
            customer::Column::CompanyName,
            customer::Column::ContactPerson,
        ]
    }

    fn default_order() -> (customer::Column, Order) {
        (customer::Column::Name, Order::Asc)
    }
}

impl StoreEntity for build::Entity {
    const RESOURCE: &'static str = "Build";
    const ID_COLUMN: build::Column = build::Column::Id;
    const DELETED_AT_COLUMN: build::Column = build::Column::DeletedAt;

    fn search_columns() -> Vec<build::Column> {
        vec![build::Column::Name, build::Column::ModelNumber]
    }

    fn default_order() -> (build::Column, Order) {
        (build::Column::Name, Order::Asc)
    }
}

impl StoreEntity for delivery::Entity {
    const RESOURCE: &'static str = "Delivery";
    const ID_COLUMN: delivery::Column = delivery::Column::Id;
    const DELETED_AT_COLUMN: delivery::Column = delivery::Column::DeletedAt;

    fn search_columns() -> Vec<delivery::Column> {
        vec![
            delivery::Column::DeliveryNumber,
            delivery::Column::TrackingNumber,
        ]
    }

    fn default_order() -> (delivery::Column, Order) {
        (delivery::Column::CreatedAt, Order::Desc)
    }
}

impl StoreEntity for invoice::Entity {
    const RESOURCE: &'static str = "Invoice";
    const ID_COLUMN: invoice::Column = invoice::Column::Id;
    const DELETED_AT_COLUMN: invoice::Column = invoice::Column::DeletedAt;

    fn search_columns() -> Vec<invoice::Column> {
        vec![invoice::Column::InvoiceNumber]
    }

    fn default_order() -> (invoice::Column, Order) {
        (invoice::Column::CreatedAt, Order::Desc)
    }
}
