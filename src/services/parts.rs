use crate::{
    db::DbPool,
    entities::part,
    errors::ServiceError,
    events::{Event, EventSender},
    services::store::StoreEntity,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Inventory part service. Stock levels only change through
/// [`adjust_stock`](PartService::adjust_stock); regular updates cannot
/// touch them.
#[derive(Clone)]
pub struct PartService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl PartService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list_parts(
        &self,
        query: PartListQuery,
    ) -> Result<(Vec<part::Model>, u64), ServiceError> {
        let mut filter = Condition::all();
        if let Some(category) = query.category.as_deref() {
            filter = filter.add(part::Column::Category.eq(category));
        }
        if query.low_stock_only {
            filter = filter.add(
                Expr::col(part::Column::CurrentStock).lt(Expr::col(part::Column::MinimumStock)),
            );
        }

        part::Entity::list_page(
            &*self.db,
            filter,
            query.search.as_deref(),
            query.page,
            query.per_page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_part(&self, input: CreatePartInput) -> Result<part::Model, ServiceError> {
        part::Entity::ensure_value_free(&*self.db, part::Column::Sku, "SKU", &input.sku, None)
            .await?;

        let part = part::ActiveModel {
            sku: Set(input.sku.clone()),
            name: Set(input.name),
            description: Set(input.description),
            category: Set(input.category),
            specifications: Set(input.specifications),
            current_stock: Set(input.current_stock),
            minimum_stock: Set(input.minimum_stock),
            unit_price: Set(input.unit_price),
            ..Default::default()
        };

        // The unique index still fires when a soft-deleted row holds the SKU
        let part = part.insert(&*self.db).await.map_err(|err| {
            ServiceError::unique_violation(
                err,
                format!("Part with SKU '{}' already exists", input.sku),
            )
        })?;

        self.event_sender
            .send_or_log(Event::PartCreated(part.id))
            .await;

        info!("Created part: {}", part.id);
        Ok(part)
    }

    #[instrument(skip(self))]
    pub async fn get_part(&self, part_id: Uuid) -> Result<part::Model, ServiceError> {
        part::Entity::fetch_alive(&*self.db, part_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_part(
        &self,
        part_id: Uuid,
        input: UpdatePartInput,
    ) -> Result<part::Model, ServiceError> {
        if let Some(ref sku) = input.sku {
            part::Entity::ensure_value_free(
                &*self.db,
                part::Column::Sku,
                "SKU",
                sku,
                Some(part_id),
            )
            .await?;
        }

        let part = part::Entity::fetch_alive(&*self.db, part_id).await?;
        let mut active: part::ActiveModel = part.into();

        let changed_sku = input.sku.clone();
        if let Some(sku) = input.sku {
            active.sku = Set(sku);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = input.category {
            active.category = Set(Some(category));
        }
        if let Some(specifications) = input.specifications {
            active.specifications = Set(Some(specifications));
        }
        if let Some(minimum_stock) = input.minimum_stock {
            active.minimum_stock = Set(minimum_stock);
        }
        if let Some(unit_price) = input.unit_price {
            active.unit_price = Set(Some(unit_price));
        }

        let part = active.update(&*self.db).await.map_err(|err| match &changed_sku {
            Some(sku) => ServiceError::unique_violation(
                err,
                format!("Part with SKU '{}' already exists", sku),
            ),
            None => ServiceError::DatabaseError(err),
        })?;

        self.event_sender
            .send_or_log(Event::PartUpdated(part.id))
            .await;

        Ok(part)
    }

    #[instrument(skip(self))]
    pub async fn delete_part(&self, part_id: Uuid) -> Result<(), ServiceError> {
        let part = part::Entity::fetch_alive(&*self.db, part_id).await?;
        part::Entity::mark_deleted(&*self.db, part).await?;

        self.event_sender
            .send_or_log(Event::PartDeleted(part_id))
            .await;

        info!("Soft-deleted part: {}", part_id);
        Ok(())
    }

    /// Applies a signed delta to current_stock, rejecting any result
    /// below zero with the stored and attempted values in the message.
    #[instrument(skip(self))]
    pub async fn adjust_stock(
        &self,
        part_id: Uuid,
        adjustment: StockAdjustmentInput,
    ) -> Result<part::Model, ServiceError> {
        let part = part::Entity::fetch_alive(&*self.db, part_id).await?;

        let old_stock = part.current_stock;
        let new_stock = old_stock + adjustment.quantity;
        if new_stock < 0 {
            return Err(ServiceError::ValidationError(format!(
                "Cannot reduce stock below 0. Current: {}, Adjustment: {}",
                old_stock, adjustment.quantity
            )));
        }

        let mut active: part::ActiveModel = part.into();
        active.current_stock = Set(new_stock);
        let part = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::StockAdjusted {
                part_id,
                old_stock,
                new_stock,
                adjustment: adjustment.quantity,
            })
            .await;

        info!(
            part_id = %part_id,
            old_stock,
            new_stock,
            reason = adjustment.reason.as_deref().unwrap_or(""),
            "Adjusted stock"
        );
        Ok(part)
    }

    /// Distinct non-null categories across live parts, ordered for a
    /// stable response.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, ServiceError> {
        let categories: Vec<String> = part::Entity::find()
            .select_only()
            .column(part::Column::Category)
            .filter(part::Column::DeletedAt.is_null())
            .filter(part::Column::Category.is_not_null())
            .distinct()
            .order_by_asc(part::Column::Category)
            .into_tuple()
            .all(&*self.db)
            .await?;

        Ok(categories)
    }
}

/// List query for parts
#[derive(Debug, Clone, Default)]
pub struct PartListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub low_stock_only: bool,
    pub page: u64,
    pub per_page: u64,
}

/// Input for creating a part
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePartInput {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub unit_price: Option<rust_decimal::Decimal>,
}

/// Input for updating a part. current_stock is absent on purpose;
/// stock moves only through the adjustment operation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdatePartInput {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub minimum_stock: Option<i32>,
    pub unit_price: Option<rust_decimal::Decimal>,
}

/// Signed stock delta with an optional free-form reason
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StockAdjustmentInput {
    pub quantity: i32,
    pub reason: Option<String>,
}
