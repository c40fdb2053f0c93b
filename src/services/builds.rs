use crate::{
    db::DbPool,
    entities::{build, build_part, part, BuildStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    services::store::StoreEntity,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Builds and their bills of materials.
///
/// A build's parts list is replaced wholesale: every write validates the full
/// set, deletes the existing association rows and inserts the new ones inside
/// one transaction, so a part vanishing mid-operation leaves nothing behind.
#[derive(Clone)]
pub struct BuildService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl BuildService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list_builds(
        &self,
        query: BuildListQuery,
    ) -> Result<(Vec<build::Model>, u64), ServiceError> {
        let mut filter = Condition::all();
        if query.active_only {
            filter = filter.add(build::Column::IsActive.eq(true));
        }
        if let Some(status) = query.status {
            filter = filter.add(build::Column::Status.eq(status));
        }

        build::Entity::list_page(
            &*self.db,
            filter,
            query.search.as_deref(),
            query.page,
            query.per_page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_build(
        &self,
        input: CreateBuildInput,
    ) -> Result<build::Model, ServiceError> {
        if let Some(ref model_number) = input.model_number {
            build::Entity::ensure_value_free(
                &*self.db,
                build::Column::ModelNumber,
                "model number",
                model_number,
                None,
            )
            .await?;
        }
        validate_bom_entries(&input.parts)?;

        let model_number = input.model_number.clone();
        let part_count = input.parts.len();

        let txn = self.db.begin().await?;

        for entry in &input.parts {
            part::Entity::fetch_alive(&txn, entry.part_id).await?;
        }

        let build = build::ActiveModel {
            name: Set(input.name),
            model_number: Set(input.model_number),
            description: Set(input.description),
            base_price: Set(input.base_price),
            status: Set(input.status),
            build_time_hours: Set(input.build_time_hours),
            notes: Set(input.notes),
            is_active: Set(input.is_active),
            ..Default::default()
        };

        // The unique index still fires when a soft-deleted row holds the
        // model number.
        let build = build.insert(&txn).await.map_err(|err| match &model_number {
            Some(value) => ServiceError::unique_violation(
                err,
                format!("Build with model number '{}' already exists", value),
            ),
            None => ServiceError::DatabaseError(err),
        })?;

        insert_bom_rows(&txn, build.id, &input.parts).await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::BuildCreated(build.id))
            .await;

        info!("Created build: {} with {} parts", build.id, part_count);
        Ok(build)
    }

    #[instrument(skip(self))]
    pub async fn get_build(&self, build_id: Uuid) -> Result<build::Model, ServiceError> {
        build::Entity::fetch_alive(&*self.db, build_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_build(
        &self,
        build_id: Uuid,
        input: UpdateBuildInput,
    ) -> Result<build::Model, ServiceError> {
        if let Some(ref model_number) = input.model_number {
            build::Entity::ensure_value_free(
                &*self.db,
                build::Column::ModelNumber,
                "model number",
                model_number,
                Some(build_id),
            )
            .await?;
        }
        if let Some(ref entries) = input.parts {
            validate_bom_entries(entries)?;
        }

        let changed_model_number = input.model_number.clone();

        let txn = self.db.begin().await?;

        let build = build::Entity::fetch_alive(&txn, build_id).await?;
        let mut active: build::ActiveModel = build.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(model_number) = input.model_number {
            active.model_number = Set(Some(model_number));
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(base_price) = input.base_price {
            active.base_price = Set(Some(base_price));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(build_time_hours) = input.build_time_hours {
            active.build_time_hours = Set(Some(build_time_hours));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        let build = active
            .update(&txn)
            .await
            .map_err(|err| match &changed_model_number {
                Some(value) => ServiceError::unique_violation(
                    err,
                    format!("Build with model number '{}' already exists", value),
                ),
                None => ServiceError::DatabaseError(err),
            })?;

        let mut replaced = None;
        if let Some(entries) = input.parts {
            for entry in &entries {
                part::Entity::fetch_alive(&txn, entry.part_id).await?;
            }

            build_part::Entity::delete_many()
                .filter(build_part::Column::BuildId.eq(build_id))
                .exec(&txn)
                .await?;

            insert_bom_rows(&txn, build_id, &entries).await?;
            replaced = Some(entries.len());
        }

        txn.commit().await?;

        if let Some(part_count) = replaced {
            self.event_sender
                .send_or_log(Event::BomReplaced {
                    build_id,
                    part_count,
                })
                .await;
        }
        self.event_sender
            .send_or_log(Event::BuildUpdated(build.id))
            .await;

        Ok(build)
    }

    #[instrument(skip(self))]
    pub async fn delete_build(&self, build_id: Uuid) -> Result<(), ServiceError> {
        let build = build::Entity::fetch_alive(&*self.db, build_id).await?;
        build::Entity::mark_deleted(&*self.db, build).await?;

        self.event_sender
            .send_or_log(Event::BuildDeleted(build_id))
            .await;

        info!("Soft-deleted build: {}", build_id);
        Ok(())
    }

    /// Returns the build's BOM joined with each part's current name and SKU.
    /// A row whose part row no longer exists at all is skipped.
    #[instrument(skip(self))]
    pub async fn list_build_parts(&self, build_id: Uuid) -> Result<Vec<BomLine>, ServiceError> {
        let rows = build_part::Entity::find()
            .filter(build_part::Column::BuildId.eq(build_id))
            .find_also_related(part::Entity)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(row, part)| {
                part.map(|part| BomLine {
                    part_id: row.part_id,
                    quantity: row.quantity,
                    part_name: part.name,
                    part_sku: part.sku,
                })
            })
            .collect())
    }
}

fn validate_bom_entries(entries: &[BomEntry]) -> Result<(), ServiceError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.quantity < 1 {
            return Err(ServiceError::ValidationError(format!(
                "Quantity for part {} must be at least 1",
                entry.part_id
            )));
        }
        if !seen.insert(entry.part_id) {
            return Err(ServiceError::ValidationError(format!(
                "Part {} appears more than once in the parts list",
                entry.part_id
            )));
        }
    }
    Ok(())
}

async fn insert_bom_rows<C>(
    db: &C,
    build_id: Uuid,
    entries: &[BomEntry],
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    if entries.is_empty() {
        return Ok(());
    }

    let now = chrono::Utc::now();
    let rows: Vec<build_part::ActiveModel> = entries
        .iter()
        .map(|entry| build_part::ActiveModel {
            id: Set(Uuid::new_v4()),
            build_id: Set(build_id),
            part_id: Set(entry.part_id),
            quantity: Set(entry.quantity),
            created_at: Set(now),
        })
        .collect();

    build_part::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// One BOM row joined with the part's current name and SKU.
#[derive(Debug, Clone, Serialize)]
pub struct BomLine {
    pub part_id: Uuid,
    pub quantity: i32,
    pub part_name: String,
    pub part_sku: String,
}

/// List query for builds
#[derive(Debug, Clone, Default)]
pub struct BuildListQuery {
    pub search: Option<String>,
    pub status: Option<BuildStatus>,
    pub active_only: bool,
    pub page: u64,
    pub per_page: u64,
}

/// One (part, quantity) entry in a build's parts list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BomEntry {
    pub part_id: Uuid,
    pub quantity: i32,
}

/// Input for creating a build
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateBuildInput {
    pub name: String,
    pub model_number: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub status: BuildStatus,
    pub build_time_hours: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub parts: Vec<BomEntry>,
}

/// Input for updating a build. A `parts` value replaces the whole BOM.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateBuildInput {
    pub name: Option<String>,
    pub model_number: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub status: Option<BuildStatus>,
    pub build_time_hours: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
    pub parts: Option<Vec<BomEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(part_id: Uuid, quantity: i32) -> BomEntry {
        BomEntry { part_id, quantity }
    }

    #[test]
    fn bom_entries_accept_distinct_parts() {
        let entries = vec![entry(Uuid::new_v4(), 3), entry(Uuid::new_v4(), 1)];
        assert!(validate_bom_entries(&entries).is_ok());
    }

    #[test]
    fn empty_bom_is_valid() {
        assert!(validate_bom_entries(&[]).is_ok());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let id = Uuid::new_v4();
        let err = validate_bom_entries(&[entry(id, 0)]).unwrap_err();
        match err {
            ServiceError::ValidationError(msg) => {
                assert!(msg.contains(&id.to_string()));
                assert!(msg.contains("at least 1"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn duplicate_part_is_rejected() {
        let id = Uuid::new_v4();
        let err = validate_bom_entries(&[entry(id, 2), entry(id, 4)]).unwrap_err();
        match err {
            ServiceError::ValidationError(msg) => {
                assert!(msg.contains("more than once"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
