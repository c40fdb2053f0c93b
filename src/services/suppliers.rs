use crate::{
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
    events::{Event, EventSender},
    services::store::StoreEntity,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct SupplierService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SupplierService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list_suppliers(
        &self,
        query: SupplierListQuery,
    ) -> Result<(Vec<supplier::Model>, u64), ServiceError> {
        let mut filter = Condition::all();
        if query.active_only {
            filter = filter.add(supplier::Column::IsActive.eq(true));
        }

        supplier::Entity::list_page(
            &*self.db,
            filter,
            query.search.as_deref(),
            query.page,
            query.per_page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_supplier(
        &self,
        input: CreateSupplierInput,
    ) -> Result<supplier::Model, ServiceError> {
        supplier::Entity::ensure_value_free(
            &*self.db,
            supplier::Column::Name,
            "name",
            &input.name,
            None,
        )
        .await?;

        let supplier = supplier::ActiveModel {
            name: Set(input.name),
            contact_person: Set(input.contact_person),
            email: Set(input.email),
            phone: Set(input.phone),
            address_line1: Set(input.address_line1),
            address_line2: Set(input.address_line2),
            city: Set(input.city),
            state: Set(input.state),
            postal_code: Set(input.postal_code),
            country: Set(input.country),
            website: Set(input.website),
            notes: Set(input.notes),
            rating: Set(input.rating),
            is_active: Set(input.is_active),
            ..Default::default()
        };

        let supplier = supplier.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::SupplierCreated(supplier.id))
            .await;

        info!("Created supplier: {}", supplier.id);
        Ok(supplier)
    }

    #[instrument(skip(self))]
    pub async fn get_supplier(&self, supplier_id: Uuid) -> Result<supplier::Model, ServiceError> {
        supplier::Entity::fetch_alive(&*self.db, supplier_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_supplier(
        &self,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> Result<supplier::Model, ServiceError> {
        if let Some(ref name) = input.name {
            supplier::Entity::ensure_value_free(
                &*self.db,
                supplier::Column::Name,
                "name",
                name,
                Some(supplier_id),
            )
            .await?;
        }

        let supplier = supplier::Entity::fetch_alive(&*self.db, supplier_id).await?;
        let mut active: supplier::ActiveModel = supplier.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(contact_person) = input.contact_person {
            active.contact_person = Set(Some(contact_person));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(address_line1) = input.address_line1 {
            active.address_line1 = Set(Some(address_line1));
        }
        if let Some(address_line2) = input.address_line2 {
            active.address_line2 = Set(Some(address_line2));
        }
        if let Some(city) = input.city {
            active.city = Set(Some(city));
        }
        if let Some(state) = input.state {
            active.state = Set(Some(state));
        }
        if let Some(postal_code) = input.postal_code {
            active.postal_code = Set(Some(postal_code));
        }
        if let Some(country) = input.country {
            active.country = Set(Some(country));
        }
        if let Some(website) = input.website {
            active.website = Set(Some(website));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(rating) = input.rating {
            active.rating = Set(Some(rating));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        let supplier = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::SupplierUpdated(supplier.id))
            .await;

        Ok(supplier)
    }

    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, supplier_id: Uuid) -> Result<(), ServiceError> {
        let supplier = supplier::Entity::fetch_alive(&*self.db, supplier_id).await?;
        supplier::Entity::mark_deleted(&*self.db, supplier).await?;

        self.event_sender
            .send_or_log(Event::SupplierDeleted(supplier_id))
            .await;

        info!("Soft-deleted supplier: {}", supplier_id);
        Ok(())
    }
}

/// List query for suppliers
#[derive(Debug, Clone, Default)]
pub struct SupplierListQuery {
    pub search: Option<String>,
    pub active_only: bool,
    pub page: u64,
    pub per_page: u64,
}

/// Input for creating a supplier
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
    pub is_active: bool,
}

/// Input for updating a supplier
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
    pub is_active: Option<bool>,
}
