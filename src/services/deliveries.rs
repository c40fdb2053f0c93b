use crate::{
    db::DbPool,
    entities::{build, customer, delivery, DeliveryStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    sequence,
    services::store::StoreEntity,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct DeliveryService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl DeliveryService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list_deliveries(
        &self,
        query: DeliveryListQuery,
    ) -> Result<(Vec<delivery::Model>, u64), ServiceError> {
        let mut filter = Condition::all();
        if let Some(status) = query.status {
            filter = filter.add(delivery::Column::Status.eq(status));
        }
        if let Some(customer_id) = query.customer_id {
            filter = filter.add(delivery::Column::CustomerId.eq(customer_id));
        }

        delivery::Entity::list_page(
            &*self.db,
            filter,
            query.search.as_deref(),
            query.page,
            query.per_page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_delivery(
        &self,
        input: CreateDeliveryInput,
    ) -> Result<delivery::Model, ServiceError> {
        customer::Entity::fetch_alive(&*self.db, input.customer_id).await?;
        if let Some(build_id) = input.build_id {
            build::Entity::fetch_alive(&*self.db, build_id).await?;
        }

        let delivery_number = self.next_delivery_number().await?;

        let delivery = delivery::ActiveModel {
            delivery_number: Set(delivery_number.clone()),
            customer_id: Set(input.customer_id),
            build_id: Set(input.build_id),
            expected_delivery_date: Set(input.expected_delivery_date),
            shipping_address_line1: Set(input.shipping_address_line1),
            shipping_address_line2: Set(input.shipping_address_line2),
            shipping_city: Set(input.shipping_city),
            shipping_state: Set(input.shipping_state),
            shipping_postal_code: Set(input.shipping_postal_code),
            shipping_country: Set(input.shipping_country),
            tracking_number: Set(input.tracking_number),
            carrier: Set(input.carrier),
            status: Set(input.status),
            shipping_cost: Set(input.shipping_cost),
            notes: Set(input.notes),
            requires_signature: Set(input.requires_signature),
            ..Default::default()
        };

        // Two concurrent creations can compute the same number; the unique
        // index turns the loser into a Conflict the client retries.
        let delivery = delivery.insert(&*self.db).await.map_err(|err| {
            ServiceError::unique_violation(
                err,
                format!(
                    "Delivery with delivery number '{}' already exists",
                    delivery_number
                ),
            )
        })?;

        self.event_sender
            .send_or_log(Event::DeliveryCreated {
                delivery_id: delivery.id,
                delivery_number: delivery.delivery_number.clone(),
            })
            .await;

        info!(
            "Created delivery: {} ({})",
            delivery.id, delivery.delivery_number
        );
        Ok(delivery)
    }

    #[instrument(skip(self))]
    pub async fn get_delivery(&self, delivery_id: Uuid) -> Result<delivery::Model, ServiceError> {
        delivery::Entity::fetch_alive(&*self.db, delivery_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_delivery(
        &self,
        delivery_id: Uuid,
        input: UpdateDeliveryInput,
    ) -> Result<delivery::Model, ServiceError> {
        let delivery = delivery::Entity::fetch_alive(&*self.db, delivery_id).await?;
        let mut active: delivery::ActiveModel = delivery.into();

        if let Some(customer_id) = input.customer_id {
            active.customer_id = Set(customer_id);
        }
        if let Some(build_id) = input.build_id {
            active.build_id = Set(Some(build_id));
        }
        if let Some(delivery_date) = input.delivery_date {
            active.delivery_date = Set(Some(delivery_date));
        }
        if let Some(expected_delivery_date) = input.expected_delivery_date {
            active.expected_delivery_date = Set(Some(expected_delivery_date));
        }
        if let Some(shipping_address_line1) = input.shipping_address_line1 {
            active.shipping_address_line1 = Set(Some(shipping_address_line1));
        }
        if let Some(shipping_address_line2) = input.shipping_address_line2 {
            active.shipping_address_line2 = Set(Some(shipping_address_line2));
        }
        if let Some(shipping_city) = input.shipping_city {
            active.shipping_city = Set(Some(shipping_city));
        }
        if let Some(shipping_state) = input.shipping_state {
            active.shipping_state = Set(Some(shipping_state));
        }
        if let Some(shipping_postal_code) = input.shipping_postal_code {
            active.shipping_postal_code = Set(Some(shipping_postal_code));
        }
        if let Some(shipping_country) = input.shipping_country {
            active.shipping_country = Set(Some(shipping_country));
        }
        if let Some(tracking_number) = input.tracking_number {
            active.tracking_number = Set(Some(tracking_number));
        }
        if let Some(carrier) = input.carrier {
            active.carrier = Set(Some(carrier));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(shipping_cost) = input.shipping_cost {
            active.shipping_cost = Set(Some(shipping_cost));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(requires_signature) = input.requires_signature {
            active.requires_signature = Set(requires_signature);
        }
        if let Some(signed_by) = input.signed_by {
            active.signed_by = Set(Some(signed_by));
        }
        if let Some(signature_date) = input.signature_date {
            active.signature_date = Set(Some(signature_date));
        }

        let delivery = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::DeliveryUpdated(delivery.id))
            .await;

        Ok(delivery)
    }

    #[instrument(skip(self))]
    pub async fn delete_delivery(&self, delivery_id: Uuid) -> Result<(), ServiceError> {
        let delivery = delivery::Entity::fetch_alive(&*self.db, delivery_id).await?;
        delivery::Entity::mark_deleted(&*self.db, delivery).await?;

        self.event_sender
            .send_or_log(Event::DeliveryDeleted(delivery_id))
            .await;

        info!("Soft-deleted delivery: {}", delivery_id);
        Ok(())
    }

    /// Derives the next delivery number from the most recently created row.
    /// Soft-deleted rows still count; a number is never reissued.
    async fn next_delivery_number(&self) -> Result<String, ServiceError> {
        let last = delivery::Entity::find()
            .order_by_desc(delivery::Column::CreatedAt)
            .one(&*self.db)
            .await?
            .map(|row| row.delivery_number);

        Ok(sequence::next_in_sequence(
            sequence::DELIVERY_PREFIX,
            last.as_deref(),
        ))
    }
}

/// List query for deliveries
#[derive(Debug, Clone, Default)]
pub struct DeliveryListQuery {
    pub search: Option<String>,
    pub status: Option<DeliveryStatus>,
    pub customer_id: Option<Uuid>,
    pub page: u64,
    pub per_page: u64,
}

/// Input for creating a delivery. The delivery number is generated, never
/// client-supplied.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateDeliveryInput {
    pub customer_id: Uuid,
    pub build_id: Option<Uuid>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub shipping_address_line1: Option<String>,
    pub shipping_address_line2: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_postal_code: Option<String>,
    pub shipping_country: Option<String>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub status: DeliveryStatus,
    pub shipping_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub requires_signature: bool,
}

/// Input for updating a delivery
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateDeliveryInput {
    pub customer_id: Option<Uuid>,
    pub build_id: Option<Uuid>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub shipping_address_line1: Option<String>,
    pub shipping_address_line2: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_postal_code: Option<String>,
    pub shipping_country: Option<String>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub status: Option<DeliveryStatus>,
    pub shipping_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub requires_signature: Option<bool>,
    pub signed_by: Option<String>,
    pub signature_date: Option<DateTime<Utc>>,
}
