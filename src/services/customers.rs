use crate::{
    db::DbPool,
    entities::customer,
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
pub struct CustomerService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> Result<(Vec<customer::Model>, u64), ServiceError> {
        let mut filter = Condition::all();
        if query.active_only {
            filter = filter.add(customer::Column::IsActive.eq(true));
        }
        if let Some(customer_type) = query.customer_type.as_deref() {
            filter = filter.add(customer::Column::CustomerType.eq(customer_type));
        }

        customer::Entity::list_page(
            &*self.db,
            filter,
            query.search.as_deref(),
            query.page,
            query.per_page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        if let Some(ref email) = input.email {
            customer::Entity::ensure_value_free(
                &*self.db,
                customer::Column::Email,
                "email",
                email,
                None,
            )
            .await?;
        }

        let customer = customer::ActiveModel {
            name: Set(input.name),
            contact_person: Set(input.contact_person),
            email: Set(input.email),
            phone: Set(input.phone),
            company_name: Set(input.company_name),
            tax_id: Set(input.tax_id),
            address_line1: Set(input.address_line1),
            address_line2: Set(input.address_line2),
            city: Set(input.city),
            state: Set(input.state),
            postal_code: Set(input.postal_code),
            country: Set(input.country),
            website: Set(input.website),
            notes: Set(input.notes),
            customer_type: Set(input.customer_type),
            is_active: Set(input.is_active),
            ..Default::default()
        };

        let customer = customer.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::CustomerCreated(customer.id))
            .await;

        info!("Created customer: {}", customer.id);
        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: Uuid) -> Result<customer::Model, ServiceError> {
        customer::Entity::fetch_alive(&*self.db, customer_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        input: UpdateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        if let Some(ref email) = input.email {
            customer::Entity::ensure_value_free(
                &*self.db,
                customer::Column::Email,
                "email",
                email,
                Some(customer_id),
            )
            .await?;
        }

        let customer = customer::Entity::fetch_alive(&*self.db, customer_id).await?;
        let mut active: customer::ActiveModel = customer.into();

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
        if let Some(company_name) = input.company_name {
            active.company_name = Set(Some(company_name));
        }
        if let Some(tax_id) = input.tax_id {
            active.tax_id = Set(Some(tax_id));
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
        if let Some(customer_type) = input.customer_type {
            active.customer_type = Set(Some(customer_type));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        let customer = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::CustomerUpdated(customer.id))
            .await;

        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: Uuid) -> Result<(), ServiceError> {
        let customer = customer::Entity::fetch_alive(&*self.db, customer_id).await?;
        customer::Entity::mark_deleted(&*self.db, customer).await?;

        self.event_sender
            .send_or_log(Event::CustomerDeleted(customer_id))
            .await;

        info!("Soft-deleted customer: {}", customer_id);
        Ok(())
    }
}

/// List query for customers
#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub customer_type: Option<String>,
    pub active_only: bool,
    pub page: u64,
    pub per_page: u64,
}

/// Input for creating a customer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub customer_type: Option<String>,
    pub is_active: bool,
}

/// Input for updating a customer
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub customer_type: Option<String>,
    pub is_active: Option<bool>,
}
