use crate::{
    db::DbPool,
    entities::{customer, delivery, invoice, InvoiceStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    sequence,
    services::store::StoreEntity,
};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Derives tax and total from the three client-controlled amounts.
///
/// All money math runs on exact decimals; both results are rounded to cents
/// with midpoints going away from zero. The total may legitimately come out
/// negative when the discount exceeds the taxed subtotal (a credit).
pub fn compute_amounts(
    subtotal: Decimal,
    tax_rate: Decimal,
    discount_amount: Decimal,
) -> (Decimal, Decimal) {
    let tax_amount = (subtotal * tax_rate / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let total_amount = (subtotal + tax_amount - discount_amount)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    (tax_amount, total_amount)
}

#[derive(Clone)]
pub struct InvoiceService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    default_tax_rate: Decimal,
}

impl InvoiceService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>, default_tax_rate: Decimal) -> Self {
        Self {
            db,
            event_sender,
            default_tax_rate,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        query: InvoiceListQuery,
    ) -> Result<(Vec<invoice::Model>, u64), ServiceError> {
        let mut filter = Condition::all();
        if let Some(status) = query.status {
            filter = filter.add(invoice::Column::Status.eq(status));
        }
        if let Some(customer_id) = query.customer_id {
            filter = filter.add(invoice::Column::CustomerId.eq(customer_id));
        }

        invoice::Entity::list_page(
            &*self.db,
            filter,
            query.search.as_deref(),
            query.page,
            query.per_page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_invoice(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<invoice::Model, ServiceError> {
        customer::Entity::fetch_alive(&*self.db, input.customer_id).await?;
        if let Some(delivery_id) = input.delivery_id {
            delivery::Entity::fetch_alive(&*self.db, delivery_id).await?;
        }

        let invoice_number = self.next_invoice_number().await?;

        let tax_rate = input.tax_rate.unwrap_or(self.default_tax_rate);
        let (tax_amount, total_amount) =
            compute_amounts(input.subtotal, tax_rate, input.discount_amount);

        // Status always starts at draft, whatever the client sent.
        let invoice = invoice::ActiveModel {
            invoice_number: Set(invoice_number.clone()),
            customer_id: Set(input.customer_id),
            delivery_id: Set(input.delivery_id),
            invoice_date: Set(Utc::now()),
            due_date: Set(input.due_date),
            subtotal: Set(input.subtotal),
            tax_rate: Set(tax_rate),
            tax_amount: Set(tax_amount),
            discount_amount: Set(input.discount_amount),
            total_amount: Set(total_amount),
            status: Set(InvoiceStatus::Draft),
            payment_method: Set(input.payment_method),
            billing_address_line1: Set(input.billing_address_line1),
            billing_address_line2: Set(input.billing_address_line2),
            billing_city: Set(input.billing_city),
            billing_state: Set(input.billing_state),
            billing_postal_code: Set(input.billing_postal_code),
            billing_country: Set(input.billing_country),
            notes: Set(input.notes),
            terms_and_conditions: Set(input.terms_and_conditions),
            reminder_sent: Set(false),
            reminder_count: Set(0),
            ..Default::default()
        };

        // Two concurrent creations can compute the same number; the unique
        // index turns the loser into a Conflict the client retries.
        let invoice = invoice.insert(&*self.db).await.map_err(|err| {
            ServiceError::unique_violation(
                err,
                format!(
                    "Invoice with invoice number '{}' already exists",
                    invoice_number
                ),
            )
        })?;

        self.event_sender
            .send_or_log(Event::InvoiceCreated {
                invoice_id: invoice.id,
                invoice_number: invoice.invoice_number.clone(),
            })
            .await;

        info!(
            "Created invoice: {} ({}) total {}",
            invoice.id, invoice.invoice_number, invoice.total_amount
        );
        Ok(invoice)
    }

    #[instrument(skip(self))]
    pub async fn get_invoice(&self, invoice_id: Uuid) -> Result<invoice::Model, ServiceError> {
        invoice::Entity::fetch_alive(&*self.db, invoice_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_invoice(
        &self,
        invoice_id: Uuid,
        input: UpdateInvoiceInput,
    ) -> Result<invoice::Model, ServiceError> {
        let invoice = invoice::Entity::fetch_alive(&*self.db, invoice_id).await?;

        // Prospective amounts: supplied values merged over stored ones.
        let recompute = input.subtotal.is_some()
            || input.tax_rate.is_some()
            || input.discount_amount.is_some();
        let subtotal = input.subtotal.unwrap_or(invoice.subtotal);
        let tax_rate = input.tax_rate.unwrap_or(invoice.tax_rate);
        let discount_amount = input.discount_amount.unwrap_or(invoice.discount_amount);

        let mut active: invoice::ActiveModel = invoice.into();

        if let Some(customer_id) = input.customer_id {
            active.customer_id = Set(customer_id);
        }
        if let Some(delivery_id) = input.delivery_id {
            active.delivery_id = Set(Some(delivery_id));
        }
        if let Some(invoice_date) = input.invoice_date {
            active.invoice_date = Set(invoice_date);
        }
        if let Some(due_date) = input.due_date {
            active.due_date = Set(due_date);
        }
        if let Some(paid_date) = input.paid_date {
            active.paid_date = Set(Some(paid_date));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(payment_method) = input.payment_method {
            active.payment_method = Set(Some(payment_method));
        }
        if let Some(payment_reference) = input.payment_reference {
            active.payment_reference = Set(Some(payment_reference));
        }
        if let Some(billing_address_line1) = input.billing_address_line1 {
            active.billing_address_line1 = Set(Some(billing_address_line1));
        }
        if let Some(billing_address_line2) = input.billing_address_line2 {
            active.billing_address_line2 = Set(Some(billing_address_line2));
        }
        if let Some(billing_city) = input.billing_city {
            active.billing_city = Set(Some(billing_city));
        }
        if let Some(billing_state) = input.billing_state {
            active.billing_state = Set(Some(billing_state));
        }
        if let Some(billing_postal_code) = input.billing_postal_code {
            active.billing_postal_code = Set(Some(billing_postal_code));
        }
        if let Some(billing_country) = input.billing_country {
            active.billing_country = Set(Some(billing_country));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(terms_and_conditions) = input.terms_and_conditions {
            active.terms_and_conditions = Set(Some(terms_and_conditions));
        }

        if recompute {
            let (tax_amount, total_amount) = compute_amounts(subtotal, tax_rate, discount_amount);
            active.subtotal = Set(subtotal);
            active.tax_rate = Set(tax_rate);
            active.discount_amount = Set(discount_amount);
            active.tax_amount = Set(tax_amount);
            active.total_amount = Set(total_amount);
        }

        let invoice = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::InvoiceUpdated(invoice.id))
            .await;

        Ok(invoice)
    }

    #[instrument(skip(self))]
    pub async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), ServiceError> {
        let invoice = invoice::Entity::fetch_alive(&*self.db, invoice_id).await?;
        invoice::Entity::mark_deleted(&*self.db, invoice).await?;

        self.event_sender
            .send_or_log(Event::InvoiceDeleted(invoice_id))
            .await;

        info!("Soft-deleted invoice: {}", invoice_id);
        Ok(())
    }

    /// Derives the next invoice number from the most recently created row.
    /// Soft-deleted rows still count; a number is never reissued.
    async fn next_invoice_number(&self) -> Result<String, ServiceError> {
        let last = invoice::Entity::find()
            .order_by_desc(invoice::Column::CreatedAt)
            .one(&*self.db)
            .await?
            .map(|row| row.invoice_number);

        Ok(sequence::next_in_sequence(
            sequence::INVOICE_PREFIX,
            last.as_deref(),
        ))
    }
}

/// List query for invoices
#[derive(Debug, Clone, Default)]
pub struct InvoiceListQuery {
    pub search: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<Uuid>,
    pub page: u64,
    pub per_page: u64,
}

/// Input for creating an invoice. The invoice number, tax amount, total and
/// initial status are all derived, never client-supplied. A missing tax rate
/// falls back to the configured default.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateInvoiceInput {
    pub customer_id: Uuid,
    pub delivery_id: Option<Uuid>,
    pub due_date: DateTime<Utc>,
    pub subtotal: Decimal,
    pub tax_rate: Option<Decimal>,
    pub discount_amount: Decimal,
    pub payment_method: Option<String>,
    pub billing_address_line1: Option<String>,
    pub billing_address_line2: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_postal_code: Option<String>,
    pub billing_country: Option<String>,
    pub notes: Option<String>,
    pub terms_and_conditions: Option<String>,
}

/// Input for updating an invoice. Changing any of subtotal, tax_rate or
/// discount_amount recomputes tax_amount and total_amount.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateInvoiceInput {
    pub customer_id: Option<Uuid>,
    pub delivery_id: Option<Uuid>,
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    pub subtotal: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub status: Option<InvoiceStatus>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub billing_address_line1: Option<String>,
    pub billing_address_line2: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_postal_code: Option<String>,
    pub billing_country: Option<String>,
    pub notes: Option<String>,
    pub terms_and_conditions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn standard_rate_on_round_subtotal() {
        let (tax, total) = compute_amounts(dec!(100.00), dec!(19.0), dec!(0.00));
        assert_eq!(tax, dec!(19.00));
        assert_eq!(total, dec!(119.00));
    }

    #[test]
    fn tax_rounds_to_cents() {
        // 10.01 * 19% = 1.9019 -> 1.90
        let (tax, total) = compute_amounts(dec!(10.01), dec!(19.0), dec!(0.00));
        assert_eq!(tax, dec!(1.90));
        assert_eq!(total, dec!(11.91));
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 0.50 * 15% = 0.075 -> 0.08
        let (tax, _) = compute_amounts(dec!(0.50), dec!(15.0), dec!(0.00));
        assert_eq!(tax, dec!(0.08));
    }

    #[test]
    fn zero_rate_yields_zero_tax() {
        let (tax, total) = compute_amounts(dec!(42.00), dec!(0.0), dec!(0.00));
        assert_eq!(tax, dec!(0.00));
        assert_eq!(total, dec!(42.00));
    }

    #[test]
    fn discount_larger_than_total_goes_negative() {
        let (tax, total) = compute_amounts(dec!(10.00), dec!(0.0), dec!(20.00));
        assert_eq!(tax, dec!(0.00));
        assert_eq!(total, dec!(-10.00));
    }

    #[test]
    fn discount_applies_after_tax() {
        let (tax, total) = compute_amounts(dec!(200.00), dec!(19.0), dec!(38.00));
        assert_eq!(tax, dec!(38.00));
        assert_eq!(total, dec!(200.00));
    }
}
