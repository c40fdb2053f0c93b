use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// The events emitted after successful mutations.
///
/// These are telemetry only: the consumer logs them and nothing downstream
/// depends on delivery. Losing one never affects a committed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Part events
    PartCreated(Uuid),
    PartUpdated(Uuid),
    PartDeleted(Uuid),
    StockAdjusted {
        part_id: Uuid,
        old_stock: i32,
        new_stock: i32,
        adjustment: i32,
    },

    // Supplier events
    SupplierCreated(Uuid),
    SupplierUpdated(Uuid),
    SupplierDeleted(Uuid),

    // Customer events
    CustomerCreated(Uuid),
    CustomerUpdated(Uuid),
    CustomerDeleted(Uuid),

    // Build events
    BuildCreated(Uuid),
    BuildUpdated(Uuid),
    BuildDeleted(Uuid),
    BomReplaced {
        build_id: Uuid,
        part_count: usize,
    },

    // Delivery events
    DeliveryCreated {
        delivery_id: Uuid,
        delivery_number: String,
    },
    DeliveryUpdated(Uuid),
    DeliveryDeleted(Uuid),

    // Invoice events
    InvoiceCreated {
        invoice_id: Uuid,
        invoice_number: String,
    },
    InvoiceUpdated(Uuid),
    InvoiceDeleted(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the channel is closed
    /// or full. Mutations never fail because telemetry lagged.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Dropping event: {}", e);
        }
    }
}

/// Consumes events from the channel and logs them until every sender is gone.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::StockAdjusted {
                part_id,
                old_stock,
                new_stock,
                adjustment,
            } => {
                info!(
                    part_id = %part_id,
                    old_stock,
                    new_stock,
                    adjustment,
                    "Stock adjusted"
                );
            }
            Event::BomReplaced {
                build_id,
                part_count,
            } => {
                info!(build_id = %build_id, part_count, "Bill of materials replaced");
            }
            Event::DeliveryCreated {
                delivery_id,
                delivery_number,
            } => {
                info!(delivery_id = %delivery_id, delivery_number = %delivery_number, "Delivery created");
            }
            Event::InvoiceCreated {
                invoice_id,
                invoice_number,
            } => {
                info!(invoice_id = %invoice_id, invoice_number = %invoice_number, "Invoice created");
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);

        let id = Uuid::new_v4();
        sender.send(Event::PartCreated(id)).await.unwrap();

        match rx.recv().await {
            Some(Event::PartCreated(received)) => assert_eq!(received, id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        // Must not panic or error out.
        sender.send_or_log(Event::PartDeleted(Uuid::new_v4())).await;
    }
}
