use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Inventory part. Stock is only mutated through the adjustment
/// operation, never by direct update.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub sku: String,
    pub name: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub category: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub specifications: Option<Json>,
    pub current_stock: i32,
    pub minimum_stock: i32,
    #[sea_orm(nullable)]
    pub unit_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.minimum_stock
    }

    pub fn stock_status(&self) -> StockStatus {
        if self.current_stock == 0 {
            StockStatus::OutOfStock
        } else if self.current_stock < self.minimum_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::build_part::Entity")]
    BuildParts,
}

impl Related<super::build_part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BuildParts.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = self.id {
                self.id = ActiveValue::Set(Uuid::new_v4());
            }

            if let ActiveValue::NotSet = self.created_at {
                self.created_at = ActiveValue::Set(now);
            }
        }

        self.updated_at = ActiveValue::Set(now);

        Ok(self)
    }
}

/// Derived stock classification, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn part(current: i32, minimum: i32) -> Model {
        Model {
            id: Uuid::new_v4(),
            sku: "SKU-1".into(),
            name: "Bracket".into(),
            description: None,
            category: None,
            specifications: None,
            current_stock: current,
            minimum_stock: minimum,
            unit_price: Some(dec!(2.50)),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn stock_status_out_of_stock_when_zero() {
        assert_eq!(part(0, 5).stock_status(), StockStatus::OutOfStock);
        // zero minimum still reports out_of_stock at zero on hand
        assert_eq!(part(0, 0).stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn stock_status_low_when_below_minimum() {
        let p = part(3, 5);
        assert!(p.is_low_stock());
        assert_eq!(p.stock_status(), StockStatus::LowStock);
    }

    #[test]
    fn stock_status_in_stock_at_or_above_minimum() {
        assert_eq!(part(5, 5).stock_status(), StockStatus::InStock);
        assert_eq!(part(9, 5).stock_status(), StockStatus::InStock);
        assert!(!part(5, 5).is_low_stock());
    }

    #[test]
    fn stock_status_serializes_snake_case() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
    }
}
