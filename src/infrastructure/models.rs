use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::schema::orders;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub amount: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub user_id: i64,
    pub amount: BigDecimal,
    pub status: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChangeset {
    pub user_id: i64,
    pub amount: BigDecimal,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

impl From<NewOrder> for NewOrderRow {
    fn from(o: NewOrder) -> Self {
        Self {
            user_id: o.user_id,
            amount: o.amount,
            status: o.status.to_string(),
        }
    }
}

impl From<&Order> for OrderChangeset {
    fn from(o: &Order) -> Self {
        Self {
            user_id: o.user_id,
            amount: o.amount.clone(),
            status: o.status.to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|e: String| {
            DomainError::Internal(format!("order {} has a corrupt status: {}", row.id, e))
        })?;
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            status,
        })
    }
}
