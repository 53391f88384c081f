use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of an order. `Cancelled` is terminal for updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Created,
    Approved,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Approved => "Approved",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(OrderStatus::Created),
            "Approved" => Ok(OrderStatus::Approved),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub amount: BigDecimal,
    pub status: OrderStatus,
}

/// An order that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub amount: BigDecimal,
    pub status: OrderStatus,
}

/// Input to `OrderService::create_order`. Fields are optional so that the
/// service can reject missing values itself.
#[derive(Debug, Clone, Default)]
pub struct CreateOrder {
    pub user_id: Option<i64>,
    pub amount: Option<BigDecimal>,
}

/// Partial update: only the fields that are `Some` overwrite the order.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub user_id: Option<i64>,
    pub amount: Option<BigDecimal>,
    pub status: Option<OrderStatus>,
}

impl Order {
    /// Merge `patch` into this order field by field. The id never changes.
    pub fn apply(&mut self, patch: OrderPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
