use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::OrderRepository;
use crate::schema::orders;

use super::models::{NewOrderRow, OrderChangeset, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(orders::table)
            .values(&NewOrderRow::from(order))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;

        Order::try_from(row)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .select(OrderRow::as_select())
            .order(orders::id.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    fn save(&self, order: &Order) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        // The row can vanish between the service's lookup and this write.
        let row = diesel::update(orders::table.find(order.id))
            .set(&OrderChangeset::from(order))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or(DomainError::OrderNotFound(order.id))?;

        Order::try_from(row)
    }

    fn delete(&self, order: &Order) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::delete(orders::table.find(order.id)).execute(&mut conn)?;
        Ok(())
    }

    fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let exists = diesel::select(diesel::dsl::exists(orders::table.find(id)))
            .get_result(&mut conn)?;
        Ok(exists)
    }
}
