//! Process-local order store.
//!
//! Useful for development and tests where no database is available. Ids are
//! handed out from a counter starting at 1, and the map is ordered by id so
//! `find_all` returns orders in insertion order.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::OrderRepository;

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    orders: BTreeMap<i64, Order>,
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    state: RwLock<State>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, DomainError> {
        self.state
            .read()
            .map_err(|_| DomainError::Internal("order store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, DomainError> {
        self.state
            .write()
            .map_err(|_| DomainError::Internal("order store lock poisoned".to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut state = self.write()?;
        state.last_id += 1;
        let order = Order {
            id: state.last_id,
            user_id: order.user_id,
            amount: order.amount,
            status: order.status,
        };
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.read()?.orders.values().cloned().collect())
    }

    fn save(&self, order: &Order) -> Result<Order, DomainError> {
        let mut state = self.write()?;
        let slot = state
            .orders
            .get_mut(&order.id)
            .ok_or(DomainError::OrderNotFound(order.id))?;
        *slot = order.clone();
        Ok(order.clone())
    }

    fn delete(&self, order: &Order) -> Result<(), DomainError> {
        self.write()?.orders.remove(&order.id);
        Ok(())
    }

    fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.read()?.orders.contains_key(&id))
    }
}
