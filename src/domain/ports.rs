use std::sync::Arc;

use super::errors::DomainError;
use super::order::{NewOrder, Order};

/// Storage for orders. Implementations assign ids on `insert` and keep
/// `find_all` in insertion order.
pub trait OrderRepository: Send + Sync + 'static {
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError>;
    fn find_all(&self) -> Result<Vec<Order>, DomainError>;
    fn save(&self, order: &Order) -> Result<Order, DomainError>;
    fn delete(&self, order: &Order) -> Result<(), DomainError>;
    fn exists_by_id(&self, id: i64) -> Result<bool, DomainError>;
}

impl<R: OrderRepository + ?Sized> OrderRepository for Arc<R> {
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        (**self).insert(order)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        (**self).find_all()
    }

    fn save(&self, order: &Order) -> Result<Order, DomainError> {
        (**self).save(order)
    }

    fn delete(&self, order: &Order) -> Result<(), DomainError> {
        (**self).delete(order)
    }

    fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        (**self).exists_by_id(id)
    }
}
