use crate::domain::errors::DomainError;
use crate::domain::order::{CreateOrder, NewOrder, Order, OrderPatch, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::domain::validation::{validate_create, validate_transition, validate_update_amount};

/// Business-rule authority for orders. All reads and writes go through the
/// repository handed to [`OrderService::new`].
pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Any status on the request is ignored; new orders always start as `Created`.
    pub fn create_order(&self, input: CreateOrder) -> Result<Order, DomainError> {
        let (user_id, amount) = validate_create(input.user_id, input.amount)?;

        log::info!(
            "Create order request received for user_id={}, amount={}",
            user_id,
            amount
        );
        let order = self.repo.insert(NewOrder {
            user_id,
            amount,
            status: OrderStatus::Created,
        })?;
        log::info!("Order created with id={} for user_id={}", order.id, order.user_id);
        Ok(order)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Order, DomainError> {
        log::debug!("Fetching order with id={}", id);
        self.require(id)
    }

    pub fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        log::debug!("Fetching all orders");
        let orders = self.repo.find_all()?;
        log::info!("Fetched {} orders", orders.len());
        Ok(orders)
    }

    /// The amount is checked before the lookup, so a bad amount is rejected
    /// even for an id that does not exist.
    pub fn update_order(&self, id: i64, patch: OrderPatch) -> Result<Order, DomainError> {
        log::info!("Updating order with id={}", id);
        if let Err(e) = validate_update_amount(patch.amount.as_ref()) {
            log::warn!("Rejected update of order id={}: {}", id, e);
            return Err(e);
        }

        let mut order = self.require(id)?;
        log::debug!("Existing order id={} has status={}", id, order.status);
        if let Err(e) = validate_transition(order.status) {
            log::warn!("Rejected update of cancelled order id={}", id);
            return Err(e);
        }

        order.apply(patch);
        let saved = self.repo.save(&order)?;
        log::info!("Order id={} updated, status={}", saved.id, saved.status);
        Ok(saved)
    }

    pub fn delete_by_id(&self, id: i64) -> Result<String, DomainError> {
        log::info!("Deleting order with id={}", id);
        let order = self.require(id)?;
        self.repo.delete(&order)?;
        log::info!("Order id={} deleted", id);
        Ok(format!("Order deleted successfully with orderId={}", id))
    }

    fn require(&self, id: i64) -> Result<Order, DomainError> {
        self.repo.find_by_id(id)?.ok_or_else(|| {
            log::warn!("Order with id={} not found", id);
            DomainError::OrderNotFound(id)
        })
    }
}
