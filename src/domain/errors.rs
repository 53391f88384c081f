use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidOrder(String),
    #[error("Order with id={0} not found")]
    OrderNotFound(i64),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_order(reason: impl Into<String>) -> Self {
        DomainError::InvalidOrder(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_embeds_id() {
        assert_eq!(
            DomainError::OrderNotFound(42).to_string(),
            "Order with id=42 not found"
        );
    }

    #[test]
    fn invalid_order_message_is_the_reason() {
        assert_eq!(
            DomainError::invalid_order("Cancelled Order cannot be updated").to_string(),
            "Cancelled Order cannot be updated"
        );
    }
}
