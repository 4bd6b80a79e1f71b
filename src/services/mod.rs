//! Domain services.
//!
//! # Data Flow
//! ```text
//! route handler (validated input)
//!     → OrderService / CustomerService / AnalyticsService
//!     → Ok(domain value) | Err(ServiceError { kind, message })
//! ```
//!
//! # Design Decisions
//! - Services own the failure classification; the HTTP layer only reads `kind`
//! - Traits are object safe so handlers hold `Arc<dyn ...>`
//! - `memory.rs` is the bundled implementation; real backends plug in here

pub mod memory;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryStore;
pub use types::{
    AdminAnalytics, Customer, CustomerInput, DashboardStats, NewOrder, Order, OrderFilter,
    OrderStatus, Period,
};

/// Failure category chosen by the service that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The addressed resource does not exist.
    NotFound,
    /// The request is well-formed but violates a business rule.
    Validation,
    /// Anything else.
    Internal,
}

impl ServiceErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceErrorKind::NotFound => "not_found",
            ServiceErrorKind::Validation => "validation",
            ServiceErrorKind::Internal => "internal",
        }
    }
}

/// Error returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Internal,
            message: message.into(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn list_orders(&self, filter: OrderFilter) -> ServiceResult<Vec<Order>>;

    async fn create_order(&self, order: NewOrder) -> ServiceResult<Order>;

    async fn get_order(&self, id: &str) -> ServiceResult<Order>;

    async fn update_status(&self, id: &str, status: OrderStatus) -> ServiceResult<Order>;

    /// Attach cards to an order. Ids already on the order are kept once.
    async fn assign_cards(&self, id: &str, card_ids: Vec<String>) -> ServiceResult<Order>;
}

#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn list_customers(&self) -> ServiceResult<Vec<Customer>>;

    async fn create_customer(&self, customer: CustomerInput) -> ServiceResult<Customer>;

    async fn get_customer(&self, id: &str) -> ServiceResult<Customer>;

    async fn update_customer(&self, id: &str, customer: CustomerInput) -> ServiceResult<Customer>;

    async fn delete_customer(&self, id: &str) -> ServiceResult<()>;
}

#[async_trait]
pub trait AnalyticsService: Send + Sync {
    async fn dashboard_stats(&self) -> ServiceResult<DashboardStats>;

    async fn admin_analytics(
        &self,
        period: Period,
        store_id: Option<String>,
    ) -> ServiceResult<AdminAnalytics>;
}
