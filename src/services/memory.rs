//! In-memory implementation of the domain services.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use super::types::{
    AdminAnalytics, Customer, CustomerInput, DashboardStats, NewOrder, Order, OrderFilter,
    OrderStatus, Period,
};
use super::{AnalyticsService, CustomerService, OrderService, ServiceError, ServiceResult};

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Thread-safe store backing orders, customers and analytics.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    orders: Arc<DashMap<String, Order>>,
    customers: Arc<DashMap<String, Customer>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an order as-is.
    pub fn seed_order(&self, order: Order) {
        self.orders.insert(order.uuid.clone(), order);
    }

    /// Insert or replace a customer as-is.
    pub fn seed_customer(&self, customer: Customer) {
        self.customers.insert(customer.id.clone(), customer);
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    fn order_not_found(id: &str) -> ServiceError {
        ServiceError::not_found(format!("Order {} not found", id))
    }

    fn customer_not_found(id: &str) -> ServiceError {
        ServiceError::not_found(format!("Customer {} not found", id))
    }
}

#[async_trait]
impl OrderService for InMemoryStore {
    async fn list_orders(&self, filter: OrderFilter) -> ServiceResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|r| filter.status.map_or(true, |s| r.value().status == s))
            .filter(|r| {
                filter
                    .customer_id
                    .as_deref()
                    .map_or(true, |c| r.value().customer_id == c)
            })
            .map(|r| r.value().clone())
            .collect();

        orders.sort_by(|a, b| (a.created_at, &a.uuid).cmp(&(b.created_at, &b.uuid)));
        Ok(orders)
    }

    async fn create_order(&self, order: NewOrder) -> ServiceResult<Order> {
        // Hold the customer entry until the order is stored so a concurrent
        // delete cannot remove it in between. Lock order: customers, then orders.
        let _customer = self
            .customers
            .get(&order.customer_id)
            .ok_or_else(|| Self::customer_not_found(&order.customer_id))?;

        let now = now_secs();
        let created = Order {
            uuid: Uuid::new_v4().to_string(),
            customer_id: order.customer_id,
            store_id: order.store_id,
            status: OrderStatus::Pending,
            card_ids: Vec::new(),
            notes: order.notes,
            declared_value: order.declared_value,
            created_at: now,
            updated_at: now,
        };

        self.orders.insert(created.uuid.clone(), created.clone());
        tracing::debug!(order = %created.uuid, customer = %created.customer_id, "Order created");
        Ok(created)
    }

    async fn get_order(&self, id: &str) -> ServiceResult<Order> {
        self.orders
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| Self::order_not_found(id))
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> ServiceResult<Order> {
        let mut order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| Self::order_not_found(id))?;

        order.status = status;
        order.updated_at = now_secs();
        Ok(order.clone())
    }

    async fn assign_cards(&self, id: &str, card_ids: Vec<String>) -> ServiceResult<Order> {
        let mut order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| Self::order_not_found(id))?;

        if !order.status.accepts_cards() {
            return Err(ServiceError::validation(format!(
                "Order {} is {} and no longer accepts cards",
                id,
                order.status.as_str()
            )));
        }

        for card in card_ids {
            if !order.card_ids.contains(&card) {
                order.card_ids.push(card);
            }
        }
        order.updated_at = now_secs();
        Ok(order.clone())
    }
}

#[async_trait]
impl CustomerService for InMemoryStore {
    async fn list_customers(&self) -> ServiceResult<Vec<Customer>> {
        let mut customers: Vec<Customer> = self.customers.iter().map(|r| r.value().clone()).collect();
        customers.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(customers)
    }

    async fn create_customer(&self, customer: CustomerInput) -> ServiceResult<Customer> {
        let created = Customer {
            id: Uuid::new_v4().to_string(),
            name: customer.name.trim().to_string(),
            email: customer.email,
            phone: customer.phone,
            created_at: now_secs(),
        };
        self.customers.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn get_customer(&self, id: &str) -> ServiceResult<Customer> {
        self.customers
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| Self::customer_not_found(id))
    }

    async fn update_customer(&self, id: &str, customer: CustomerInput) -> ServiceResult<Customer> {
        let mut existing = self
            .customers
            .get_mut(id)
            .ok_or_else(|| Self::customer_not_found(id))?;

        existing.name = customer.name.trim().to_string();
        existing.email = customer.email;
        existing.phone = customer.phone;
        Ok(existing.clone())
    }

    async fn delete_customer(&self, id: &str) -> ServiceResult<()> {
        // The customer entry stays write-locked while its orders are counted.
        let mut open_orders = 0;
        let removed = self.customers.remove_if(id, |_, _| {
            open_orders = self
                .orders
                .iter()
                .filter(|r| r.value().customer_id == id)
                .count();
            open_orders == 0
        });

        match removed {
            Some(_) => Ok(()),
            None if open_orders > 0 => Err(ServiceError::validation(format!(
                "Customer {} still has {} order(s)",
                id, open_orders
            ))),
            None => Err(Self::customer_not_found(id)),
        }
    }
}

#[async_trait]
impl AnalyticsService for InMemoryStore {
    async fn dashboard_stats(&self) -> ServiceResult<DashboardStats> {
        let mut stats = DashboardStats {
            total_orders: 0,
            pending_orders: 0,
            in_progress_orders: 0,
            completed_orders: 0,
            total_customers: self.customers.len(),
            total_cards: 0,
        };

        for r in self.orders.iter() {
            let order = r.value();
            stats.total_orders += 1;
            stats.total_cards += order.card_ids.len();
            match order.status {
                OrderStatus::Pending => stats.pending_orders += 1,
                OrderStatus::Received | OrderStatus::Grading => stats.in_progress_orders += 1,
                OrderStatus::Completed | OrderStatus::Shipped => stats.completed_orders += 1,
            }
        }

        Ok(stats)
    }

    async fn admin_analytics(
        &self,
        period: Period,
        store_id: Option<String>,
    ) -> ServiceResult<AdminAnalytics> {
        let since = now_secs().saturating_sub(period.as_secs());

        let mut report = AdminAnalytics {
            period,
            store_id: store_id.clone(),
            orders: 0,
            cards: 0,
            completed_orders: 0,
            new_customers: 0,
            declared_value_total: 0,
        };

        for r in self.orders.iter() {
            let order = r.value();
            if order.created_at < since {
                continue;
            }
            if store_id.is_some() && order.store_id != store_id {
                continue;
            }
            report.orders += 1;
            report.cards += order.card_ids.len();
            report.declared_value_total = report
                .declared_value_total
                .saturating_add(order.declared_value.unwrap_or(0));
            if matches!(order.status, OrderStatus::Completed | OrderStatus::Shipped) {
                report.completed_orders += 1;
            }
        }

        report.new_customers = self
            .customers
            .iter()
            .filter(|r| r.value().created_at >= since)
            .count();

        Ok(report)
    }
}
