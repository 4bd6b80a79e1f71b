//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use grading_api::config::{ApiConfig, DeploymentMode};
use grading_api::lifecycle::Shutdown;
use grading_api::services::{
    AdminAnalytics, AnalyticsService, Customer, CustomerInput, CustomerService, DashboardStats,
    NewOrder, Order, OrderFilter, OrderService, OrderStatus, Period, ServiceError, ServiceResult,
};
use grading_api::{AppState, HttpServer};
use grading_sdk::GradingClient;

pub const TEST_KEY: &str = "integration-secret";

pub fn test_config(mode: DeploymentMode) -> ApiConfig {
    let mut config = ApiConfig::default();
    config.environment = mode;
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.auth.api_key = Some(TEST_KEY.to_string());
    config
}

/// A running server bound to an ephemeral port. Shuts down on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> GradingClient {
        GradingClient::new(&self.base_url(), Some(TEST_KEY))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_server(config: ApiConfig, state: AppState) -> TestServer {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, state);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Wait until the listener answers.
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if client.get(format!("http://{}/health", addr)).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    TestServer { addr, shutdown }
}

/// Services that count invocations and answer with a fixed outcome.
pub struct ScriptedServices {
    calls: AtomicUsize,
    failure: Option<ServiceError>,
}

impl ScriptedServices {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failure: None,
        })
    }

    pub fn failing(err: ServiceError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failure: Some(err),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn state(self: &Arc<Self>, mode: DeploymentMode) -> AppState {
        AppState::new(mode, self.clone(), self.clone(), self.clone())
    }

    fn outcome<T>(&self, value: T) -> ServiceResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(value),
        }
    }
}

fn order(id: &str, card_ids: Vec<String>) -> Order {
    Order {
        uuid: id.to_string(),
        customer_id: "cust-1".to_string(),
        store_id: None,
        status: OrderStatus::Pending,
        card_ids,
        notes: None,
        declared_value: None,
        created_at: 1,
        updated_at: 1,
    }
}

fn customer(id: &str, input: CustomerInput) -> Customer {
    Customer {
        id: id.to_string(),
        name: input.name,
        email: input.email,
        phone: input.phone,
        created_at: 1,
    }
}

#[async_trait]
impl OrderService for ScriptedServices {
    async fn list_orders(&self, _filter: OrderFilter) -> ServiceResult<Vec<Order>> {
        self.outcome(Vec::new())
    }

    async fn create_order(&self, new: NewOrder) -> ServiceResult<Order> {
        let mut created = order("new-order", Vec::new());
        created.customer_id = new.customer_id;
        self.outcome(created)
    }

    async fn get_order(&self, id: &str) -> ServiceResult<Order> {
        self.outcome(order(id, Vec::new()))
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> ServiceResult<Order> {
        let mut updated = order(id, Vec::new());
        updated.status = status;
        self.outcome(updated)
    }

    async fn assign_cards(&self, id: &str, card_ids: Vec<String>) -> ServiceResult<Order> {
        self.outcome(order(id, card_ids))
    }
}

#[async_trait]
impl CustomerService for ScriptedServices {
    async fn list_customers(&self) -> ServiceResult<Vec<Customer>> {
        self.outcome(Vec::new())
    }

    async fn create_customer(&self, input: CustomerInput) -> ServiceResult<Customer> {
        self.outcome(customer("new-customer", input))
    }

    async fn get_customer(&self, id: &str) -> ServiceResult<Customer> {
        let input = CustomerInput {
            name: "Ana".to_string(),
            email: None,
            phone: None,
        };
        self.outcome(customer(id, input))
    }

    async fn update_customer(&self, id: &str, input: CustomerInput) -> ServiceResult<Customer> {
        self.outcome(customer(id, input))
    }

    async fn delete_customer(&self, _id: &str) -> ServiceResult<()> {
        self.outcome(())
    }
}

#[async_trait]
impl AnalyticsService for ScriptedServices {
    async fn dashboard_stats(&self) -> ServiceResult<DashboardStats> {
        self.outcome(DashboardStats::default())
    }

    async fn admin_analytics(
        &self,
        period: Period,
        store_id: Option<String>,
    ) -> ServiceResult<AdminAnalytics> {
        self.outcome(AdminAnalytics {
            period,
            store_id,
            orders: 0,
            cards: 0,
            completed_orders: 0,
            new_customers: 0,
            declared_value_total: 0,
        })
    }
}
