use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The `{ success, data?, error?, message?, details? }` body every endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// HTTP status plus decoded envelope. Non-2xx replies are not errors here;
/// the envelope carries the reason.
#[derive(Debug, Clone)]
pub struct ApiReply<T> {
    pub status: u16,
    pub body: Envelope<T>,
}

impl<T> ApiReply<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.success
    }
}

pub struct GradingClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GradingClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Same client, different credential.
    pub fn with_api_key(&self, api_key: Option<&str>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: api_key.map(str::to_string),
        }
    }

    pub async fn health(&self) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.client.get(self.url("/health"))).await
    }

    pub async fn dashboard(&self) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::GET, "/api/analytics/dashboard")).await
    }

    pub async fn admin_analytics(
        &self,
        period: Option<&str>,
        store_id: Option<&str>,
    ) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        let mut query = Vec::new();
        if let Some(period) = period {
            query.push(("period", period));
        }
        if let Some(store_id) = store_id {
            query.push(("storeId", store_id));
        }
        let req = self.authed(Method::GET, "/api/analytics/admin").query(&query);
        self.send(req).await
    }

    pub async fn list_orders(&self, query: &[(&str, &str)]) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::GET, "/api/orders").query(query)).await
    }

    pub async fn create_order(&self, order: &Value) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::POST, "/api/orders").json(order)).await
    }

    pub async fn get_order(&self, id: &str) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::GET, &format!("/api/orders/{}", id))).await
    }

    pub async fn update_order_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        let req = self
            .authed(Method::PUT, &format!("/api/orders/{}/status", id))
            .json(&json!({ "status": status }));
        self.send(req).await
    }

    pub async fn assign_cards(
        &self,
        id: &str,
        card_ids: &[&str],
    ) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        let req = self
            .authed(Method::POST, &format!("/api/orders/{}/assign-cards", id))
            .json(&json!({ "cardIds": card_ids }));
        self.send(req).await
    }

    pub async fn list_customers(&self) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::GET, "/api/customers")).await
    }

    pub async fn create_customer(&self, customer: &Value) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::POST, "/api/customers").json(customer)).await
    }

    pub async fn get_customer(&self, id: &str) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::GET, &format!("/api/customers/{}", id))).await
    }

    pub async fn update_customer(
        &self,
        id: &str,
        customer: &Value,
    ) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        let req = self
            .authed(Method::PUT, &format!("/api/customers/{}", id))
            .json(customer);
        self.send(req).await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        self.send(self.authed(Method::DELETE, &format!("/api/customers/{}", id))).await
    }

    /// Send an arbitrary JSON body, for callers exercising endpoints directly.
    pub async fn raw_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiReply<Value>, Box<dyn std::error::Error>> {
        let mut req = self.authed(method, path);
        if let Some(body) = body {
            req = req.json(body);
        }
        self.send(req).await
    }

    /// Issue a CORS preflight. Returns the raw response so headers can be inspected.
    pub async fn preflight(
        &self,
        path: &str,
        origin: &str,
        method: &str,
    ) -> Result<Response, reqwest::Error> {
        self.client
            .request(Method::OPTIONS, self.url(path))
            .header("Origin", origin)
            .header("Access-Control-Request-Method", method)
            .send()
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match &self.api_key {
            Some(key) => req.header("x-api-key", key),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<ApiReply<T>, Box<dyn std::error::Error>> {
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        match serde_json::from_str::<Envelope<T>>(&text) {
            Ok(body) => Ok(ApiReply { status, body }),
            Err(e) => Err(format!("Unexpected body with status {}: {} ({})", status, text, e).into()),
        }
    }
}
