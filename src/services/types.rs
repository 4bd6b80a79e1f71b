//! Domain types exchanged with the services.

use serde::{Deserialize, Serialize};

/// Lifecycle of a grading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Received,
    Grading,
    Completed,
    Shipped,
}

impl OrderStatus {
    pub const ALL: &'static [&'static str] = &["pending", "received", "grading", "completed", "shipped"];

    /// Whether cards may still be attached to the order.
    pub fn accepts_cards(self) -> bool {
        !matches!(self, OrderStatus::Completed | OrderStatus::Shipped)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Received => "received",
            OrderStatus::Grading => "grading",
            OrderStatus::Completed => "completed",
            OrderStatus::Shipped => "shipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub uuid: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    pub status: OrderStatus,
    pub card_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_value: Option<u64>,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
    pub updated_at: u64,
}

/// Validated input for creating an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: String,
    pub store_id: Option<String>,
    pub notes: Option<String>,
    pub declared_value: Option<u64>,
}

/// Optional filters for listing orders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: u64,
}

/// Validated input for creating or replacing a customer record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Reporting window for admin analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    pub const ALL: &'static [&'static str] = &["week", "month", "quarter", "year"];

    pub fn days(self) -> u64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
            Period::Year => 365,
        }
    }

    pub fn as_secs(self) -> u64 {
        self.days() * 24 * 60 * 60
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub in_progress_orders: usize,
    pub completed_orders: usize,
    pub total_customers: usize,
    pub total_cards: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAnalytics {
    pub period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    pub orders: usize,
    pub cards: usize,
    pub completed_orders: usize,
    pub new_customers: usize,
    pub declared_value_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            uuid: "abc123".into(),
            customer_id: "cust-1".into(),
            store_id: None,
            status: OrderStatus::Grading,
            card_ids: vec!["c1".into()],
            notes: None,
            declared_value: Some(250),
            created_at: 10,
            updated_at: 20,
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "uuid": "abc123",
                "customerId": "cust-1",
                "status": "grading",
                "cardIds": ["c1"],
                "declaredValue": 250,
                "createdAt": 10,
                "updatedAt": 20,
            })
        );
    }

    #[test]
    fn test_status_literals_match_serde() {
        for literal in OrderStatus::ALL {
            let status: OrderStatus = serde_json::from_value(json!(literal)).unwrap();
            assert_eq!(status.as_str(), *literal);
        }
    }

    #[test]
    fn test_period_literals_and_windows() {
        for literal in Period::ALL {
            assert!(serde_json::from_value::<Period>(json!(literal)).is_ok());
        }
        assert_eq!(Period::default(), Period::Month);
        assert_eq!(Period::Week.as_secs(), 604_800);
    }
}
