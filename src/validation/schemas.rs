//! Named schemas for every endpoint that accepts input.

use super::schema::{Constraint, Schema};
use crate::services::{OrderStatus, Period};

/// Upper bound on cards attached in one request.
pub const MAX_CARDS_PER_REQUEST: usize = 500;

const ID: Constraint = Constraint::Text { min: 1, max: 64 };
const NAME: Constraint = Constraint::Text { min: 2, max: 100 };
const PHONE: Constraint = Constraint::Text { min: 6, max: 20 };
const NOTES: Constraint = Constraint::Text { min: 0, max: 500 };

/// `GET /api/analytics/admin`
pub fn admin_analytics() -> Schema {
    Schema::new("analytics.admin")
        .optional("period", Constraint::OneOf(Period::ALL))
        .optional("storeId", ID)
}

/// `GET /api/orders`
pub fn list_orders() -> Schema {
    Schema::new("orders.list")
        .optional("status", Constraint::OneOf(OrderStatus::ALL))
        .optional("customerId", ID)
}

/// `POST /api/orders`
pub fn create_order() -> Schema {
    Schema::new("orders.create")
        .required("customerId", ID)
        .optional("storeId", ID)
        .optional("notes", NOTES)
        .optional("declaredValue", Constraint::PositiveInt)
}

/// `PUT /api/orders/{id}/status`
pub fn update_order_status() -> Schema {
    Schema::new("orders.update_status").required("status", Constraint::OneOf(OrderStatus::ALL))
}

/// `POST /api/orders/{id}/assign-cards`
pub fn assign_cards() -> Schema {
    Schema::new("orders.assign_cards").required(
        "cardIds",
        Constraint::StringArray {
            min_items: 1,
            max_items: MAX_CARDS_PER_REQUEST,
        },
    )
}

/// `POST /api/customers`
pub fn create_customer() -> Schema {
    customer_fields(Schema::new("customers.create"))
}

/// `PUT /api/customers/{id}`
pub fn update_customer() -> Schema {
    customer_fields(Schema::new("customers.update"))
}

fn customer_fields(schema: Schema) -> Schema {
    schema
        .required("name", NAME)
        .optional("email", Constraint::Email)
        .optional("phone", PHONE)
}
