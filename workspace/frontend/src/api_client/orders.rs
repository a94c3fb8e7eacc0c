use common::{OrderDto, OrderStatus, UpdateOrderStatusRequest};

use super::{get, put};

/// Orders joined with menu item and student names, oldest first.
pub async fn get_orders() -> Result<Vec<OrderDto>, String> {
    get("/orders").await
}

pub async fn update_order_status(id: i32, status: OrderStatus) -> Result<OrderDto, String> {
    put(&format!("/orders/{}/status", id), &UpdateOrderStatusRequest { status }).await
}
