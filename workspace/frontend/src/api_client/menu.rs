use common::{CreateMenuItemRequest, MenuItemDto, UpdateMenuItemRequest};

use super::{get, post, put};

/// Menu items with their ingredient links, newest first.
pub async fn get_menu() -> Result<Vec<MenuItemDto>, String> {
    get("/menu").await
}

pub async fn create_menu_item(request: CreateMenuItemRequest) -> Result<MenuItemDto, String> {
    post("/menu", &request).await
}

pub async fn update_menu_item(id: i32, request: UpdateMenuItemRequest) -> Result<MenuItemDto, String> {
    put(&format!("/menu/{}", id), &request).await
}
