use crate::schemas::{
    api_error, database_error, menu_item_dto, nutrition_to_model, ApiError, ApiResponse,
    AppState, ErrorResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::Utc;
use common::{ChangeKind, CreateMenuItemRequest, MenuItemDto, Table, UpdateMenuItemRequest};
use model::entities::{ingredient, menu, menu_ingredient};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, error, info, instrument, trace, warn};

type IngredientLinks = Vec<(menu_ingredient::Model, Option<ingredient::Model>)>;

/// Ingredient associations in insertion order, optionally for one menu item.
async fn load_links(db: &DatabaseConnection, menu_id: Option<i32>) -> Result<IngredientLinks, DbErr> {
    let mut query = menu_ingredient::Entity::find()
        .find_also_related(ingredient::Entity)
        .order_by_asc(menu_ingredient::Column::Id);
    if let Some(menu_id) = menu_id {
        query = query.filter(menu_ingredient::Column::MenuId.eq(menu_id));
    }
    query.all(db).await
}

/// List menu items, newest first, with their ingredients
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    tag = "menu",
    responses(
        (status = 200, description = "Menu retrieved successfully", body = ApiResponse<Vec<MenuItemDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItemDto>>>, ApiError> {
    trace!("Entering get_menu function");
    debug!("Fetching menu items from database");

    let items = match menu::Entity::find()
        .order_by_desc(menu::Column::CreatedAt)
        .order_by_desc(menu::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(items) => items,
        Err(db_error) => {
            error!("Failed to retrieve menu items: {}", db_error);
            return Err(database_error("Failed to retrieve menu items"));
        }
    };

    let links = match load_links(&state.db, None).await {
        Ok(links) => links,
        Err(db_error) => {
            error!("Failed to retrieve menu ingredients: {}", db_error);
            return Err(database_error("Failed to retrieve menu ingredients"));
        }
    };
    debug!("Retrieved {} menu items and {} ingredient links", items.len(), links.len());

    let data: Vec<MenuItemDto> = items
        .into_iter()
        .map(|item| menu_item_dto(item, &links))
        .collect();

    info!("Successfully retrieved {} menu items", data.len());
    Ok(Json(ApiResponse::ok(data, "Menu retrieved successfully")))
}

/// Create a menu item and link its ingredients
///
/// The menu row is written first and each ingredient link afterwards. A link
/// that fails to insert is reported in the message; the menu row is kept.
#[utoipa::path(
    post,
    path = "/api/v1/menu",
    tag = "menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = ApiResponse<MenuItemDto>),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_menu_item(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateMenuItemRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItemDto>>), ApiError> {
    trace!("Entering create_menu_item function");
    debug!(
        "Creating menu item '{}' in category '{}' with {} ingredients",
        request.item,
        request.category,
        request.ingredients.len()
    );

    let new_item = menu::ActiveModel {
        created_at: Set(Utc::now().naive_utc()),
        item: Set(request.item.clone()),
        price: Set(request.price),
        availability: Set(request.availability.unwrap_or(true)),
        category: Set(request.category.clone()),
        nutritional_info: Set(request.nutritional_info.clone().map(nutrition_to_model)),
        daily_demand: Set(request.daily_demand),
        sold_today: Set(0),
        image_url: Set(request.image_url.clone()),
        ..Default::default()
    };

    trace!("Attempting to insert new menu item into database");
    let item = match new_item.insert(&state.db).await {
        Ok(item) => {
            info!("Menu item created with ID: {}, name: {}", item.id, item.item);
            item
        }
        Err(db_error) => {
            error!("Failed to create menu item '{}': {}", request.item, db_error);
            return Err(database_error("Failed to create menu item"));
        }
    };
    state.changes.publish(Table::Menu, ChangeKind::Insert, item.id);

    let mut failed = Vec::new();
    for link in &request.ingredients {
        let row = menu_ingredient::ActiveModel {
            menu_id: Set(item.id),
            ingredient_id: Set(link.ingredient_id),
            quantity: Set(link.quantity),
            ..Default::default()
        };
        match row.insert(&state.db).await {
            Ok(saved) => {
                debug!("Linked ingredient {} to menu item {}", link.ingredient_id, item.id);
                state.changes.publish(Table::MenuIngredients, ChangeKind::Insert, saved.id);
            }
            Err(db_error) => {
                error!(
                    "Failed to link ingredient {} to menu item {}: {}",
                    link.ingredient_id, item.id, db_error
                );
                failed.push(link.ingredient_id);
            }
        }
    }

    let links = match load_links(&state.db, Some(item.id)).await {
        Ok(links) => links,
        Err(db_error) => {
            error!("Failed to reload ingredients of menu item {}: {}", item.id, db_error);
            Vec::new()
        }
    };

    let message = if failed.is_empty() {
        "Menu item created successfully".to_string()
    } else {
        warn!(
            "Menu item {} created with {} of {} ingredient links missing",
            item.id,
            failed.len(),
            request.ingredients.len()
        );
        format!(
            "Menu item created, but {} of {} ingredient links failed (ingredient IDs: {:?})",
            failed.len(),
            request.ingredients.len(),
            failed
        )
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(menu_item_dto(item, &links), message)),
    ))
}

/// Update a menu item
#[utoipa::path(
    put,
    path = "/api/v1/menu/{menu_id}",
    tag = "menu",
    params(
        ("menu_id" = i32, Path, description = "Menu item ID"),
    ),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = ApiResponse<MenuItemDto>),
        (status = 404, description = "Menu item not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_menu_item(
    Path(menu_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateMenuItemRequest>>,
) -> Result<Json<ApiResponse<MenuItemDto>>, ApiError> {
    trace!("Entering update_menu_item function for menu_id: {}", menu_id);

    let existing = match menu::Entity::find_by_id(menu_id).one(&state.db).await {
        Ok(Some(item)) => {
            debug!("Found existing menu item: {}", item.item);
            item
        }
        Ok(None) => {
            warn!("Menu item with ID {} not found for update", menu_id);
            return Err(api_error(
                StatusCode::NOT_FOUND,
                "MENU_ITEM_NOT_FOUND",
                format!("Menu item with id {} does not exist", menu_id),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup menu item {} for update: {}", menu_id, db_error);
            return Err(database_error("Failed to lookup menu item"));
        }
    };

    let mut active: menu::ActiveModel = existing.into();
    let mut updated_fields = Vec::new();

    if let Some(item) = request.item {
        active.item = Set(item);
        updated_fields.push("item");
    }
    if let Some(price) = request.price {
        active.price = Set(price);
        updated_fields.push("price");
    }
    if let Some(availability) = request.availability {
        active.availability = Set(availability);
        updated_fields.push("availability");
    }
    if let Some(category) = request.category {
        active.category = Set(category);
        updated_fields.push("category");
    }
    if let Some(info) = request.nutritional_info {
        active.nutritional_info = Set(Some(nutrition_to_model(info)));
        updated_fields.push("nutritional_info");
    }
    if let Some(daily_demand) = request.daily_demand {
        active.daily_demand = Set(Some(daily_demand));
        updated_fields.push("daily_demand");
    }
    if let Some(sold_today) = request.sold_today {
        active.sold_today = Set(sold_today);
        updated_fields.push("sold_today");
    }
    if let Some(image_url) = request.image_url {
        active.image_url = Set(Some(image_url));
        updated_fields.push("image_url");
    }
    debug!("Updating fields: {}", updated_fields.join(", "));

    let updated = match active.update(&state.db).await {
        Ok(updated) => updated,
        Err(db_error) => {
            error!("Failed to update menu item {}: {}", menu_id, db_error);
            return Err(database_error("Failed to update menu item"));
        }
    };
    state.changes.publish(Table::Menu, ChangeKind::Update, updated.id);

    let links = match load_links(&state.db, Some(menu_id)).await {
        Ok(links) => links,
        Err(db_error) => {
            error!("Failed to reload ingredients of menu item {}: {}", menu_id, db_error);
            return Err(database_error("Failed to retrieve menu ingredients"));
        }
    };

    info!("Menu item {} updated successfully", menu_id);
    Ok(Json(ApiResponse::ok(
        menu_item_dto(updated, &links),
        "Menu item updated successfully",
    )))
}
