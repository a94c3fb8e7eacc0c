use crate::schemas::{
    api_error, database_error, order_dto, status_to_model, ApiError, ApiResponse, AppState,
    ErrorResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::Utc;
use common::{ChangeKind, CreateOrderRequest, OrderDto, Table, UpdateOrderStatusRequest};
use model::entities::{menu, order, student};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, trace, warn};

/// Joins an order with its menu item and student rows.
async fn joined_order(db: &DatabaseConnection, model: order::Model) -> Result<OrderDto, ApiError> {
    let menu_item = match model.menu_id {
        Some(menu_id) => menu::Entity::find_by_id(menu_id).one(db).await,
        None => Ok(None),
    };
    let student = match model.student_id {
        Some(student_id) => student::Entity::find_by_id(student_id).one(db).await,
        None => Ok(None),
    };
    match (menu_item, student) {
        (Ok(menu_item), Ok(student)) => Ok(order_dto(model, menu_item.as_ref(), student.as_ref())),
        (Err(db_error), _) | (_, Err(db_error)) => {
            error!("Failed to join order {} with its menu item and student: {}", model.id, db_error);
            Err(database_error("Failed to load order details"))
        }
    }
}

/// List orders, oldest first, with student and menu item names
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "orders",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = ApiResponse<Vec<OrderDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_orders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderDto>>>, ApiError> {
    trace!("Entering get_orders function");
    debug!("Fetching orders from database");

    let orders = match order::Entity::find()
        .order_by_asc(order::Column::CreatedAt)
        .order_by_asc(order::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(orders) => orders,
        Err(db_error) => {
            error!("Failed to retrieve orders: {}", db_error);
            return Err(database_error("Failed to retrieve orders"));
        }
    };

    let menu_items = match menu::Entity::find().all(&state.db).await {
        Ok(items) => items,
        Err(db_error) => {
            error!("Failed to retrieve menu items for orders: {}", db_error);
            return Err(database_error("Failed to retrieve menu items"));
        }
    };
    let students = match student::Entity::find().all(&state.db).await {
        Ok(students) => students,
        Err(db_error) => {
            error!("Failed to retrieve students for orders: {}", db_error);
            return Err(database_error("Failed to retrieve students"));
        }
    };
    debug!(
        "Joining {} orders with {} menu items and {} students",
        orders.len(),
        menu_items.len(),
        students.len()
    );

    let menu_by_id: HashMap<i32, &menu::Model> = menu_items.iter().map(|m| (m.id, m)).collect();
    let student_by_id: HashMap<i32, &student::Model> = students.iter().map(|s| (s.id, s)).collect();

    let data: Vec<OrderDto> = orders
        .into_iter()
        .map(|order| {
            let menu_item = order.menu_id.and_then(|id| menu_by_id.get(&id).copied());
            let student = order.student_id.and_then(|id| student_by_id.get(&id).copied());
            order_dto(order, menu_item, student)
        })
        .collect();

    info!("Successfully retrieved {} orders", data.len());
    Ok(Json(ApiResponse::ok(data, "Orders retrieved successfully")))
}

/// Place an order for a menu item
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderDto>),
        (status = 404, description = "Menu item or student not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_order(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateOrderRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<OrderDto>>), ApiError> {
    trace!("Entering create_order function");
    debug!(
        "Creating order for menu item {} x{} (student: {:?})",
        request.menu_id, request.quantity, request.student_id
    );

    match menu::Entity::find_by_id(request.menu_id).one(&state.db).await {
        Ok(Some(_)) => debug!("Menu item {} exists", request.menu_id),
        Ok(None) => {
            warn!("Order references unknown menu item {}", request.menu_id);
            return Err(api_error(
                StatusCode::NOT_FOUND,
                "MENU_ITEM_NOT_FOUND",
                format!("Menu item with id {} does not exist", request.menu_id),
            ));
        }
        Err(db_error) => {
            error!("Failed to validate menu item {}: {}", request.menu_id, db_error);
            return Err(database_error("Failed to validate menu item"));
        }
    }

    if let Some(student_id) = request.student_id {
        match student::Entity::find_by_id(student_id).one(&state.db).await {
            Ok(Some(_)) => debug!("Student {} exists", student_id),
            Ok(None) => {
                warn!("Order references unknown student {}", student_id);
                return Err(api_error(
                    StatusCode::NOT_FOUND,
                    "STUDENT_NOT_FOUND",
                    format!("Student with id {} does not exist", student_id),
                ));
            }
            Err(db_error) => {
                error!("Failed to validate student {}: {}", student_id, db_error);
                return Err(database_error("Failed to validate student"));
            }
        }
    }

    let new_order = order::ActiveModel {
        created_at: Set(Utc::now().naive_utc()),
        quantity: Set(request.quantity),
        amount: Set(request.amount),
        status: Set(status_to_model(request.status.unwrap_or_default())),
        payment_method: Set(request.payment_method.clone()),
        expected_time: Set(request.expected_time),
        menu_id: Set(Some(request.menu_id)),
        student_id: Set(request.student_id),
        ..Default::default()
    };

    let model = match new_order.insert(&state.db).await {
        Ok(model) => {
            info!("Order created with ID: {}", model.id);
            model
        }
        Err(db_error) => {
            error!("Failed to create order for menu item {}: {}", request.menu_id, db_error);
            return Err(database_error("Failed to create order"));
        }
    };
    state.changes.publish(Table::Orders, ChangeKind::Insert, model.id);

    let dto = joined_order(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(dto, "Order created successfully"))))
}

/// Set an order's status
///
/// Any status may follow any other; the previous status is not checked.
#[utoipa::path(
    put,
    path = "/api/v1/orders/{order_id}/status",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<OrderDto>),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 422, description = "Unknown status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_order_status(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<OrderDto>>, ApiError> {
    trace!("Entering update_order_status function for order_id: {}", order_id);

    let existing = match order::Entity::find_by_id(order_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Order with ID {} not found for status update", order_id);
            return Err(api_error(
                StatusCode::NOT_FOUND,
                "ORDER_NOT_FOUND",
                format!("Order with id {} does not exist", order_id),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup order {}: {}", order_id, db_error);
            return Err(database_error("Failed to lookup order"));
        }
    };

    debug!("Order {} status {:?} -> {}", order_id, existing.status, request.status);
    let mut active: order::ActiveModel = existing.into();
    active.status = Set(status_to_model(request.status));

    let model = match active.update(&state.db).await {
        Ok(model) => model,
        Err(db_error) => {
            error!("Failed to update status of order {}: {}", order_id, db_error);
            return Err(database_error("Failed to update order status"));
        }
    };
    state.changes.publish(Table::Orders, ChangeKind::Update, model.id);

    let dto = joined_order(&state.db, model).await?;
    info!("Order {} is now {}", order_id, dto.status);
    Ok(Json(ApiResponse::ok(dto, "Order status updated successfully")))
}
