use crate::schemas::{api_error, configured_offset, database_error, ApiError, ApiResponse, AppState, ErrorResponse, TodayQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use common::{ChangeKind, CreateIngredientRequest, IngredientDto, Table, UpdateIngredientRequest};
use compute::snapshot::index_menu;
use compute::stock::{stock_level, stock_levels};
use model::entities::{ingredient, menu, menu_ingredient};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use tracing::{debug, error, info, instrument, trace, warn};

/// Menu rows and ingredient links needed to derive remaining stock.
async fn usage_rows(
    db: &DatabaseConnection,
) -> Result<(Vec<menu::Model>, Vec<menu_ingredient::Model>), DbErr> {
    let menu = menu::Entity::find().all(db).await?;
    let links = menu_ingredient::Entity::find().all(db).await?;
    Ok((menu, links))
}

/// Stock view of a single freshly written ingredient.
async fn ingredient_dto(
    db: &DatabaseConnection,
    model: &ingredient::Model,
    today: NaiveDate,
) -> Result<IngredientDto, ApiError> {
    let (menu, links) = usage_rows(db).await.map_err(|db_error| {
        error!("Failed to load ingredient usage for {}: {}", model.id, db_error);
        database_error("Failed to load ingredient usage")
    })?;
    Ok(stock_level(model, &index_menu(&menu), &links, today))
}

/// List ingredients with remaining quantity and stock flags
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    tag = "ingredients",
    params(TodayQuery),
    responses(
        (status = 200, description = "Ingredients retrieved successfully", body = ApiResponse<Vec<IngredientDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_ingredients(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<ApiResponse<Vec<IngredientDto>>>, ApiError> {
    trace!("Entering get_ingredients function");
    let today = compute::today_or_now(query.today, configured_offset(&state.config)?);

    let ingredients = match ingredient::Entity::find()
        .order_by_asc(ingredient::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(rows) => rows,
        Err(db_error) => {
            error!("Failed to retrieve ingredients: {}", db_error);
            return Err(database_error("Failed to retrieve ingredients"));
        }
    };
    let (menu, links) = match usage_rows(&state.db).await {
        Ok(rows) => rows,
        Err(db_error) => {
            error!("Failed to retrieve ingredient usage: {}", db_error);
            return Err(database_error("Failed to retrieve ingredient usage"));
        }
    };
    debug!(
        "Computing stock levels for {} ingredients against {} menu items",
        ingredients.len(),
        menu.len()
    );

    let levels = stock_levels(&ingredients, &index_menu(&menu), &links, today);
    let low = levels.iter().filter(|level| level.low_stock).count();
    info!("Successfully retrieved {} ingredients ({} low on stock)", levels.len(), low);
    Ok(Json(ApiResponse::ok(levels, "Ingredients retrieved successfully")))
}

/// Add an ingredient to stock
#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    tag = "ingredients",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = ApiResponse<IngredientDto>),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_ingredient(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateIngredientRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<IngredientDto>>), ApiError> {
    trace!("Entering create_ingredient function");
    debug!("Creating ingredient '{}' with quantity {}", request.name, request.quantity);

    let new_ingredient = ingredient::ActiveModel {
        name: Set(request.name.clone()),
        quantity: Set(request.quantity),
        reorder_level: Set(request.reorder_level),
        expiry_date: Set(request.expiry_date),
        cost_per_unit: Set(request.cost_per_unit),
        unit: Set(request.unit.clone()),
        remaining_ingredient: Set(request.remaining),
        ..Default::default()
    };

    let model = match new_ingredient.insert(&state.db).await {
        Ok(model) => {
            info!("Ingredient created with ID: {}, name: {}", model.id, model.name);
            model
        }
        Err(db_error) => {
            error!("Failed to create ingredient '{}': {}", request.name, db_error);
            return Err(database_error("Failed to create ingredient"));
        }
    };
    state.changes.publish(Table::Ingredients, ChangeKind::Insert, model.id);

    let dto = ingredient_dto(&state.db, &model, compute::today_or_now(None, configured_offset(&state.config)?)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(dto, "Ingredient created successfully")),
    ))
}

/// Update an ingredient's stock details
#[utoipa::path(
    put,
    path = "/api/v1/ingredients/{ingredient_id}",
    tag = "ingredients",
    params(
        ("ingredient_id" = i32, Path, description = "Ingredient ID"),
    ),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = ApiResponse<IngredientDto>),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_ingredient(
    Path(ingredient_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateIngredientRequest>>,
) -> Result<Json<ApiResponse<IngredientDto>>, ApiError> {
    trace!("Entering update_ingredient function for ingredient_id: {}", ingredient_id);

    let existing = match ingredient::Entity::find_by_id(ingredient_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Ingredient with ID {} not found for update", ingredient_id);
            return Err(api_error(
                StatusCode::NOT_FOUND,
                "INGREDIENT_NOT_FOUND",
                format!("Ingredient with id {} does not exist", ingredient_id),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup ingredient {}: {}", ingredient_id, db_error);
            return Err(database_error("Failed to lookup ingredient"));
        }
    };

    let mut active: ingredient::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(quantity) = request.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(reorder_level) = request.reorder_level {
        active.reorder_level = Set(reorder_level);
    }
    if let Some(expiry_date) = request.expiry_date {
        active.expiry_date = Set(Some(expiry_date));
    }
    if let Some(cost_per_unit) = request.cost_per_unit {
        active.cost_per_unit = Set(cost_per_unit);
    }
    if let Some(unit) = request.unit {
        active.unit = Set(Some(unit));
    }
    if let Some(remaining) = request.remaining {
        active.remaining_ingredient = Set(Some(remaining));
    }

    let model = match active.update(&state.db).await {
        Ok(model) => model,
        Err(db_error) => {
            error!("Failed to update ingredient {}: {}", ingredient_id, db_error);
            return Err(database_error("Failed to update ingredient"));
        }
    };
    state.changes.publish(Table::Ingredients, ChangeKind::Update, model.id);

    let dto = ingredient_dto(&state.db, &model, compute::today_or_now(None, configured_offset(&state.config)?)).await?;
    info!("Ingredient {} updated successfully", ingredient_id);
    Ok(Json(ApiResponse::ok(dto, "Ingredient updated successfully")))
}
