use crate::schemas::{database_error, student_dto, ApiError, ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use chrono::Utc;
use common::{ChangeKind, CreateStudentRequest, StudentDto, Table};
use model::entities::student;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::{debug, error, info, instrument, trace};

/// List students
#[utoipa::path(
    get,
    path = "/api/v1/students",
    tag = "students",
    responses(
        (status = 200, description = "Students retrieved successfully", body = ApiResponse<Vec<StudentDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StudentDto>>>, ApiError> {
    trace!("Entering get_students function");

    match student::Entity::find()
        .order_by_asc(student::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(students) => {
            let data: Vec<StudentDto> = students.into_iter().map(student_dto).collect();
            info!("Successfully retrieved {} students", data.len());
            Ok(Json(ApiResponse::ok(data, "Students retrieved successfully")))
        }
        Err(db_error) => {
            error!("Failed to retrieve students: {}", db_error);
            Err(database_error("Failed to retrieve students"))
        }
    }
}

/// Register a student
#[utoipa::path(
    post,
    path = "/api/v1/students",
    tag = "students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = ApiResponse<StudentDto>),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateStudentRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<StudentDto>>), ApiError> {
    debug!("Creating student '{}'", request.name);

    let new_student = student::ActiveModel {
        name: Set(request.name.clone()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    match new_student.insert(&state.db).await {
        Ok(model) => {
            info!("Student created with ID: {}", model.id);
            state.changes.publish(Table::Student, ChangeKind::Insert, model.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::ok(student_dto(model), "Student created successfully")),
            ))
        }
        Err(db_error) => {
            error!("Failed to create student '{}': {}", request.name, db_error);
            Err(database_error("Failed to create student"))
        }
    }
}
