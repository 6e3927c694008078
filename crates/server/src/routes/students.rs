use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use service::db::student_service;
use service::errors::ServiceError;

use crate::errors::JsonApiError;

/// Shared handler state: the process-scoped database handle.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

/// Wire payload for create and update. Any `id` in the body is ignored;
/// the path (or the store on insert) owns the id.
#[derive(Debug, Deserialize, Serialize)]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::student::Model>>, JsonApiError> {
    match student_service::list_students(&state.db).await {
        Ok(list) => { info!(count = list.len(), "list students"); Ok(Json(list)) }
        Err(e) => {
            error!(err = %e, "list students failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 422, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<StudentInput>,
) -> Result<(StatusCode, Json<models::student::Model>), JsonApiError> {
    match student_service::create_student(
        &state.db,
        &input.first_name,
        &input.last_name,
        &input.email,
        input.major.as_deref(),
        input.gpa,
    )
    .await
    {
        Ok(m) => {
            info!(id = m.id, email = %m.email, "created student");
            Ok((StatusCode::CREATED, Json(m)))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "create student failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::student::Model>, JsonApiError> {
    match student_service::get_student(&state.db, id).await {
        Ok(Some(m)) => Ok(Json(m)),
        Ok(None) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("student {} not found", id)),
        )),
        Err(e) => {
            error!(err = %e, "get student failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Get Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<StudentInput>,
) -> Result<Json<models::student::Model>, JsonApiError> {
    match student_service::update_student(
        &state.db,
        id,
        &input.first_name,
        &input.last_name,
        &input.email,
        input.major.as_deref(),
        input.gpa,
    )
    .await
    {
        Ok(m) => {
            info!(id = m.id, "updated student");
            Ok(Json(m))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(e.to_string())))
        }
        Err(ServiceError::NotFound(_)) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("student {} not found", id)),
        )),
        Err(e) => {
            error!(err = %e, "update student failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    match student_service::delete_student(&state.db, id).await {
        Ok(true) => {
            info!(id, "deleted student");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("student {} not found", id)),
        )),
        Err(e) => {
            error!(err = %e, "delete student failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string())))
        }
    }
}
