use crate::auth::auth::AuthUser;
use crate::core::absence::{ensure_transition, expand_range};
use crate::core::error::WorkflowError;
use crate::model::absence_request::{AbsenceRequest, AbsenceStatus};
use crate::model::attendance::AttendanceStatus;
use crate::model::role::Role;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateAbsence {
    #[schema(example = "Medical appointment")]
    pub reason: String,
    #[schema(example = "2026-01-12", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AbsenceFilter {
    #[schema(example = 42)]
    /// Filter by user (admin only; employees always see their own)
    pub user_id: Option<u64>,
    #[schema(example = "Pending")]
    /// Filter by request status
    pub status: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct AbsenceListResponse {
    pub data: Vec<AbsenceRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    U64(u64),
    Str(String),
}

async fn load_request(pool: &MySqlPool, id: u64) -> Result<AbsenceRequest, WorkflowError> {
    sqlx::query_as::<_, AbsenceRequest>(
        r#"
        SELECT id, user_id, reason, start_date, end_date, status, created_at
        FROM absence_requests
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(WorkflowError::NotFound)
}

/// Materializes one Absent attendance row per day of the request's range
/// and flips the status, all inside a single transaction: on any failure
/// nothing is visible. Returns the number of rows created.
///
/// Every day in range gets a row regardless of what already exists for
/// that day, so approving again after a revert duplicates them.
async fn approve_request(pool: &MySqlPool, id: u64) -> Result<u64, WorkflowError> {
    let request = load_request(pool, id).await?;
    ensure_transition(request.status, AbsenceStatus::Approved)?;

    let days = expand_range(request.start_date, request.end_date);

    let mut tx = pool.begin().await?;

    for day in &days {
        if let Err(e) = sqlx::query(
            r#"
            INSERT INTO attendance (user_id, date, check_in_time, check_out_time, status)
            VALUES (?, ?, NULL, NULL, ?)
            "#,
        )
        .bind(request.user_id)
        .bind(*day)
        .bind(AttendanceStatus::Absent)
        .execute(&mut *tx)
        .await
        {
            return Err(WorkflowError::PartialWrite(e));
        }
    }

    if let Err(e) = sqlx::query("UPDATE absence_requests SET status = ? WHERE id = ?")
        .bind(AbsenceStatus::Approved)
        .bind(request.id)
        .execute(&mut *tx)
        .await
    {
        return Err(WorkflowError::PartialWrite(e));
    }

    tx.commit().await.map_err(WorkflowError::PartialWrite)?;

    Ok(days.len() as u64)
}

/// Single-field status update for reject and revert; no attendance side
/// effects.
async fn update_status(pool: &MySqlPool, id: u64, to: AbsenceStatus) -> Result<(), WorkflowError> {
    let request = load_request(pool, id).await?;
    ensure_transition(request.status, to)?;

    sqlx::query("UPDATE absence_requests SET status = ? WHERE id = ?")
        .bind(to)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

fn respond_workflow_error(
    err: WorkflowError,
    request_id: u64,
    action: &'static str,
) -> actix_web::Result<HttpResponse> {
    match err {
        WorkflowError::NotFound => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Absence request not found"
        }))),
        WorkflowError::InvalidState(msg) => {
            Ok(HttpResponse::BadRequest().json(serde_json::json!({ "message": msg })))
        }
        WorkflowError::Store(e) | WorkflowError::PartialWrite(e) => {
            tracing::error!(error = %e, request_id, action, "Absence workflow failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/* =========================
Create absence request
========================= */
/// Swagger doc for create_absence endpoint
#[utoipa::path(
    post,
    path = "/api/absence",
    request_body(
        content = CreateAbsence,
        description = "Absence request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Absence request submitted",
         body = Object,
         example = json!({
            "message": "Absence request submitted",
            "status": "Pending"
         })
        ),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn create_absence(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateAbsence>,
) -> actix_web::Result<impl Responder> {
    if payload.reason.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Reason must not be empty"
        })));
    }

    if payload.start_date > payload.end_date {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "start_date cannot be after end_date"
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO absence_requests (user_id, reason, start_date, end_date, status)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(auth.user_id)
    .bind(payload.reason.trim())
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(AbsenceStatus::Pending)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, user_id = auth.user_id, "Failed to create absence request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Absence request submitted",
        "status": AbsenceStatus::Pending
    })))
}

/* =========================
Approve absence (Admin)
========================= */
/// Swagger doc for approve_absence endpoint
#[utoipa::path(
    put,
    path = "/api/absence/{request_id}/approve",
    params(
        ("request_id" = u64, Path, description = "ID of the absence request to approve")
    ),
    responses(
        (status = 200, description = "Absence approved, daily records created", body = Object, example = json!({
            "message": "Absence request approved",
            "records_created": 3
        })),
        (status = 400, description = "Request is not pending", body = Object, example = json!({
            "message": "Absence request is Approved; cannot move it to Approved"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Absence request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn approve_absence(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    match approve_request(pool.get_ref(), request_id).await {
        Ok(created) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Absence request approved",
            "records_created": created
        }))),
        Err(e) => respond_workflow_error(e, request_id, "approve"),
    }
}

/* =========================
Reject absence (Admin)
========================= */
/// Swagger doc for reject_absence endpoint
#[utoipa::path(
    put,
    path = "/api/absence/{request_id}/reject",
    params(
        ("request_id" = u64, Path, description = "ID of the absence request to reject")
    ),
    responses(
        (status = 200, description = "Absence rejected", body = Object, example = json!({
            "message": "Absence request rejected"
        })),
        (status = 400, description = "Request is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Absence request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn reject_absence(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    match update_status(pool.get_ref(), request_id, AbsenceStatus::Rejected).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Absence request rejected"
        }))),
        Err(e) => respond_workflow_error(e, request_id, "reject"),
    }
}

/* =========================
Revert absence (Admin)
========================= */
/// Swagger doc for revert_absence endpoint
#[utoipa::path(
    put,
    path = "/api/absence/{request_id}/revert",
    params(
        ("request_id" = u64, Path, description = "ID of the absence request to revert to pending")
    ),
    responses(
        (status = 200, description = "Absence reverted to pending", body = Object, example = json!({
            "message": "Absence request reverted to pending"
        })),
        (status = 400, description = "Request is already pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Absence request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn revert_absence(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    // Reverting an approved request does not reconcile the attendance
    // records a prior approval created.
    match update_status(pool.get_ref(), request_id, AbsenceStatus::Pending).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Absence request reverted to pending"
        }))),
        Err(e) => respond_workflow_error(e, request_id, "revert"),
    }
}

/* =========================
Delete absence (Admin)
========================= */
/// Swagger doc for delete_absence endpoint
#[utoipa::path(
    delete,
    path = "/api/absence/{request_id}",
    params(
        ("request_id" = u64, Path, description = "ID of the absence request to permanently delete")
    ),
    responses(
        (status = 200, description = "Absence request deleted", body = Object, example = json!({
            "message": "Absence request deleted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Absence request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn delete_absence(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    // Destructive and available from any status. Attendance records
    // materialized by a prior approval stay in place.
    let result = sqlx::query("DELETE FROM absence_requests WHERE id = ?")
        .bind(request_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, request_id, "Delete absence request failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Absence request not found"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Absence request deleted"
    })))
}

/// for getting an absence request's details endpoint
#[utoipa::path(
    get,
    path = "/api/absence/{request_id}",
    params(
        ("request_id" = u64, Path, description = "ID of the absence request to fetch")
    ),
    responses(
        (status = 200, description = "Absence request found", body = AbsenceRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Absence request not found", body = Object, example = json!({
            "message": "Absence request not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn get_absence(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let request_id = path.into_inner();

    match load_request(pool.get_ref(), request_id).await {
        Ok(request) => {
            if auth.role != Role::Admin && request.user_id != auth.user_id {
                return Err(actix_web::error::ErrorForbidden("Not allowed"));
            }
            Ok(HttpResponse::Ok().json(request))
        }
        Err(e) => respond_workflow_error(e, request_id, "get"),
    }
}

/// for getting absence requests endpoint
#[utoipa::path(
    get,
    path = "/api/absence",
    params(AbsenceFilter),
    responses(
        (status = 200, description = "Paginated absence request list", body = AbsenceListResponse),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn absence_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<AbsenceFilter>,
) -> actix_web::Result<impl Responder> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    // Employees are always scoped to their own requests.
    let user_filter = match auth.role {
        Role::Admin => query.user_id,
        Role::Employee => Some(auth.user_id),
    };

    if let Some(user_id) = user_filter {
        where_sql.push_str(" AND user_id = ?");
        args.push(FilterValue::U64(user_id));
    }

    if let Some(raw) = query.status.as_deref() {
        let status = AbsenceStatus::from_str(raw).map_err(|_| {
            actix_web::error::ErrorBadRequest(
                "Invalid status filter. Allowed: Pending, Approved, Rejected",
            )
        })?;
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status.to_string()));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM absence_requests{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(s.clone()),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count absence requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT id, user_id, reason, start_date, end_date, status, created_at
        FROM absence_requests
        {}
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, AbsenceRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let requests = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch absence request list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    // -------------------------
    // Response
    // -------------------------
    let response = AbsenceListResponse {
        data: requests,
        page: page as u32,
        per_page: per_page as u32,
        total,
    };

    Ok(HttpResponse::Ok().json(response))
}
