use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::core::status::{classify_check_in, derive_status};
use crate::model::absence_request::AbsenceRequest;
use crate::model::attendance::AttendanceRecord;
use crate::model::role::Role;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, Utc};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

/// A user's attendance history, newest check-in first. The derivation
/// engine relies on this ordering.
pub(crate) async fn load_history(
    pool: &MySqlPool,
    user_id: u64,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, user_id, date, check_in_time, check_out_time, status, created_at
        FROM attendance
        WHERE user_id = ?
        ORDER BY check_in_time DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn load_all_history(
    pool: &MySqlPool,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, user_id, date, check_in_time, check_out_time, status, created_at
        FROM attendance
        ORDER BY check_in_time DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

async fn load_requests(
    pool: &MySqlPool,
    user_id: u64,
) -> Result<Vec<AbsenceRequest>, sqlx::Error> {
    sqlx::query_as::<_, AbsenceRequest>(
        r#"
        SELECT id, user_id, reason, start_date, end_date, status, created_at
        FROM absence_requests
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Everything the derivation engine needs for one user.
async fn load_derivation_inputs(
    pool: &MySqlPool,
    user_id: u64,
) -> Result<(Vec<AttendanceRecord>, Vec<AbsenceRequest>), sqlx::Error> {
    let history = load_history(pool, user_id).await?;
    let requests = load_requests(pool, user_id).await?;
    Ok((history, requests))
}

/// Derived-status endpoint
#[utoipa::path(
    get,
    path = "/api/attendance/status",
    responses(
        (status = 200, description = "Derived attendance state", body = Object, example = json!({
            "state": "checked-in",
            "label": "Checked In",
            "latest": {
                "id": 1,
                "user_id": 42,
                "date": "2026-01-05",
                "check_in_time": "2026-01-05T08:55:00Z",
                "check_out_time": null,
                "status": "Present",
                "created_at": "2026-01-05T08:55:00Z"
            }
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn my_status(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let (history, requests) = load_derivation_inputs(pool.get_ref(), auth.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, "Failed to load attendance state");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let derived = derive_status(&history, &requests, Local::now().date_naive());

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "state": derived.state,
        "label": derived.label,
        "latest": derived.latest,
    })))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully",
            "status": "Present"
        })),
        (status = 400, description = "Check-in not allowed in the current state", body = Object, example = json!({
            "message": "Check-in not allowed while Checked In"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let (history, requests) = load_derivation_inputs(pool.get_ref(), auth.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, "Failed to load attendance state");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let now = Local::now();
    let derived = derive_status(&history, &requests, now.date_naive());

    // Second check-in without an intervening check-out must not create a
    // second open record.
    if !derived.state.allows_check_in() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": format!("Check-in not allowed while {}", derived.label)
        })));
    }

    let status = classify_check_in(now.time(), config.late_after_hour);

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (user_id, date, check_in_time, check_out_time, status)
        VALUES (?, ?, ?, NULL, ?)
        "#,
    )
    .bind(auth.user_id)
    .bind(now.date_naive())
    .bind(now.with_timezone(&Utc))
    .bind(status)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Checked in successfully",
            "status": status
        }))),
        Err(e) => {
            tracing::error!(error = %e, user_id = auth.user_id, "Check-in failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No open session to check out from", body = Object, example = json!({
            "message": "No active check-in found to check out from."
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let (history, requests) = load_derivation_inputs(pool.get_ref(), auth.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, "Failed to load attendance state");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let derived = derive_status(&history, &requests, Local::now().date_naive());

    if !derived.state.allows_check_out() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": format!("Check-out not allowed while {}", derived.label)
        })));
    }

    // The derived state said checked-in, but the open row may have been
    // closed meanwhile; that race is reported, never a crash.
    let open: Option<(u64,)> = sqlx::query_as(
        r#"
        SELECT id
        FROM attendance
        WHERE user_id = ? AND check_out_time IS NULL
        ORDER BY check_in_time DESC
        LIMIT 1
        "#,
    )
    .bind(auth.user_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, user_id = auth.user_id, "Failed to find open session");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some((record_id,)) = open else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "No active check-in found to check out from."
        })));
    };

    sqlx::query("UPDATE attendance SET check_out_time = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(record_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, record_id, "Check-out failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked out successfully"
    })))
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceFilter {
    /// Restrict to one user (admin only; employees always see their own)
    #[schema(example = 42)]
    pub user_id: Option<u64>,
}

/// Attendance history endpoint
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Attendance records, newest first", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let scope = match auth.role {
        Role::Admin => query.user_id,
        Role::Employee => Some(auth.user_id),
    };

    let records = match scope {
        Some(user_id) => load_history(pool.get_ref(), user_id).await,
        None => load_all_history(pool.get_ref()).await,
    }
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch attendance list");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(records))
}
