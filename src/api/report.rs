use crate::api::attendance::{load_all_history, load_history};
use crate::api::profile::{load_all_profiles, load_profile};
use crate::auth::auth::AuthUser;
use crate::core::summary::{RawReportRow, SummaryRow, raw_rows, summarize_per_user};
use crate::model::role::Role;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RawReportQuery {
    /// Restrict to one user (admin only; employees always get their own)
    #[schema(example = 42)]
    pub user_id: Option<u64>,
}

/// Summary report endpoint: one row per employee for admins, the caller's
/// own row otherwise. The row shape is what the report renderer consumes.
#[utoipa::path(
    get,
    path = "/api/report/summary",
    responses(
        (status = 200, description = "Per-employee summary rows", body = [SummaryRow]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Report"
)]
pub async fn summary_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let rows = match auth.role {
        Role::Admin => {
            let profiles = load_all_profiles(pool.get_ref()).await.map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch profiles for summary");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
            let records = load_all_history(pool.get_ref()).await.map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch attendance for summary");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
            summarize_per_user(&profiles, &records)
        }
        Role::Employee => {
            let profile = load_profile(pool.get_ref(), auth.user_id)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, user_id = auth.user_id, "Failed to fetch profile for summary");
                    actix_web::error::ErrorInternalServerError("Internal Server Error")
                })?;

            let Some(profile) = profile else {
                return Ok(HttpResponse::NotFound().json(serde_json::json!({
                    "message": "Profile not found"
                })));
            };

            let records = load_history(pool.get_ref(), auth.user_id)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, user_id = auth.user_id, "Failed to fetch attendance for summary");
                    actix_web::error::ErrorInternalServerError("Internal Server Error")
                })?;

            summarize_per_user(std::slice::from_ref(&profile), &records)
        }
    };

    Ok(HttpResponse::Ok().json(rows))
}

/// Raw report endpoint: every record with its rendered work span, newest
/// first, ready for export.
#[utoipa::path(
    get,
    path = "/api/report/raw",
    params(RawReportQuery),
    responses(
        (status = 200, description = "Raw report rows", body = [RawReportRow]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Report"
)]
pub async fn raw_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<RawReportQuery>,
) -> actix_web::Result<impl Responder> {
    let scope = if auth.is_admin() {
        query.user_id
    } else {
        Some(auth.user_id)
    };

    let records = match scope {
        Some(user_id) => load_history(pool.get_ref(), user_id).await,
        None => load_all_history(pool.get_ref()).await,
    }
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch attendance for raw report");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(raw_rows(&records)))
}
