use crate::auth::auth::AuthUser;
use crate::model::profile::Profile;
use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;

pub(crate) async fn load_profile(
    pool: &MySqlPool,
    user_id: u64,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT user_id, full_name, email, role
        FROM profiles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn load_all_profiles(pool: &MySqlPool) -> Result<Vec<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT user_id, full_name, email, role
        FROM profiles
        ORDER BY full_name
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Own-profile endpoint
#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "Caller's profile", body = Profile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found", body = Object, example = json!({
            "message": "Profile not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profile"
)]
pub async fn me(auth: AuthUser, pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let profile = load_profile(pool.get_ref(), auth.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, "Failed to fetch profile");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match profile {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Profile not found"
        }))),
    }
}

/// Profile list endpoint
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "All profiles", body = [Profile]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profile"
)]
pub async fn list_profiles(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let profiles = load_all_profiles(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch profiles");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(profiles))
}
