//! Authentication Handlers
//!
//! Login, token refresh, logout, and password reset requests. The refresh
//! token never leaves the httpOnly cookie; only the access token travels in
//! response bodies.

use std::time::Duration;

use axum::{Json, extract::State};
use http::{HeaderMap, header};
use uuid::Uuid;

use crate::auth::jwt::TOKEN_TYPE_REFRESH;
use crate::core::ServerState;
use crate::db::repository;
use crate::utils::cookies::{self, REFRESH_COOKIE, REFRESH_COOKIE_PATH};
use crate::utils::{AppError, AppResult};
use shared::client::{
    LoginRequest, LoginResponse, PasswordResetRequest, RefreshResponse, UserInfo,
};

/// Fixed delay for authentication to blunt timing probes
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Reset tokens live for 15 minutes
const RESET_TOKEN_TTL_MS: i64 = 15 * 60 * 1000;

type WithCookie<T> = ([(header::HeaderName, String); 1], Json<T>);

fn with_cookie<T>(cookie: String, body: T) -> WithCookie<T> {
    ([(header::SET_COOKIE, cookie)], Json(body))
}

/// POST /api/auth/login
///
/// Verifies credentials, mints a session row plus an access/refresh token
/// pair. The refresh token is set as an httpOnly cookie scoped to the auth
/// endpoints.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<WithCookie<LoginResponse>> {
    let user = repository::user::find_by_email(&state.pool, &req.email).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message so neither field is revealed as the wrong one
    let user = match user {
        Some(u) => {
            let password_valid =
                crate::auth::password::verify_password(&req.password, &u.password_hash)
                    .map_err(|e| {
                        AppError::internal(format!("Password verification failed: {e}"))
                    })?;
            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::with_message(
                    shared::ErrorCode::InvalidCredentials,
                    "Invalid email or password",
                ));
            }
            u
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::with_message(
                shared::ErrorCode::InvalidCredentials,
                "Invalid email or password",
            ));
        }
    };

    let now = shared::util::now_millis();

    // Lazy cleanup of this user's expired sessions
    repository::session::purge_expired(&state.pool, user.id, now).await?;

    let session_id = Uuid::new_v4().to_string();
    let expires_at = now + state.jwt_service.refresh_expires_in() * 1000;
    repository::session::create(&state.pool, &session_id, user.id, expires_at).await?;

    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
    let refresh_token = state
        .jwt_service
        .generate_refresh_token(user.id, &user.email, &session_id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    let cookie = cookies::build_cookie(
        REFRESH_COOKIE,
        &refresh_token,
        state.jwt_service.refresh_expires_in(),
        REFRESH_COOKIE_PATH,
        state.config.is_production(),
    );

    tracing::info!(user_id = user.id, email = %user.email, "User logged in");

    Ok(with_cookie(
        cookie,
        LoginResponse {
            access_token,
            expires_in: state.jwt_service.access_expires_in(),
            user: UserInfo {
                id: user.id,
                email: user.email,
            },
        },
    ))
}

/// POST /api/auth/refresh
///
/// Validates the refresh cookie against the stored session and issues a
/// fresh access token. An expired session row is rejected even while it
/// still exists (expiry is checked here, cleanup happens on login).
pub async fn refresh(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<RefreshResponse>> {
    let token = cookies::get_cookie(&headers, REFRESH_COOKIE)
        .ok_or_else(AppError::not_authenticated)?;

    let claims = state
        .jwt_service
        .validate_token(&token)
        .map_err(|e| match e {
            crate::auth::JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid refresh token"),
        })?;
    if claims.token_type != TOKEN_TYPE_REFRESH {
        return Err(AppError::invalid_token("Not a refresh token"));
    }
    let session_id = claims
        .sid
        .ok_or_else(|| AppError::invalid_token("Refresh token without session"))?;

    let session = repository::session::find_by_id(&state.pool, &session_id)
        .await?
        .ok_or_else(AppError::session_expired)?;

    let now = shared::util::now_millis();
    if session.is_expired(now) {
        return Err(AppError::session_expired());
    }

    let user = repository::user::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(AppError::session_expired)?;

    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(Json(RefreshResponse {
        access_token,
        expires_in: state.jwt_service.access_expires_in(),
    }))
}

/// POST /api/auth/logout
///
/// Best-effort: a missing or invalid cookie is tolerated. The session row is
/// removed when it can be identified and the cookie is always cleared.
pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<WithCookie<()>> {
    if let Some(token) = cookies::get_cookie(&headers, REFRESH_COOKIE)
        && let Ok(claims) = state.jwt_service.validate_token(&token)
        && claims.token_type == TOKEN_TYPE_REFRESH
        && let Some(session_id) = claims.sid
    {
        let removed = repository::session::delete(&state.pool, &session_id).await?;
        if removed {
            tracing::info!(session_id = %session_id, "Session revoked");
        }
    }

    let cookie = cookies::clear_cookie(REFRESH_COOKIE, REFRESH_COOKIE_PATH);
    Ok(with_cookie(cookie, ()))
}

/// POST /api/auth/request-password-reset
///
/// Stores a single-use reset token and emails the reset link. The response
/// is a generic 200 whether or not the account exists.
pub async fn request_password_reset(
    State(state): State<ServerState>,
    Json(req): Json<PasswordResetRequest>,
) -> AppResult<Json<()>> {
    let user = repository::user::find_by_email(&state.pool, &req.email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if let Some(user) = user {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = shared::util::now_millis() + RESET_TOKEN_TTL_MS;
        repository::user::set_reset_token(&state.pool, user.id, &token, expires_at).await?;

        let origin = state
            .config
            .frontend_origin
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", state.config.http_port));
        state.mailer.send(
            user.email.clone(),
            "Password reset".to_string(),
            format!("Reset your password: {origin}/reset-password?token={token}"),
        );
        tracing::info!(user_id = user.id, "Password reset token issued");
    } else {
        tracing::info!(email = %req.email, "Password reset requested for unknown email");
    }

    Ok(Json(()))
}
