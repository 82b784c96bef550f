//! Review Handlers
//!
//! Public submission and helpful votes are rate-limited with long-lived
//! httpOnly marker cookies rather than accounts: one review per client, one
//! helpful vote per review per client. Moderation is admin-only.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::{HeaderMap, header};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository;
use crate::utils::cookies::{self, REVIEW_SUBMITTED_COOKIE, SIX_MONTHS_SECS};
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{
    NotificationKind, Page, ReviewCreate, ReviewPublic, ReviewStatus, ReviewStatusUpdate,
};

type WithCookie<T> = ([(header::HeaderName, String); 1], Json<T>);

fn with_cookie<T>(cookie: String, body: T) -> WithCookie<T> {
    ([(header::SET_COOKIE, cookie)], Json(body))
}

/// POST /api/reviews (public, cookie rate-limited)
///
/// A client already holding the submission marker gets a 429. On success the
/// marker cookie is set and the review lands in the moderation queue.
pub async fn create_review(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(req): Json<ReviewCreate>,
) -> AppResult<WithCookie<ReviewPublic>> {
    if cookies::get_cookie(&headers, REVIEW_SUBMITTED_COOKIE).is_some() {
        return Err(AppError::new(ErrorCode::ReviewAlreadySubmitted));
    }

    if req.rating.is_none() && req.comment.as_deref().is_none_or(|c| c.trim().is_empty()) {
        return Err(AppError::new(ErrorCode::ReviewEmpty));
    }
    if let Some(rating) = req.rating
        && !(1..=5).contains(&rating)
    {
        return Err(AppError::with_message(
            ErrorCode::RatingOutOfRange,
            format!("Rating must be between 1 and 5, got {rating}"),
        ));
    }
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let review = repository::review::create(&state.pool, req).await?;

    let message = match (&review.name, review.is_anonymous) {
        (Some(name), false) => format!("New review from {name}"),
        _ => "New anonymous review".to_string(),
    };
    repository::notification::create(&state.pool, NotificationKind::Review, &message, review.id)
        .await?;

    state.mailer.send_to_admin(
        "New review awaiting moderation",
        format!(
            "Rating: {}\n{}",
            review
                .rating
                .map_or_else(|| "-".to_string(), |r| r.to_string()),
            review.comment.as_deref().unwrap_or("")
        ),
    );

    tracing::info!(review_id = review.id, "Review submitted");

    let cookie = cookies::build_cookie(
        REVIEW_SUBMITTED_COOKIE,
        "1",
        SIX_MONTHS_SECS,
        "/",
        state.config.is_production(),
    );
    Ok(with_cookie(cookie, ReviewPublic::from(review)))
}

#[derive(Debug, Deserialize)]
pub struct ApprovedQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/reviews/approved (public)
pub async fn list_approved(
    State(state): State<ServerState>,
    Query(query): Query<ApprovedQuery>,
) -> AppResult<Json<Page<ReviewPublic>>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or_else(repository::review::default_limit);
    let reviews = repository::review::list_approved(&state.pool, page, limit).await?;
    Ok(Json(reviews.map(ReviewPublic::from)))
}

/// PUT /api/reviews/{id}/status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<ReviewStatusUpdate>,
) -> AppResult<Json<ReviewPublic>> {
    let Some(status) = ReviewStatus::parse(&req.status) else {
        return Err(AppError::validation(format!(
            "Unknown review status: {}",
            req.status
        )));
    };

    let review = repository::review::update_status(&state.pool, id, status).await?;
    tracing::info!(review_id = id, status = status.as_str(), "Review moderated");
    Ok(Json(ReviewPublic::from(review)))
}

/// PUT /api/reviews/{id}/helpful (public, cookie-gated)
///
/// Each client may vote once per review; the per-review marker cookie blocks
/// repeats with a 429.
pub async fn mark_helpful(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AppResult<WithCookie<ReviewPublic>> {
    let marker = cookies::review_liked_cookie(id);
    if cookies::get_cookie(&headers, &marker).is_some() {
        return Err(AppError::new(ErrorCode::ReviewAlreadyVoted));
    }

    let review = repository::review::increment_helpful(&state.pool, id).await?;

    let cookie = cookies::build_cookie(
        &marker,
        "1",
        SIX_MONTHS_SECS,
        "/",
        state.config.is_production(),
    );
    Ok(with_cookie(cookie, ReviewPublic::from(review)))
}
