//! Review Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Review moderation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Hidden,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Hidden => "hidden",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }
}

/// Review entity (customer testimonial)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    /// Null when the reviewer chose to stay anonymous
    pub name: Option<String>,
    pub is_anonymous: bool,
    /// Integer in [1,5] when present
    pub rating: Option<i64>,
    pub comment: Option<String>,
    pub status: ReviewStatus,
    pub helpful_count: i64,
    pub created_at: i64,
}

/// Public view of an approved review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPublic {
    pub id: i64,
    pub name: Option<String>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
    pub helpful_count: i64,
    pub created_at: i64,
}

impl From<Review> for ReviewPublic {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            name: if review.is_anonymous {
                None
            } else {
                review.name
            },
            rating: review.rating,
            comment: review.comment,
            helpful_count: review.helpful_count,
            created_at: review.created_at,
        }
    }
}

/// Create review payload (public endpoint)
///
/// At least one of rating/comment is required; checked in the handler since
/// the constraint spans two fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewCreate {
    #[validate(length(max = 128))]
    pub name: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Moderation payload (plain string so unknown statuses get a domain error)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStatusUpdate {
    pub status: String,
}
