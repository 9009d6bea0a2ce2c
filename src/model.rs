//! Rows of the three tables and the write-side inputs that create them.

use crate::error::{AppError, RATING_OUT_OF_RANGE};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Episode {
    pub id: i64,
    pub date: Option<String>,
    pub number: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Guest {
    pub id: i64,
    pub name: Option<String>,
    pub occupation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Appearance {
    pub id: i64,
    pub rating: i64,
    pub episode_id: i64,
    pub guest_id: i64,
}

/// An appearance row joined with the guest it references.
#[derive(Debug, Clone, FromRow)]
pub struct AppearanceWithGuest {
    pub id: i64,
    pub rating: i64,
    pub episode_id: i64,
    pub guest_id: i64,
    pub guest_name: Option<String>,
    pub guest_occupation: String,
}

impl AppearanceWithGuest {
    pub fn guest(&self) -> Guest {
        Guest {
            id: self.guest_id,
            name: self.guest_name.clone(),
            occupation: self.guest_occupation.clone(),
        }
    }
}

/// Appearance rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn get(self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(AppError::Validation(RATING_OUT_OF_RANGE.into()))
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let n = i64::deserialize(deserializer)?;
        Rating::try_from(n).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEpisode {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: Option<String>,
    pub number: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGuest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub occupation: String,
}

/// Explicit join-row construction: one guest, one episode, one rating.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAppearance {
    pub rating: Rating,
    pub episode_id: i64,
    pub guest_id: i64,
}

impl NewAppearance {
    pub fn new(rating: Rating, episode: &Episode, guest: &Guest) -> Self {
        Self {
            rating,
            episode_id: episode.id,
            guest_id: guest.id,
        }
    }
}
