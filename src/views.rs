//! Output representations.
//!
//! Each view names the fields it carries, so the Episode -> Appearance -> Episode
//! cycle never expands:
//!
//! | view                | fields                                              |
//! |---------------------|-----------------------------------------------------|
//! | `EpisodeView`       | id, date, number                                    |
//! | `GuestView`         | id, name, occupation                                |
//! | `EpisodeDetail`     | id, date, number, appearances[`AppearanceView`]     |
//! | `AppearanceView`    | id, rating, episode_id, guest_id, guest[`GuestView`] |
//! | `AppearanceCreated` | id, rating, episode_id, guest_id, episode, guest    |

use crate::model::{Appearance, AppearanceWithGuest, Episode, Guest};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeView {
    pub id: i64,
    pub date: Option<String>,
    pub number: Option<i64>,
}

impl From<&Episode> for EpisodeView {
    fn from(e: &Episode) -> Self {
        Self {
            id: e.id,
            date: e.date.clone(),
            number: e.number,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GuestView {
    pub id: i64,
    pub name: Option<String>,
    pub occupation: String,
}

impl From<&Guest> for GuestView {
    fn from(g: &Guest) -> Self {
        Self {
            id: g.id,
            name: g.name.clone(),
            occupation: g.occupation.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppearanceView {
    pub id: i64,
    pub rating: i64,
    pub episode_id: i64,
    pub guest_id: i64,
    pub guest: GuestView,
}

impl From<&AppearanceWithGuest> for AppearanceView {
    fn from(a: &AppearanceWithGuest) -> Self {
        Self {
            id: a.id,
            rating: a.rating,
            episode_id: a.episode_id,
            guest_id: a.guest_id,
            guest: GuestView::from(&a.guest()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeDetail {
    pub id: i64,
    pub date: Option<String>,
    pub number: Option<i64>,
    pub appearances: Vec<AppearanceView>,
}

impl EpisodeDetail {
    pub fn new(episode: &Episode, appearances: &[AppearanceWithGuest]) -> Self {
        Self {
            id: episode.id,
            date: episode.date.clone(),
            number: episode.number,
            appearances: appearances.iter().map(AppearanceView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppearanceCreated {
    pub id: i64,
    pub rating: i64,
    pub episode_id: i64,
    pub guest_id: i64,
    pub episode: EpisodeView,
    pub guest: GuestView,
}

impl AppearanceCreated {
    pub fn new(appearance: &Appearance, episode: &Episode, guest: &Guest) -> Self {
        Self {
            id: appearance.id,
            rating: appearance.rating,
            episode_id: appearance.episode_id,
            guest_id: appearance.guest_id,
            episode: EpisodeView::from(episode),
            guest: GuestView::from(guest),
        }
    }
}
