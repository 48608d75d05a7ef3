use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::PickField;

/// A row of the `picks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Pick {
    pub pick_id: Uuid,
    pub user_id: String,
    pub league_id: String,
    pub race_id: String,
    pub p10_driver_id: Option<String>,
    pub first_retirement_driver_id: Option<String>,
    pub fastest_lap_driver_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Values written by an insert or a full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPick {
    pub user_id: String,
    pub league_id: String,
    pub race_id: String,
    pub p10_driver_id: Option<String>,
    pub first_retirement_driver_id: Option<String>,
    pub fastest_lap_driver_id: Option<String>,
}

impl NewPick {
    /// The full replacement expressed as one change per mutable field.
    pub fn changes(&self) -> Vec<PickChange> {
        vec![
            PickChange::UserId(self.user_id.clone()),
            PickChange::LeagueId(self.league_id.clone()),
            PickChange::RaceId(self.race_id.clone()),
            PickChange::P10DriverId(self.p10_driver_id.clone()),
            PickChange::FirstRetirementDriverId(self.first_retirement_driver_id.clone()),
            PickChange::FastestLapDriverId(self.fastest_lap_driver_id.clone()),
        ]
    }
}

/// A single column assignment of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickChange {
    UserId(String),
    LeagueId(String),
    RaceId(String),
    P10DriverId(Option<String>),
    FirstRetirementDriverId(Option<String>),
    FastestLapDriverId(Option<String>),
}

impl PickChange {
    pub fn field(&self) -> PickField {
        match self {
            Self::UserId(_) => PickField::UserId,
            Self::LeagueId(_) => PickField::LeagueId,
            Self::RaceId(_) => PickField::RaceId,
            Self::P10DriverId(_) => PickField::P10DriverId,
            Self::FirstRetirementDriverId(_) => PickField::FirstRetirementDriverId,
            Self::FastestLapDriverId(_) => PickField::FastestLapDriverId,
        }
    }

    /// The value to bind; `None` writes SQL NULL.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::UserId(v) | Self::LeagueId(v) | Self::RaceId(v) => Some(v.as_str()),
            Self::P10DriverId(v)
            | Self::FirstRetirementDriverId(v)
            | Self::FastestLapDriverId(v) => v.as_deref(),
        }
    }

    pub fn apply(&self, pick: &mut Pick) {
        match self {
            Self::UserId(v) => pick.user_id = v.clone(),
            Self::LeagueId(v) => pick.league_id = v.clone(),
            Self::RaceId(v) => pick.race_id = v.clone(),
            Self::P10DriverId(v) => pick.p10_driver_id = v.clone(),
            Self::FirstRetirementDriverId(v) => pick.first_retirement_driver_id = v.clone(),
            Self::FastestLapDriverId(v) => pick.fastest_lap_driver_id = v.clone(),
        }
    }
}

/// Equality filters and page window for listing picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickFilter {
    pub user_id: Option<String>,
    pub league_id: Option<String>,
    pub race_id: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl PickFilter {
    /// Active equality conditions as (field, value) pairs.
    pub fn conditions(&self) -> Vec<(PickField, &str)> {
        [
            (PickField::UserId, self.user_id.as_deref()),
            (PickField::LeagueId, self.league_id.as_deref()),
            (PickField::RaceId, self.race_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    pub fn matches(&self, pick: &Pick) -> bool {
        self.conditions().into_iter().all(|(field, value)| match field {
            PickField::UserId => pick.user_id == value,
            PickField::LeagueId => pick.league_id == value,
            PickField::RaceId => pick.race_id == value,
            _ => true,
        })
    }
}

/// One page of picks plus the number of rows matching the filter overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickPage {
    pub items: Vec<Pick>,
    pub total: i64,
}
