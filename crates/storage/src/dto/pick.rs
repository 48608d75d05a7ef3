use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{NewPick, Pick, PickChange, PickField, PickFilter};

use super::common::PaginationParams;

/// A pick as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PickResponse {
    #[serde(rename = "pickId")]
    pub pick_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "leagueId")]
    pub league_id: String,
    #[serde(rename = "raceId")]
    pub race_id: String,
    #[serde(rename = "p10DriverId")]
    pub p10_driver_id: Option<String>,
    #[serde(rename = "firstRetirementDriverId")]
    pub first_retirement_driver_id: Option<String>,
    #[serde(rename = "fastestLapDriverId")]
    pub fastest_lap_driver_id: Option<String>,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl From<Pick> for PickResponse {
    fn from(pick: Pick) -> Self {
        Self {
            pick_id: pick.pick_id,
            user_id: pick.user_id,
            league_id: pick.league_id,
            race_id: pick.race_id,
            p10_driver_id: pick.p10_driver_id,
            first_retirement_driver_id: pick.first_retirement_driver_id,
            fastest_lap_driver_id: pick.fastest_lap_driver_id,
            submitted_at: pick.submitted_at,
        }
    }
}

/// Page of picks returned by `GET /picks`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PickListResponse {
    pub items: Vec<PickResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPicksQuery {
    /// Only picks of this user
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// Only picks in this league
    #[serde(rename = "leagueId")]
    pub league_id: Option<String>,
    /// Only picks for this race
    #[serde(rename = "raceId")]
    pub race_id: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ListPicksQuery {
    pub fn into_filter(self) -> Result<PickFilter, String> {
        let page = self.pagination.validate()?;

        Ok(PickFilter {
            user_id: non_empty(self.user_id),
            league_id: non_empty(self.league_id),
            race_id: non_empty(self.race_id),
            limit: page.limit,
            offset: page.offset,
        })
    }
}

/// Body of `POST /picks` and `PUT /picks/{pickId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePickRequest {
    #[serde(rename = "userId")]
    #[validate(
        required(message = "userId is required"),
        length(min = 1, message = "userId is required")
    )]
    pub user_id: Option<String>,

    #[serde(rename = "leagueId")]
    #[validate(
        required(message = "leagueId is required"),
        length(min = 1, message = "leagueId is required")
    )]
    pub league_id: Option<String>,

    #[serde(rename = "raceId")]
    #[validate(
        required(message = "raceId is required"),
        length(min = 1, message = "raceId is required")
    )]
    pub race_id: Option<String>,

    #[serde(rename = "p10DriverId")]
    pub p10_driver_id: Option<String>,

    #[serde(rename = "firstRetirementDriverId")]
    pub first_retirement_driver_id: Option<String>,

    #[serde(rename = "fastestLapDriverId")]
    pub fastest_lap_driver_id: Option<String>,
}

impl CreatePickRequest {
    /// Validates the required identifiers and builds the row to write.
    pub fn into_new_pick(self) -> Result<NewPick, ValidationErrors> {
        self.validate()?;

        match (self.user_id, self.league_id, self.race_id) {
            (Some(user_id), Some(league_id), Some(race_id)) => Ok(NewPick {
                user_id,
                league_id,
                race_id,
                p10_driver_id: self.p10_driver_id,
                first_retirement_driver_id: self.first_retirement_driver_id,
                fastest_lap_driver_id: self.fastest_lap_driver_id,
            }),
            _ => Err(ValidationErrors::new()),
        }
    }
}

/// Distinguishes a field sent as `null` from a field left out.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Body of `PATCH /picks/{pickId}`; only fields present in the JSON are written.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePickRequest {
    #[serde(rename = "userId", default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub user_id: Option<Option<String>>,

    #[serde(rename = "leagueId", default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub league_id: Option<Option<String>>,

    #[serde(rename = "raceId", default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub race_id: Option<Option<String>>,

    #[serde(rename = "p10DriverId", default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub p10_driver_id: Option<Option<String>>,

    #[serde(rename = "firstRetirementDriverId", default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub first_retirement_driver_id: Option<Option<String>>,

    #[serde(rename = "fastestLapDriverId", default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub fastest_lap_driver_id: Option<Option<String>>,
}

fn required_error(field: PickField, value: &Option<String>) -> Option<ValidationError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => None,
        Some(_) => Some(("empty", format!("{} must not be empty", field.api_name()))),
        None => Some(("null", format!("{} cannot be null", field.api_name()))),
    }
    .map(|(code, message)| {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    })
}

impl Validate for UpdatePickRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let required = [
            ("user_id", PickField::UserId, &self.user_id),
            ("league_id", PickField::LeagueId, &self.league_id),
            ("race_id", PickField::RaceId, &self.race_id),
        ];
        for (name, field, value) in required {
            if let Some(value) = value
                && let Some(error) = required_error(field, value)
            {
                errors.add(name, error);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UpdatePickRequest {
    /// Column assignments for every field present in the body, in table order.
    pub fn into_changes(self) -> Result<Vec<PickChange>, ValidationErrors> {
        self.validate()?;

        let changes = [
            self.user_id.flatten().map(PickChange::UserId),
            self.league_id.flatten().map(PickChange::LeagueId),
            self.race_id.flatten().map(PickChange::RaceId),
            self.p10_driver_id.map(PickChange::P10DriverId),
            self.first_retirement_driver_id
                .map(PickChange::FirstRetirementDriverId),
            self.fastest_lap_driver_id.map(PickChange::FastestLapDriverId),
        ];

        Ok(changes.into_iter().flatten().collect())
    }
}
