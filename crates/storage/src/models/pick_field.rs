/// Attributes of a pick, with their API-facing and storage-facing names.
///
/// This is the one place where the camelCase names exposed over HTTP are
/// paired with the snake_case columns of the `picks` table. Query building,
/// partial updates and validation messages all resolve names through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickField {
    PickId,
    UserId,
    LeagueId,
    RaceId,
    P10DriverId,
    FirstRetirementDriverId,
    FastestLapDriverId,
    SubmittedAt,
}

impl PickField {
    pub const ALL: [PickField; 8] = [
        Self::PickId,
        Self::UserId,
        Self::LeagueId,
        Self::RaceId,
        Self::P10DriverId,
        Self::FirstRetirementDriverId,
        Self::FastestLapDriverId,
        Self::SubmittedAt,
    ];

    /// Fields a client may write through create, replace or partial update.
    pub const MUTABLE: [PickField; 6] = [
        Self::UserId,
        Self::LeagueId,
        Self::RaceId,
        Self::P10DriverId,
        Self::FirstRetirementDriverId,
        Self::FastestLapDriverId,
    ];

    pub fn api_name(&self) -> &'static str {
        match self {
            Self::PickId => "pickId",
            Self::UserId => "userId",
            Self::LeagueId => "leagueId",
            Self::RaceId => "raceId",
            Self::P10DriverId => "p10DriverId",
            Self::FirstRetirementDriverId => "firstRetirementDriverId",
            Self::FastestLapDriverId => "fastestLapDriverId",
            Self::SubmittedAt => "submittedAt",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::PickId => "pick_id",
            Self::UserId => "user_id",
            Self::LeagueId => "league_id",
            Self::RaceId => "race_id",
            Self::P10DriverId => "p10_driver_id",
            Self::FirstRetirementDriverId => "first_retirement_driver_id",
            Self::FastestLapDriverId => "fastest_lap_driver_id",
            Self::SubmittedAt => "submitted_at",
        }
    }

    pub fn from_api_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.api_name() == name)
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == column)
    }

    /// Whether the column is declared NOT NULL.
    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            Self::P10DriverId | Self::FirstRetirementDriverId | Self::FastestLapDriverId
        )
    }

    /// Comma separated column list in canonical order, for SELECT and RETURNING.
    pub fn column_list() -> String {
        Self::ALL
            .iter()
            .map(PickField::column)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_are_inverse() {
        for field in PickField::ALL {
            assert_eq!(PickField::from_api_name(field.api_name()), Some(field));
            assert_eq!(PickField::from_column(field.column()), Some(field));
        }
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert_eq!(PickField::from_api_name("user_id"), None);
        assert_eq!(PickField::from_column("userId"), None);
        assert_eq!(PickField::from_api_name("points"), None);
    }

    #[test]
    fn test_mutable_fields_exclude_store_assigned() {
        assert!(!PickField::MUTABLE.contains(&PickField::PickId));
        assert!(!PickField::MUTABLE.contains(&PickField::SubmittedAt));
        assert_eq!(
            PickField::MUTABLE.iter().filter(|f| f.is_required()).count(),
            3
        );
    }

    #[test]
    fn test_column_list_order() {
        assert_eq!(
            PickField::column_list(),
            "pick_id, user_id, league_id, race_id, p10_driver_id, \
             first_retirement_driver_id, fastest_lap_driver_id, submitted_at"
        );
    }
}
