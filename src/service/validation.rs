//! Form input rules shared by the team and player handlers.

use crate::db::LeagueStorage;
use crate::error::LeagueError;
use std::ops::RangeInclusive;

pub const NAME_LENGTH: RangeInclusive<usize> = 1..=50;
pub const SEASON_POINTS: RangeInclusive<i64> = 0..=3000;

pub const NAME_LENGTH_ERROR: &str = "Name must be between 1 and 50 characters long!";
pub const POINTS_NOT_INTEGER_ERROR: &str = "Points entered have to be a valid integer!";
pub const POINTS_RANGE_ERROR: &str = "You can only score between 0 and 3000 points in a season! \
There are ten games and the max points per game is 300. \
Please enter a number in that range.";
pub const TEAM_NAME_TAKEN_ERROR: &str = "This team name already exists, new name must be unique!";

/// Parse a form or path value as an integer, tolerating surrounding whitespace.
pub fn to_i(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Message for a name whose character count falls outside 1..=50.
pub fn error_for_name(name: &str) -> Option<&'static str> {
    (!NAME_LENGTH.contains(&name.chars().count())).then_some(NAME_LENGTH_ERROR)
}

/// `true` for an optionally signed run of ASCII digits, whatever its magnitude.
fn is_integer_literal(input: &str) -> bool {
    let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Points as a season total, or the message explaining why the input is not one.
///
/// Integers too large for `i64` are still integers, so they fail the range rule.
pub fn parse_score(points: &str) -> Result<i64, &'static str> {
    let Some(points) = to_i(points) else {
        return Err(if is_integer_literal(points.trim()) {
            POINTS_RANGE_ERROR
        } else {
            POINTS_NOT_INTEGER_ERROR
        });
    };
    if SEASON_POINTS.contains(&points) {
        Ok(points)
    } else {
        Err(POINTS_RANGE_ERROR)
    }
}

/// Message for points that are not an integer or not a possible season total.
pub fn error_for_score(points: &str) -> Option<&'static str> {
    parse_score(points).err()
}

/// Message when another team (not `excluded_id`) already has `team_name`.
pub async fn error_not_unique(
    storage: &LeagueStorage,
    team_name: &str,
    excluded_id: i64,
) -> Result<Option<&'static str>, LeagueError> {
    let taken = storage.check_unique_team_name(team_name, excluded_id).await?;
    Ok(taken.then_some(TEAM_NAME_TAKEN_ERROR))
}
