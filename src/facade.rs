//! Outcome-code surface over the store and the reports
//!
//! Nothing here returns an error. Mutations answer with an [`Outcome`],
//! profile lookups fall back to a placeholder entity and reports fall back to
//! a neutral value. Every swallowed error is logged.

use std::fmt;

use rusqlite::Connection;
use tracing::warn;

use crate::{
	data::{Match, MatchId, Player, PlayerId, Stadium, StadiumId, TeamId},
	error::{ConstraintKind, DbError, DbResult},
	reports, store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Ok,
	Error,
	BadParams,
	AlreadyExists,
	NotExists,
}

impl fmt::Display for Outcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Outcome::Ok => "OK",
			Outcome::Error => "ERROR",
			Outcome::BadParams => "BAD_PARAMS",
			Outcome::AlreadyExists => "ALREADY_EXISTS",
			Outcome::NotExists => "NOT_EXISTS",
		};
		f.write_str(s)
	}
}

/// What a dangling reference means for an insert.
#[derive(Clone, Copy)]
enum Reference {
	/// The referenced row is part of the entity being described.
	Attribute,
	/// The statement links two rows that must already exist.
	Link,
}

fn insert_outcome(op: &str, result: DbResult<()>, reference: Reference) -> Outcome {
	let err = match result {
		Ok(()) => return Outcome::Ok,
		Err(err) => err,
	};

	let outcome = match err.constraint() {
		Some(ConstraintKind::Unique) => Outcome::AlreadyExists,
		Some(ConstraintKind::ForeignKey) => match reference {
			Reference::Attribute => Outcome::BadParams,
			Reference::Link => Outcome::NotExists,
		},
		Some(ConstraintKind::NotNull | ConstraintKind::Check) => Outcome::BadParams,
		Some(ConstraintKind::Other) | None => Outcome::Error,
	};
	if outcome == Outcome::Error {
		warn!(op, error = %err, "insert failed");
	}

	outcome
}

fn delete_outcome(op: &str, result: DbResult<bool>) -> Outcome {
	match result {
		Ok(true) => Outcome::Ok,
		Ok(false) => Outcome::NotExists,
		Err(err) => {
			warn!(op, error = %err, "delete failed");
			Outcome::Error
		}
	}
}

fn or_fallback<T>(op: &str, result: DbResult<T>, fallback: T) -> T {
	result.unwrap_or_else(|err: DbError| {
		warn!(op, error = %err, "query failed");
		fallback
	})
}

pub fn add_team(conn: &Connection, id: TeamId) -> Outcome {
	insert_outcome("add_team", store::add_team(conn, id), Reference::Attribute)
}

pub fn delete_team(conn: &Connection, id: TeamId) -> Outcome {
	delete_outcome("delete_team", store::delete_team(conn, id))
}

pub fn add_match(conn: &Connection, m: &Match) -> Outcome {
	insert_outcome("add_match", store::add_match(conn, m), Reference::Attribute)
}

pub fn get_match_profile(conn: &Connection, id: MatchId) -> Match {
	or_fallback("get_match_profile", store::get_match(conn, id), None).unwrap_or_else(Match::bad)
}

pub fn delete_match(conn: &Connection, m: &Match) -> Outcome {
	delete_outcome("delete_match", store::delete_match(conn, m.id))
}

pub fn add_player(conn: &Connection, player: &Player) -> Outcome {
	insert_outcome("add_player", store::add_player(conn, player), Reference::Attribute)
}

pub fn get_player_profile(conn: &Connection, id: PlayerId) -> Player {
	or_fallback("get_player_profile", store::get_player(conn, id), None).unwrap_or_else(Player::bad)
}

pub fn delete_player(conn: &Connection, player: &Player) -> Outcome {
	delete_outcome("delete_player", store::delete_player(conn, player.id))
}

pub fn add_stadium(conn: &Connection, stadium: &Stadium) -> Outcome {
	insert_outcome("add_stadium", store::add_stadium(conn, stadium), Reference::Attribute)
}

pub fn get_stadium_profile(conn: &Connection, id: StadiumId) -> Stadium {
	or_fallback("get_stadium_profile", store::get_stadium(conn, id), None).unwrap_or_else(Stadium::bad)
}

pub fn delete_stadium(conn: &Connection, stadium: &Stadium) -> Outcome {
	delete_outcome("delete_stadium", store::delete_stadium(conn, stadium.id))
}

pub fn player_scored_in_match(conn: &Connection, m: &Match, player: &Player, goals: i64) -> Outcome {
	insert_outcome(
		"player_scored_in_match",
		store::player_scored_in_match(conn, m.id, player.id, goals),
		Reference::Link,
	)
}

pub fn player_didnt_score_in_match(conn: &Connection, m: &Match, player: &Player) -> Outcome {
	delete_outcome(
		"player_didnt_score_in_match",
		store::player_didnt_score_in_match(conn, m.id, player.id),
	)
}

pub fn match_in_stadium(conn: &Connection, m: &Match, stadium: &Stadium, attendance: i64) -> Outcome {
	insert_outcome(
		"match_in_stadium",
		store::match_in_stadium(conn, m.id, stadium.id, attendance),
		Reference::Link,
	)
}

pub fn match_not_in_stadium(conn: &Connection, m: &Match, stadium: &Stadium) -> Outcome {
	delete_outcome(
		"match_not_in_stadium",
		store::match_not_in_stadium(conn, m.id, stadium.id),
	)
}

pub fn average_attendance_in_stadium(conn: &Connection, stadium_id: StadiumId) -> f64 {
	or_fallback(
		"average_attendance_in_stadium",
		reports::average_attendance_in_stadium(conn, stadium_id),
		-1.0,
	)
}

pub fn stadium_total_goals(conn: &Connection, stadium_id: StadiumId) -> i64 {
	or_fallback(
		"stadium_total_goals",
		reports::stadium_total_goals(conn, stadium_id),
		-1,
	)
}

pub fn player_is_winner(conn: &Connection, player_id: PlayerId, match_id: MatchId) -> bool {
	or_fallback(
		"player_is_winner",
		reports::player_is_winner(conn, player_id, match_id),
		false,
	)
}

pub fn get_active_tall_teams(conn: &Connection) -> Vec<TeamId> {
	or_fallback("get_active_tall_teams", reports::active_tall_teams(conn), Vec::new())
}

pub fn get_active_tall_rich_teams(conn: &Connection) -> Vec<TeamId> {
	or_fallback(
		"get_active_tall_rich_teams",
		reports::active_tall_rich_teams(conn),
		Vec::new(),
	)
}

pub fn popular_teams(conn: &Connection) -> Vec<TeamId> {
	or_fallback("popular_teams", reports::popular_teams(conn), Vec::new())
}

pub fn get_most_attractive_stadiums(conn: &Connection) -> Vec<StadiumId> {
	or_fallback(
		"get_most_attractive_stadiums",
		reports::most_attractive_stadiums(conn),
		Vec::new(),
	)
}

pub fn most_goals_for_team(conn: &Connection, team_id: TeamId) -> Vec<PlayerId> {
	or_fallback(
		"most_goals_for_team",
		reports::most_goals_for_team(conn, team_id),
		Vec::new(),
	)
}

pub fn get_close_players(conn: &Connection, player_id: PlayerId) -> Vec<PlayerId> {
	or_fallback(
		"get_close_players",
		reports::close_players(conn, player_id),
		Vec::new(),
	)
}
