//! Typed CRUD over the schema
//!
//! Every call is a single statement. Deletes report whether a row matched.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::{
	data::{Match, MatchId, Player, PlayerId, Stadium, StadiumId, TeamId},
	error::DbResult,
};

pub fn add_team(conn: &Connection, id: TeamId) -> DbResult<()> {
	debug!(team = id, "adding team");
	conn.execute("INSERT INTO teams (id) VALUES (?1);", [id])?;

	Ok(())
}

pub fn delete_team(conn: &Connection, id: TeamId) -> DbResult<bool> {
	debug!(team = id, "deleting team");
	let deleted = conn.execute("DELETE FROM teams WHERE id = ?1;", [id])?;

	Ok(deleted > 0)
}

pub fn add_match(conn: &Connection, m: &Match) -> DbResult<()> {
	debug!(?m, "adding match");

	let mut stmt = conn.prepare(
		"INSERT INTO matches (id, competition, home_id, away_id)
		 VALUES (?1, ?2, ?3, ?4);",
	)?;
	stmt.execute(params![m.id, m.competition, m.home_team, m.away_team])?;

	Ok(())
}

pub fn get_match(conn: &Connection, id: MatchId) -> DbResult<Option<Match>> {
	let m = conn
		.query_row(
			"SELECT id, competition, home_id, away_id FROM matches WHERE id = ?1;",
			[id],
			Match::from_row,
		)
		.optional()?;

	Ok(m)
}

pub fn delete_match(conn: &Connection, id: MatchId) -> DbResult<bool> {
	debug!(id, "deleting match");
	let deleted = conn.execute("DELETE FROM matches WHERE id = ?1;", [id])?;

	Ok(deleted > 0)
}

pub fn add_player(conn: &Connection, player: &Player) -> DbResult<()> {
	debug!(?player, "adding player");

	let mut stmt = conn.prepare(
		"INSERT INTO players (id, team_id, age, height, preferred_foot)
		 VALUES (?1, ?2, ?3, ?4, ?5);",
	)?;
	stmt.execute(params![
		player.id,
		player.team,
		player.age,
		player.height,
		player.foot
	])?;

	Ok(())
}

pub fn get_player(conn: &Connection, id: PlayerId) -> DbResult<Option<Player>> {
	let player = conn
		.query_row(
			"SELECT id, team_id, age, height, preferred_foot FROM players WHERE id = ?1;",
			[id],
			Player::from_row,
		)
		.optional()?;

	Ok(player)
}

pub fn delete_player(conn: &Connection, id: PlayerId) -> DbResult<bool> {
	debug!(id, "deleting player");
	let deleted = conn.execute("DELETE FROM players WHERE id = ?1;", [id])?;

	Ok(deleted > 0)
}

pub fn add_stadium(conn: &Connection, stadium: &Stadium) -> DbResult<()> {
	debug!(?stadium, "adding stadium");

	let mut stmt = conn.prepare(
		"INSERT INTO stadiums (id, capacity, belong_to)
		 VALUES (?1, ?2, ?3);",
	)?;
	stmt.execute(params![stadium.id, stadium.capacity, stadium.belongs_to])?;

	Ok(())
}

pub fn get_stadium(conn: &Connection, id: StadiumId) -> DbResult<Option<Stadium>> {
	let stadium = conn
		.query_row(
			"SELECT id, capacity, belong_to FROM stadiums WHERE id = ?1;",
			[id],
			Stadium::from_row,
		)
		.optional()?;

	Ok(stadium)
}

pub fn delete_stadium(conn: &Connection, id: StadiumId) -> DbResult<bool> {
	debug!(id, "deleting stadium");
	let deleted = conn.execute("DELETE FROM stadiums WHERE id = ?1;", [id])?;

	Ok(deleted > 0)
}

pub fn player_scored_in_match(
	conn: &Connection,
	match_id: MatchId,
	player_id: PlayerId,
	goals: i64,
) -> DbResult<()> {
	debug!(match_id, player_id, goals, "recording score");
	conn.execute(
		"INSERT INTO scores (match_id, player_id, goals) VALUES (?1, ?2, ?3);",
		params![match_id, player_id, goals],
	)?;

	Ok(())
}

pub fn player_didnt_score_in_match(
	conn: &Connection,
	match_id: MatchId,
	player_id: PlayerId,
) -> DbResult<bool> {
	debug!(match_id, player_id, "removing score");
	let deleted = conn.execute(
		"DELETE FROM scores WHERE match_id = ?1 AND player_id = ?2;",
		params![match_id, player_id],
	)?;

	Ok(deleted > 0)
}

pub fn match_in_stadium(
	conn: &Connection,
	match_id: MatchId,
	stadium_id: StadiumId,
	attendance: i64,
) -> DbResult<()> {
	debug!(match_id, stadium_id, attendance, "recording attendance");
	conn.execute(
		"INSERT INTO attendance (match_id, stadium_id, attendance) VALUES (?1, ?2, ?3);",
		params![match_id, stadium_id, attendance],
	)?;

	Ok(())
}

pub fn match_not_in_stadium(
	conn: &Connection,
	match_id: MatchId,
	stadium_id: StadiumId,
) -> DbResult<bool> {
	debug!(match_id, stadium_id, "removing attendance");
	let deleted = conn.execute(
		"DELETE FROM attendance WHERE match_id = ?1 AND stadium_id = ?2;",
		params![match_id, stadium_id],
	)?;

	Ok(deleted > 0)
}
