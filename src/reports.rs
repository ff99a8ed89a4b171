//! Reporting queries over the views created by [`crate::db::create_schema`]

use rusqlite::{params, Connection, OptionalExtension, Params};

use crate::{
	data::{MatchId, PlayerId, StadiumId, TeamId},
	error::DbResult,
};

const TALL_TEAMS_LIMIT: i64 = 5;
const POPULAR_TEAMS_LIMIT: i64 = 10;
const TOP_SCORERS_LIMIT: i64 = 5;
const CLOSE_PLAYERS_LIMIT: i64 = 10;

fn ids<P: Params>(conn: &Connection, sql: &str, params: P) -> DbResult<Vec<i64>> {
	let mut stmt = conn.prepare(sql)?;
	let ids = stmt
		.query_map(params, |row| row.get(0))?
		.collect::<Result<Vec<i64>, _>>()?;

	Ok(ids)
}

/// Mean attendance of the matches held at a stadium, 0 if it hosted none.
pub fn average_attendance_in_stadium(conn: &Connection, stadium_id: StadiumId) -> DbResult<f64> {
	let average = conn
		.query_row(
			"SELECT average FROM average_attendance WHERE stadium_id = ?1;",
			[stadium_id],
			|row| row.get::<_, f64>(0),
		)
		.optional()?;

	Ok(average.unwrap_or(0.0))
}

/// Goals scored in all matches held at a stadium.
pub fn stadium_total_goals(conn: &Connection, stadium_id: StadiumId) -> DbResult<i64> {
	let total = conn
		.query_row(
			"SELECT total_goals FROM stadium_goals WHERE stadium_id = ?1;",
			[stadium_id],
			|row| row.get::<_, i64>(0),
		)
		.optional()?;

	Ok(total.unwrap_or(0))
}

pub fn player_is_winner(conn: &Connection, player_id: PlayerId, match_id: MatchId) -> DbResult<bool> {
	let winner = conn.query_row(
		"SELECT EXISTS (
			SELECT 1 FROM match_winners WHERE player_id = ?1 AND match_id = ?2
		 );",
		params![player_id, match_id],
		|row| row.get(0),
	)?;

	Ok(winner)
}

pub fn active_tall_teams(conn: &Connection) -> DbResult<Vec<TeamId>> {
	ids(
		conn,
		"SELECT team_id FROM active_tall_teams ORDER BY team_id DESC LIMIT ?1;",
		[TALL_TEAMS_LIMIT],
	)
}

pub fn active_tall_rich_teams(conn: &Connection) -> DbResult<Vec<TeamId>> {
	ids(
		conn,
		"SELECT team_id FROM active_tall_rich_teams ORDER BY team_id ASC LIMIT ?1;",
		[TALL_TEAMS_LIMIT],
	)
}

pub fn popular_teams(conn: &Connection) -> DbResult<Vec<TeamId>> {
	ids(
		conn,
		"SELECT team_id FROM popular_teams ORDER BY team_id DESC LIMIT ?1;",
		[POPULAR_TEAMS_LIMIT],
	)
}

/// Every stadium, most goals first.
pub fn most_attractive_stadiums(conn: &Connection) -> DbResult<Vec<StadiumId>> {
	ids(
		conn,
		"SELECT stadium_id FROM stadium_goals ORDER BY total_goals DESC, stadium_id ASC;",
		[],
	)
}

pub fn most_goals_for_team(conn: &Connection, team_id: TeamId) -> DbResult<Vec<PlayerId>> {
	ids(
		conn,
		"SELECT player_id FROM player_goals
		 WHERE team_id = ?1
		 ORDER BY goals DESC, player_id DESC
		 LIMIT ?2;",
		params![team_id, TOP_SCORERS_LIMIT],
	)
}

/// Players who appeared in at least half of `player_id`'s matches.
pub fn close_players(conn: &Connection, player_id: PlayerId) -> DbResult<Vec<PlayerId>> {
	ids(
		conn,
		"SELECT close_id FROM close_players
		 WHERE player_id = ?1
		 ORDER BY close_id ASC
		 LIMIT ?2;",
		params![player_id, CLOSE_PLAYERS_LIMIT],
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		config::{store_settings, Settings},
		db::{create_schema, open_in_memory},
	};

	fn league(fixtures: &str) -> Connection {
		let mut conn = open_in_memory().unwrap();
		create_schema(&mut conn, &Settings::default()).unwrap();
		conn.execute_batch(fixtures).unwrap();
		conn
	}

	#[test]
	fn test_average_attendance() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2);
			 INSERT INTO matches VALUES (1, 'Domestic', 1, 2), (2, 'Domestic', 2, 1);
			 INSERT INTO stadiums VALUES (1, 90000, NULL), (2, 500, NULL);
			 INSERT INTO attendance VALUES (1, 1, 100), (2, 1, 201);",
		);

		assert_eq!(average_attendance_in_stadium(&conn, 1).unwrap(), 150.5);
		assert_eq!(average_attendance_in_stadium(&conn, 2).unwrap(), 0.0);
		assert_eq!(average_attendance_in_stadium(&conn, 42).unwrap(), 0.0);
	}

	#[test]
	fn test_stadium_goals_include_empty_stadiums() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2);
			 INSERT INTO players VALUES (1, 1, 20, 180, 'Left'), (2, 2, 20, 180, 'Right');
			 INSERT INTO matches VALUES (1, 'Domestic', 1, 2), (2, 'International', 2, 1), (3, 'Domestic', 1, 2);
			 INSERT INTO stadiums VALUES (1, 1000, NULL), (2, 1000, NULL), (3, 1000, NULL);
			 INSERT INTO attendance VALUES (1, 2, 10), (2, 2, 10), (3, 3, 10);
			 INSERT INTO scores VALUES (1, 1, 2), (1, 2, 1), (2, 1, 4);",
		);

		assert_eq!(stadium_total_goals(&conn, 2).unwrap(), 7);
		assert_eq!(stadium_total_goals(&conn, 3).unwrap(), 0);
		assert_eq!(stadium_total_goals(&conn, 1).unwrap(), 0);
		assert_eq!(stadium_total_goals(&conn, 9).unwrap(), 0);
		assert_eq!(most_attractive_stadiums(&conn).unwrap(), vec![2, 1, 3]);
	}

	#[test]
	fn test_winner_needs_half_of_match_goals() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2);
			 INSERT INTO players VALUES (1, 1, 20, 180, 'Left'), (2, 1, 20, 180, 'Left'), (3, 2, 20, 180, 'Left');
			 INSERT INTO matches VALUES (1, 'Domestic', 1, 2), (2, 'Domestic', 2, 1), (3, 'Domestic', 1, 2);
			 INSERT INTO scores VALUES (1, 1, 2), (1, 2, 2);
			 INSERT INTO scores VALUES (2, 1, 1), (2, 2, 1), (2, 3, 1);
			 INSERT INTO scores VALUES (3, 1, 0);",
		);

		// Two players on exactly half each both win.
		assert!(player_is_winner(&conn, 1, 1).unwrap());
		assert!(player_is_winner(&conn, 2, 1).unwrap());
		// A third of the goals is not enough.
		assert!(!player_is_winner(&conn, 1, 2).unwrap());
		// A goalless appearance in a goalless match still counts.
		assert!(player_is_winner(&conn, 1, 3).unwrap());
		// No appearance, no win.
		assert!(!player_is_winner(&conn, 3, 1).unwrap());
	}

	#[test]
	fn test_tall_and_rich_teams() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2), (3), (4);
			 INSERT INTO matches VALUES (1, 'Domestic', 1, 2), (2, 'Domestic', 3, 2);
			 INSERT INTO players VALUES
				(1, 1, 20, 191, 'Left'), (2, 1, 20, 195, 'Left'),
				(3, 2, 20, 191, 'Left'), (4, 2, 20, 190, 'Left'),
				(5, 3, 20, 200, 'Left'), (6, 3, 20, 200, 'Left'),
				(7, 4, 20, 200, 'Left'), (8, 4, 20, 200, 'Left');
			 INSERT INTO stadiums VALUES (1, 55001, 1), (2, 55000, 3), (3, 90000, 4);",
		);

		// Team 2 has one player above the bar; team 4 never played.
		assert_eq!(active_tall_teams(&conn).unwrap(), vec![3, 1]);
		// Team 3's stadium is exactly at, not above, the capacity bar.
		assert_eq!(active_tall_rich_teams(&conn).unwrap(), vec![1]);
	}

	#[test]
	fn test_tall_teams_follow_settings() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2);
			 INSERT INTO matches VALUES (1, 'Domestic', 1, 2);
			 INSERT INTO players VALUES (1, 1, 20, 186, 'Left'), (2, 2, 20, 186, 'Left');",
		);
		assert!(active_tall_teams(&conn).unwrap().is_empty());

		store_settings(
			&conn,
			&Settings {
				tall_height: 185,
				tall_players: 1,
				..Settings::default()
			},
		)
		.unwrap();
		assert_eq!(active_tall_teams(&conn).unwrap(), vec![2, 1]);
	}

	#[test]
	fn test_popular_teams() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2), (3), (4), (5), (6);
			 INSERT INTO stadiums VALUES (1, 100000, NULL);
			 INSERT INTO matches VALUES
				(1, 'Domestic', 1, 2), (2, 'Domestic', 1, 3),
				(3, 'Domestic', 2, 1), (4, 'Domestic', 2, 3),
				(5, 'Domestic', 3, 1), (6, 'Domestic', 4, 1),
				(7, 'Domestic', 6, 1), (8, 'Domestic', 6, 2);
			 INSERT INTO attendance VALUES
				(1, 1, 40001), (2, 1, 70000),
				(3, 1, 50000), (4, 1, 40000),
				(6, 1, 45000), (7, 1, 60000);",
		);

		// Team 2 dropped to the threshold once. Team 3's only home match has no
		// attendance record and team 5 never hosted. Team 6 filled the stadium
		// once but its other home match went unrecorded.
		assert_eq!(popular_teams(&conn).unwrap(), vec![4, 1]);
	}

	#[test]
	fn test_most_goals_for_team() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2);
			 INSERT INTO matches VALUES (1, 'Domestic', 1, 2), (2, 'Domestic', 2, 1);
			 INSERT INTO players VALUES
				(1, 1, 20, 180, 'Left'), (2, 1, 20, 180, 'Left'), (3, 1, 20, 180, 'Left'),
				(4, 1, 20, 180, 'Left'), (5, 1, 20, 180, 'Left'), (6, 1, 20, 180, 'Left'),
				(7, 2, 20, 180, 'Left');
			 INSERT INTO scores VALUES (1, 1, 3), (2, 1, 1), (1, 2, 4), (1, 3, 1), (1, 7, 9);",
		);

		// Ties on goals break towards the higher id, and goalless players still rank.
		assert_eq!(most_goals_for_team(&conn, 1).unwrap(), vec![2, 1, 3, 6, 5]);
		assert!(most_goals_for_team(&conn, 3).unwrap().is_empty());
	}

	#[test]
	fn test_close_players() {
		let conn = league(
			"INSERT INTO teams (id) VALUES (1), (2);
			 INSERT INTO matches VALUES
				(1, 'Domestic', 1, 2), (2, 'Domestic', 2, 1),
				(3, 'Domestic', 1, 2), (4, 'Domestic', 2, 1);
			 INSERT INTO players VALUES
				(1, 1, 20, 180, 'Left'), (2, 1, 20, 180, 'Left'), (3, 2, 20, 180, 'Left'),
				(4, 2, 20, 180, 'Left'), (5, 2, 20, 180, 'Left');
			 INSERT INTO scores VALUES
				(1, 1, 0), (2, 1, 0), (3, 1, 0), (4, 1, 0),
				(1, 2, 1), (2, 2, 0),
				(3, 3, 2),
				(1, 4, 0), (2, 4, 0), (3, 4, 0);",
		);

		// Player 1 appeared in four matches, so a close player needs two of them.
		assert_eq!(close_players(&conn, 1).unwrap(), vec![2, 4]);
		// Half of three matches rounds down, so sharing one is enough.
		assert_eq!(close_players(&conn, 4).unwrap(), vec![1, 2, 3]);
		// Half of a single match rounds down to none.
		assert_eq!(close_players(&conn, 3).unwrap(), vec![1, 2, 4, 5]);
		// Player 5 has no matches, so everyone else qualifies.
		assert_eq!(close_players(&conn, 5).unwrap(), vec![1, 2, 3, 4]);
		assert!(close_players(&conn, 99).unwrap().is_empty());
	}
}
