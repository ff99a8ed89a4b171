//! Schema: tables, constraints and the reporting views

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::{
	config::{load_settings, store_settings, Settings},
	error::DbResult,
};

const TABLES: [(&str, &str); 7] = [
	(
		"teams",
		"CREATE TABLE IF NOT EXISTS teams (
			id INTEGER PRIMARY KEY CHECK (id > 0)
		) STRICT;",
	),
	(
		"matches",
		"CREATE TABLE IF NOT EXISTS matches (
			id          INTEGER PRIMARY KEY CHECK (id > 0),
			competition TEXT    NOT NULL
								CHECK (competition IN ('International', 'Domestic')),
			home_id     INTEGER NOT NULL
								REFERENCES teams (id) ON DELETE CASCADE,
			away_id     INTEGER NOT NULL
								REFERENCES teams (id) ON DELETE CASCADE,
			CHECK (home_id <> away_id)
		) STRICT;",
	),
	(
		"players",
		"CREATE TABLE IF NOT EXISTS players (
			id             INTEGER PRIMARY KEY CHECK (id > 0),
			team_id        INTEGER NOT NULL
								   REFERENCES teams (id) ON DELETE CASCADE,
			age            INTEGER NOT NULL CHECK (age > 0),
			height         INTEGER NOT NULL CHECK (height > 0),
			preferred_foot TEXT    NOT NULL
								   CHECK (preferred_foot IN ('Left', 'Right'))
		) STRICT;",
	),
	(
		"stadiums",
		"CREATE TABLE IF NOT EXISTS stadiums (
			id        INTEGER PRIMARY KEY CHECK (id > 0),
			capacity  INTEGER NOT NULL CHECK (capacity > 0),
			belong_to INTEGER UNIQUE
							  REFERENCES teams (id) ON DELETE CASCADE
		) STRICT;",
	),
	(
		"scores",
		"CREATE TABLE IF NOT EXISTS scores (
			match_id  INTEGER NOT NULL
							  REFERENCES matches (id) ON DELETE CASCADE,
			player_id INTEGER NOT NULL
							  REFERENCES players (id) ON DELETE CASCADE,
			goals     INTEGER NOT NULL CHECK (goals >= 0),
			PRIMARY KEY (match_id, player_id)
		) STRICT;",
	),
	(
		"attendance",
		"CREATE TABLE IF NOT EXISTS attendance (
			match_id   INTEGER PRIMARY KEY
							   REFERENCES matches (id) ON DELETE CASCADE,
			stadium_id INTEGER NOT NULL
							   REFERENCES stadiums (id) ON DELETE CASCADE,
			attendance INTEGER NOT NULL CHECK (attendance >= 0)
		) STRICT;",
	),
	(
		"report_settings",
		"CREATE TABLE IF NOT EXISTS report_settings (
			id                 INTEGER PRIMARY KEY CHECK (id = 1),
			tall_height        INTEGER NOT NULL CHECK (tall_height > 0),
			tall_players       INTEGER NOT NULL CHECK (tall_players > 0),
			rich_capacity      INTEGER NOT NULL CHECK (rich_capacity > 0),
			popular_attendance INTEGER NOT NULL CHECK (popular_attendance >= 0)
		) STRICT;",
	),
];

// Ordered so every view only depends on tables and earlier views.
const VIEWS: [(&str, &str); 14] = [
	(
		"average_attendance",
		"CREATE VIEW IF NOT EXISTS average_attendance AS
		 SELECT stadium_id, AVG(attendance) AS average
		 FROM attendance
		 GROUP BY stadium_id;",
	),
	(
		"stadium_goals",
		"CREATE VIEW IF NOT EXISTS stadium_goals AS
		 SELECT s.id AS stadium_id, COALESCE(SUM(sc.goals), 0) AS total_goals
		 FROM stadiums s
		 LEFT JOIN attendance a ON a.stadium_id = s.id
		 LEFT JOIN scores sc ON sc.match_id = a.match_id
		 GROUP BY s.id;",
	),
	(
		"match_goals",
		"CREATE VIEW IF NOT EXISTS match_goals AS
		 SELECT match_id, SUM(goals) AS total_goals
		 FROM scores
		 GROUP BY match_id;",
	),
	(
		"match_winners",
		"CREATE VIEW IF NOT EXISTS match_winners AS
		 SELECT sc.match_id, sc.player_id, sc.goals
		 FROM scores sc
		 JOIN match_goals mg ON mg.match_id = sc.match_id
		 WHERE 2 * sc.goals >= mg.total_goals;",
	),
	(
		"active_teams",
		"CREATE VIEW IF NOT EXISTS active_teams AS
		 SELECT home_id AS team_id FROM matches
		 UNION
		 SELECT away_id AS team_id FROM matches;",
	),
	(
		"active_tall_teams",
		"CREATE VIEW IF NOT EXISTS active_tall_teams AS
		 SELECT p.team_id AS team_id, COUNT(*) AS tall_players
		 FROM players p
		 JOIN active_teams a ON a.team_id = p.team_id
		 JOIN report_settings rs ON rs.id = 1
		 WHERE p.height > rs.tall_height
		 GROUP BY p.team_id
		 HAVING COUNT(*) >= MAX(rs.tall_players);",
	),
	(
		"rich_teams",
		"CREATE VIEW IF NOT EXISTS rich_teams AS
		 SELECT s.belong_to AS team_id
		 FROM stadiums s
		 JOIN report_settings rs ON rs.id = 1
		 WHERE s.belong_to IS NOT NULL AND s.capacity > rs.rich_capacity;",
	),
	(
		"active_tall_rich_teams",
		"CREATE VIEW IF NOT EXISTS active_tall_rich_teams AS
		 SELECT t.team_id, t.tall_players
		 FROM active_tall_teams t
		 JOIN rich_teams r ON r.team_id = t.team_id;",
	),
	(
		"team_home_attendance",
		"CREATE VIEW IF NOT EXISTS team_home_attendance AS
		 SELECT m.home_id AS team_id, m.id AS match_id, a.attendance
		 FROM matches m
		 LEFT JOIN attendance a ON a.match_id = m.id;",
	),
	(
		"popular_teams",
		"CREATE VIEW IF NOT EXISTS popular_teams AS
		 SELECT h.team_id
		 FROM team_home_attendance h
		 JOIN report_settings rs ON rs.id = 1
		 GROUP BY h.team_id
		 HAVING COUNT(h.attendance) > 0
			AND SUM(h.attendance IS NULL OR h.attendance <= rs.popular_attendance) = 0;",
	),
	(
		"player_goals",
		"CREATE VIEW IF NOT EXISTS player_goals AS
		 SELECT p.id AS player_id, p.team_id, COALESCE(SUM(sc.goals), 0) AS goals
		 FROM players p
		 LEFT JOIN scores sc ON sc.player_id = p.id
		 GROUP BY p.id, p.team_id;",
	),
	(
		"player_match_counts",
		"CREATE VIEW IF NOT EXISTS player_match_counts AS
		 SELECT p.id AS player_id, COUNT(sc.match_id) AS matches
		 FROM players p
		 LEFT JOIN scores sc ON sc.player_id = p.id
		 GROUP BY p.id;",
	),
	(
		"shared_matches",
		"CREATE VIEW IF NOT EXISTS shared_matches AS
		 SELECT a.player_id, b.player_id AS other_id, COUNT(*) AS shared
		 FROM scores a
		 JOIN scores b ON b.match_id = a.match_id AND b.player_id <> a.player_id
		 GROUP BY a.player_id, b.player_id;",
	),
	(
		"close_players",
		"CREATE VIEW IF NOT EXISTS close_players AS
		 SELECT pm.player_id, o.id AS close_id
		 FROM player_match_counts pm
		 JOIN players o ON o.id <> pm.player_id
		 LEFT JOIN shared_matches sm ON sm.player_id = pm.player_id AND sm.other_id = o.id
		 WHERE COALESCE(sm.shared, 0) >= pm.matches / 2;",
	),
];

pub fn open(path: impl AsRef<Path>) -> DbResult<Connection> {
	let conn = Connection::open(path.as_ref())?;
	configure(&conn)?;
	debug!(path = %path.as_ref().display(), "opened database");

	Ok(conn)
}

pub fn open_in_memory() -> DbResult<Connection> {
	let conn = Connection::open_in_memory()?;
	configure(&conn)?;

	Ok(conn)
}

fn configure(conn: &Connection) -> DbResult<()> {
	conn.execute_batch("PRAGMA foreign_keys = ON;")?;
	Ok(())
}

fn create_objects(conn: &Connection) -> DbResult<()> {
	for (name, ddl) in TABLES {
		debug!(table = name, "creating table");
		conn.execute(ddl, [])?;
	}
	for (name, ddl) in VIEWS {
		debug!(view = name, "creating view");
		conn.execute(ddl, [])?;
	}

	Ok(())
}

/// Creates any missing table or view and replaces the stored thresholds.
pub fn create_schema(conn: &mut Connection, settings: &Settings) -> DbResult<()> {
	let tx = conn.transaction()?;

	create_objects(&tx)?;
	store_settings(&tx, settings)?;

	tx.commit()?;
	info!("schema ready");

	Ok(())
}

/// Creates any missing table or view, keeping stored thresholds if there are any.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<Settings> {
	let tx = conn.transaction()?;

	create_objects(&tx)?;
	let settings = match load_settings(&tx)? {
		Some(settings) => settings,
		None => {
			let settings = Settings::default();
			store_settings(&tx, &settings)?;
			settings
		}
	};

	tx.commit()?;

	Ok(settings)
}

/// Deletes every row except the report settings.
pub fn clear_tables(conn: &mut Connection) -> DbResult<()> {
	let tx = conn.transaction()?;

	for (name, _) in TABLES.iter().rev().filter(|(name, _)| *name != "report_settings") {
		tx.execute(&format!("DELETE FROM {name};"), [])?;
	}

	tx.commit()?;
	info!("tables cleared");

	Ok(())
}

pub fn drop_schema(conn: &mut Connection) -> DbResult<()> {
	let tx = conn.transaction()?;

	for (name, _) in VIEWS.iter().rev() {
		tx.execute(&format!("DROP VIEW IF EXISTS {name};"), [])?;
	}
	for (name, _) in TABLES.iter().rev() {
		tx.execute(&format!("DROP TABLE IF EXISTS {name};"), [])?;
	}

	tx.commit()?;
	info!("schema dropped");

	Ok(())
}
