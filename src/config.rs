//! Reporting thresholds
//!
//! The thresholds live in the single-row `report_settings` table so the views
//! can join on them instead of hard-coding numbers into their DDL.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DbResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
	/// Players strictly taller than this (cm) count as tall
	pub tall_height: i64,
	/// Tall players a team needs to be a tall team
	pub tall_players: i64,
	/// Stadium capacity a team's stadium must exceed for the team to be rich
	pub rich_capacity: i64,
	/// Home attendance a popular team must always exceed
	pub popular_attendance: i64,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			tall_height: 190,
			tall_players: 2,
			rich_capacity: 55_000,
			popular_attendance: 40_000,
		}
	}
}

pub fn store_settings(conn: &Connection, settings: &Settings) -> DbResult<()> {
	debug!(?settings, "storing report settings");

	conn.execute(
		"INSERT INTO report_settings (id, tall_height, tall_players, rich_capacity, popular_attendance)
		 VALUES (1, ?1, ?2, ?3, ?4)
		 ON CONFLICT (id) DO UPDATE SET
			tall_height        = excluded.tall_height,
			tall_players       = excluded.tall_players,
			rich_capacity      = excluded.rich_capacity,
			popular_attendance = excluded.popular_attendance;",
		params![
			settings.tall_height,
			settings.tall_players,
			settings.rich_capacity,
			settings.popular_attendance
		],
	)?;

	Ok(())
}

pub fn load_settings(conn: &Connection) -> DbResult<Option<Settings>> {
	let settings = conn
		.query_row(
			"SELECT tall_height, tall_players, rich_capacity, popular_attendance
			 FROM report_settings WHERE id = 1;",
			[],
			|row| {
				Ok(Settings {
					tall_height: row.get(0)?,
					tall_players: row.get(1)?,
					rich_capacity: row.get(2)?,
					popular_attendance: row.get(3)?,
				})
			},
		)
		.optional()?;

	Ok(settings)
}
