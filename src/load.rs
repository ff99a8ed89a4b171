//! Bulk import of fixtures from CSV files
//!
//! Each file holds one kind of row, with a header line naming the columns.
//! A file is loaded in a single transaction: one bad row rejects the whole file.

use std::path::Path;

use clap::ValueEnum;
use rusqlite::Connection;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::info;

use crate::{
	data::{Match, MatchId, Player, PlayerId, Stadium, StadiumId, TeamId},
	error::DbResult,
	store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Fixture {
	Teams,
	Matches,
	Players,
	Stadiums,
	Scores,
	Attendance,
}

#[derive(Debug, Deserialize)]
struct TeamRecord {
	id: TeamId,
}

#[derive(Debug, Deserialize)]
struct ScoreRecord {
	match_id: MatchId,
	player_id: PlayerId,
	goals: i64,
}

#[derive(Debug, Deserialize)]
struct AttendanceRecord {
	match_id: MatchId,
	stadium_id: StadiumId,
	attendance: i64,
}

fn read<T: DeserializeOwned>(path: &Path) -> DbResult<Vec<T>> {
	let mut reader = csv::Reader::from_path(path)?;
	let records = reader.deserialize().collect::<Result<Vec<T>, _>>()?;

	Ok(records)
}

/// Loads `path` as rows of `fixture` and returns how many were inserted.
pub fn load(conn: &mut Connection, fixture: Fixture, path: &Path) -> DbResult<usize> {
	let tx = conn.transaction()?;

	let count = match fixture {
		Fixture::Teams => {
			let records: Vec<TeamRecord> = read(path)?;
			for r in &records {
				store::add_team(&tx, r.id)?;
			}
			records.len()
		}
		Fixture::Matches => {
			let records: Vec<Match> = read(path)?;
			for m in &records {
				store::add_match(&tx, m)?;
			}
			records.len()
		}
		Fixture::Players => {
			let records: Vec<Player> = read(path)?;
			for p in &records {
				store::add_player(&tx, p)?;
			}
			records.len()
		}
		Fixture::Stadiums => {
			let records: Vec<Stadium> = read(path)?;
			for s in &records {
				store::add_stadium(&tx, s)?;
			}
			records.len()
		}
		Fixture::Scores => {
			let records: Vec<ScoreRecord> = read(path)?;
			for r in &records {
				store::player_scored_in_match(&tx, r.match_id, r.player_id, r.goals)?;
			}
			records.len()
		}
		Fixture::Attendance => {
			let records: Vec<AttendanceRecord> = read(path)?;
			for r in &records {
				store::match_in_stadium(&tx, r.match_id, r.stadium_id, r.attendance)?;
			}
			records.len()
		}
	};

	tx.commit()?;
	info!(?fixture, count, path = %path.display(), "loaded fixtures");

	Ok(count)
}
