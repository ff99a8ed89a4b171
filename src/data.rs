use std::{fmt, str::FromStr};

use rusqlite::{
	types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
	Row,
};
use serde::{Deserialize, Serialize};

pub type TeamId = i64;
pub type MatchId = i64;
pub type PlayerId = i64;
pub type StadiumId = i64;

/// Id carried by the placeholder entities returned for missing rows.
pub const BAD_ID: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Competition {
	International,
	Domestic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Foot {
	Left,
	Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
	pub id: MatchId,
	pub competition: Competition,
	pub home_team: TeamId,
	pub away_team: TeamId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
	pub id: PlayerId,
	pub team: TeamId,
	pub age: i64,
	pub height: i64,
	pub foot: Foot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stadium {
	pub id: StadiumId,
	pub capacity: i64,
	pub belongs_to: Option<TeamId>,
}

impl Match {
	pub fn bad() -> Self {
		Self {
			id: BAD_ID,
			competition: Competition::Domestic,
			home_team: BAD_ID,
			away_team: BAD_ID,
		}
	}

	pub fn is_bad(&self) -> bool {
		self.id == BAD_ID
	}

	pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
		Ok(Self {
			id: row.get(0)?,
			competition: row.get(1)?,
			home_team: row.get(2)?,
			away_team: row.get(3)?,
		})
	}
}

impl Player {
	pub fn bad() -> Self {
		Self {
			id: BAD_ID,
			team: BAD_ID,
			age: BAD_ID,
			height: BAD_ID,
			foot: Foot::Left,
		}
	}

	pub fn is_bad(&self) -> bool {
		self.id == BAD_ID
	}

	pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
		Ok(Self {
			id: row.get(0)?,
			team: row.get(1)?,
			age: row.get(2)?,
			height: row.get(3)?,
			foot: row.get(4)?,
		})
	}
}

impl Stadium {
	pub fn bad() -> Self {
		Self {
			id: BAD_ID,
			capacity: BAD_ID,
			belongs_to: None,
		}
	}

	pub fn is_bad(&self) -> bool {
		self.id == BAD_ID
	}

	pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
		Ok(Self {
			id: row.get(0)?,
			capacity: row.get(1)?,
			belongs_to: row.get(2)?,
		})
	}
}

impl Competition {
	pub fn as_str(&self) -> &'static str {
		match self {
			Competition::International => "International",
			Competition::Domestic => "Domestic",
		}
	}
}

impl Foot {
	pub fn as_str(&self) -> &'static str {
		match self {
			Foot::Left => "Left",
			Foot::Right => "Right",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown value '{}'", self.0)
	}
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Competition {
	type Err = UnknownVariant;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"International" => Ok(Competition::International),
			"Domestic" => Ok(Competition::Domestic),
			other => Err(UnknownVariant(other.to_string())),
		}
	}
}

impl FromStr for Foot {
	type Err = UnknownVariant;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Left" => Ok(Foot::Left),
			"Right" => Ok(Foot::Right),
			other => Err(UnknownVariant(other.to_string())),
		}
	}
}

impl fmt::Display for Competition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl fmt::Display for Foot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl ToSql for Competition {
	fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
		Ok(ToSqlOutput::from(self.as_str()))
	}
}

impl FromSql for Competition {
	fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
		value
			.as_str()?
			.parse()
			.map_err(|e| FromSqlError::Other(Box::new(e)))
	}
}

impl ToSql for Foot {
	fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
		Ok(ToSqlOutput::from(self.as_str()))
	}
}

impl FromSql for Foot {
	fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
		value
			.as_str()?
			.parse()
			.map_err(|e| FromSqlError::Other(Box::new(e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_enums() {
		assert_eq!("Domestic".parse::<Competition>(), Ok(Competition::Domestic));
		assert_eq!("Right".parse::<Foot>(), Ok(Foot::Right));
		assert!("domestic".parse::<Competition>().is_err());
		assert!("Both".parse::<Foot>().is_err());
	}

	#[test]
	fn test_placeholders_are_bad() {
		assert!(Match::bad().is_bad());
		assert!(Player::bad().is_bad());
		assert!(Stadium::bad().is_bad());
	}
}
