//! Error handling for matchday
//!
//! SQLite reports every constraint failure with the same primary result code.
//! `DbError` splits them by extended code so callers can tell a bad parameter
//! from a duplicate row or a dangling reference.

use rusqlite::{ffi, ErrorCode};
use thiserror::Error;

/// Which table constraint rejected a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
	NotNull,
	Check,
	/// Unique or primary key
	Unique,
	ForeignKey,
	Other,
}

#[derive(Error, Debug)]
pub enum DbError {
	#[error("{kind:?} constraint violated: {message}")]
	Constraint {
		kind: ConstraintKind,
		message: String,
	},

	#[error("database error: {0}")]
	Sqlite(rusqlite::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),
}

pub type DbResult<T> = std::result::Result<T, DbError>;

impl DbError {
	pub fn constraint(&self) -> Option<ConstraintKind> {
		match self {
			DbError::Constraint { kind, .. } => Some(*kind),
			_ => None,
		}
	}
}

impl From<rusqlite::Error> for DbError {
	fn from(err: rusqlite::Error) -> Self {
		match err {
			rusqlite::Error::SqliteFailure(ref e, ref msg) if e.code == ErrorCode::ConstraintViolation => {
				let kind = match e.extended_code {
					ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
					ffi::SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
					ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::Unique,
					ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
					_ => ConstraintKind::Other,
				};
				DbError::Constraint {
					kind,
					message: msg.clone().unwrap_or_else(|| e.to_string()),
				}
			}
			other => DbError::Sqlite(other),
		}
	}
}
