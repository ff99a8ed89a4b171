use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
	config::Settings,
	data::{Competition, Foot, MatchId, PlayerId, StadiumId, TeamId},
	load::Fixture,
};

#[derive(Parser)]
#[command(author, version, long_about = None)]
pub struct Cli {
	#[arg(long, value_name = "FILE", env = "MATCHDAY_DB", default_value = "matchday.db")]
	pub database: PathBuf,

	#[arg(short, long, value_name = "FILE")]
	pub output: Option<PathBuf>,

	/// Log every statement
	#[arg(long)]
	pub debug: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create the schema and store the reporting thresholds
	Init(Thresholds),
	/// Delete every row, keeping the thresholds
	Clear,
	/// Drop every table and view
	Drop,
	Add {
		#[command(subcommand)]
		entity: NewEntity,
	},
	Delete {
		#[command(subcommand)]
		entity: EntityRef,
	},
	Show {
		#[command(subcommand)]
		entity: Profile,
	},
	/// Record a player's goals in a match
	Score {
		match_id: MatchId,
		player_id: PlayerId,
		goals: i64,
	},
	Unscore {
		match_id: MatchId,
		player_id: PlayerId,
	},
	/// Record where a match was played and how many came
	Attend {
		match_id: MatchId,
		stadium_id: StadiumId,
		attendance: i64,
	},
	Unattend {
		match_id: MatchId,
		stadium_id: StadiumId,
	},
	/// Import rows from a CSV file with a header line
	Load {
		#[arg(value_enum)]
		fixture: Fixture,
		#[arg(value_name = "FILE")]
		file: PathBuf,
	},
	Report {
		#[command(subcommand)]
		report: Report,
	},
}

#[derive(Args)]
pub struct Thresholds {
	#[arg(long, default_value_t = Settings::default().tall_height)]
	pub tall_height: i64,
	#[arg(long, default_value_t = Settings::default().tall_players)]
	pub tall_players: i64,
	#[arg(long, default_value_t = Settings::default().rich_capacity)]
	pub rich_capacity: i64,
	#[arg(long, default_value_t = Settings::default().popular_attendance)]
	pub popular_attendance: i64,
}

impl From<&Thresholds> for Settings {
	fn from(t: &Thresholds) -> Self {
		Settings {
			tall_height: t.tall_height,
			tall_players: t.tall_players,
			rich_capacity: t.rich_capacity,
			popular_attendance: t.popular_attendance,
		}
	}
}

#[derive(Subcommand)]
pub enum NewEntity {
	Team {
		id: TeamId,
	},
	Match {
		id: MatchId,
		competition: Competition,
		home_team: TeamId,
		away_team: TeamId,
	},
	Player {
		id: PlayerId,
		team: TeamId,
		age: i64,
		height: i64,
		foot: Foot,
	},
	Stadium {
		id: StadiumId,
		capacity: i64,
		#[arg(long, value_name = "TEAM")]
		owner: Option<TeamId>,
	},
}

#[derive(Subcommand)]
pub enum EntityRef {
	Team { id: TeamId },
	Match { id: MatchId },
	Player { id: PlayerId },
	Stadium { id: StadiumId },
}

#[derive(Subcommand)]
pub enum Profile {
	Match { id: MatchId },
	Player { id: PlayerId },
	Stadium { id: StadiumId },
}

#[derive(Subcommand)]
pub enum Report {
	AverageAttendance { stadium_id: StadiumId },
	StadiumGoals { stadium_id: StadiumId },
	Winner { player_id: PlayerId, match_id: MatchId },
	TallTeams,
	TallRichTeams,
	PopularTeams,
	AttractiveStadiums,
	TopScorers { team_id: TeamId },
	ClosePlayers { player_id: PlayerId },
}
