use std::{
	fs::File,
	io::{self, Write},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use matchday::{
	cli::{Cli, Commands, EntityRef, NewEntity, Profile, Report},
	config::Settings,
	data::{Match, Player, Stadium},
	db::{self, clear_tables, create_schema, drop_schema, ensure_schema},
	facade::{self, Outcome},
	load::load,
};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.debug)?;

	let mut conn = db::open(&cli.database)
		.with_context(|| format!("could not open {}", cli.database.display()))?;

	let mut out = match cli.output.as_deref() {
		Some(path) => Box::new(
			File::create(path).with_context(|| format!("could not create {}", path.display()))?,
		) as Box<dyn Write>,
		None => Box::new(io::stdout()) as Box<dyn Write>,
	};

	let string = run(&mut conn, cli.command)?;

	out.write_all(string.as_bytes())
		.context("could not write output")?;

	Ok(())
}

fn init_tracing(debug: bool) -> Result<()> {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(debug)
		.compact()
		.try_init()
		.map_err(|err| anyhow!(err))
}

fn run(conn: &mut Connection, command: Commands) -> Result<String> {
	if !matches!(command, Commands::Init(_) | Commands::Drop) {
		let settings = ensure_schema(conn).context("could not create schema")?;
		info!(?settings, "using report settings");
	}

	let outcome = match command {
		Commands::Init(thresholds) => {
			let settings = Settings::from(&thresholds);
			create_schema(conn, &settings).context("could not create schema")?;
			return Ok(format!("{settings:?}\n"));
		}
		Commands::Drop => {
			drop_schema(conn).context("could not drop schema")?;
			return Ok(String::from("dropped\n"));
		}
		Commands::Clear => {
			clear_tables(conn).context("could not clear tables")?;
			return Ok(String::from("cleared\n"));
		}
		Commands::Load { fixture, file } => {
			let count = load(conn, fixture, &file)
				.with_context(|| format!("could not load {}", file.display()))?;
			return Ok(format!("loaded {count} rows\n"));
		}
		Commands::Show { entity } => return show_command_string(conn, entity),
		Commands::Report { report } => return Ok(report_command_string(conn, report)),
		Commands::Add { entity } => match entity {
			NewEntity::Team { id } => facade::add_team(conn, id),
			NewEntity::Match {
				id,
				competition,
				home_team,
				away_team,
			} => facade::add_match(
				conn,
				&Match {
					id,
					competition,
					home_team,
					away_team,
				},
			),
			NewEntity::Player {
				id,
				team,
				age,
				height,
				foot,
			} => facade::add_player(
				conn,
				&Player {
					id,
					team,
					age,
					height,
					foot,
				},
			),
			NewEntity::Stadium {
				id,
				capacity,
				owner,
			} => facade::add_stadium(
				conn,
				&Stadium {
					id,
					capacity,
					belongs_to: owner,
				},
			),
		},
		Commands::Delete { entity } => match entity {
			EntityRef::Team { id } => facade::delete_team(conn, id),
			EntityRef::Match { id } => facade::delete_match(conn, &Match { id, ..Match::bad() }),
			EntityRef::Player { id } => facade::delete_player(conn, &Player { id, ..Player::bad() }),
			EntityRef::Stadium { id } => {
				facade::delete_stadium(conn, &Stadium { id, ..Stadium::bad() })
			}
		},
		Commands::Score {
			match_id,
			player_id,
			goals,
		} => facade::player_scored_in_match(
			conn,
			&Match { id: match_id, ..Match::bad() },
			&Player { id: player_id, ..Player::bad() },
			goals,
		),
		Commands::Unscore {
			match_id,
			player_id,
		} => facade::player_didnt_score_in_match(
			conn,
			&Match { id: match_id, ..Match::bad() },
			&Player { id: player_id, ..Player::bad() },
		),
		Commands::Attend {
			match_id,
			stadium_id,
			attendance,
		} => facade::match_in_stadium(
			conn,
			&Match { id: match_id, ..Match::bad() },
			&Stadium { id: stadium_id, ..Stadium::bad() },
			attendance,
		),
		Commands::Unattend {
			match_id,
			stadium_id,
		} => facade::match_not_in_stadium(
			conn,
			&Match { id: match_id, ..Match::bad() },
			&Stadium { id: stadium_id, ..Stadium::bad() },
		),
	};

	Ok(outcome_string(outcome))
}

fn outcome_string(outcome: Outcome) -> String {
	format!("{outcome}\n")
}

fn show_command_string(conn: &Connection, entity: Profile) -> Result<String> {
	fn csv_row<T: Serialize>(record: &T) -> Result<String> {
		let mut writer = csv::Writer::from_writer(vec![]);
		writer.serialize(record)?;
		let bytes = writer.into_inner().map_err(|err| anyhow!(err.to_string()))?;

		Ok(String::from_utf8(bytes)?)
	}

	match entity {
		Profile::Match { id } => csv_row(&facade::get_match_profile(conn, id)),
		Profile::Player { id } => csv_row(&facade::get_player_profile(conn, id)),
		Profile::Stadium { id } => csv_row(&facade::get_stadium_profile(conn, id)),
	}
}

fn ranking_string(title: &str, ids: &[i64]) -> String {
	let mut string = format!("# {title}\n```");

	for (rank, id) in ids.iter().enumerate() {
		string.push_str(&format!("\n{}: {id}", rank + 1));
	}

	string.push_str("\n```\n");
	string
}

fn report_command_string(conn: &Connection, report: Report) -> String {
	match report {
		Report::AverageAttendance { stadium_id } => {
			format!("{}\n", facade::average_attendance_in_stadium(conn, stadium_id))
		}
		Report::StadiumGoals { stadium_id } => {
			format!("{}\n", facade::stadium_total_goals(conn, stadium_id))
		}
		Report::Winner {
			player_id,
			match_id,
		} => format!("{}\n", facade::player_is_winner(conn, player_id, match_id)),
		Report::TallTeams => ranking_string("Active tall teams", &facade::get_active_tall_teams(conn)),
		Report::TallRichTeams => ranking_string(
			"Active tall rich teams",
			&facade::get_active_tall_rich_teams(conn),
		),
		Report::PopularTeams => ranking_string("Popular teams", &facade::popular_teams(conn)),
		Report::AttractiveStadiums => ranking_string(
			"Most attractive stadiums",
			&facade::get_most_attractive_stadiums(conn),
		),
		Report::TopScorers { team_id } => ranking_string(
			&format!("Top scorers of team {team_id}"),
			&facade::most_goals_for_team(conn, team_id),
		),
		Report::ClosePlayers { player_id } => ranking_string(
			&format!("Close players of {player_id}"),
			&facade::get_close_players(conn, player_id),
		),
	}
}
