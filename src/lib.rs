//! matchday: a football league data layer on SQLite
//!
//! The schema keeps teams, matches, players, stadiums, scores and attendance
//! behind referential and domain constraints. The reporting queries read from
//! views that derive the aggregates: goals per stadium, match winners, tall
//! and rich teams, popular teams and close players.
//!
//! - [`db`] creates and drops the schema
//! - [`store`] is the typed CRUD layer
//! - [`reports`] runs the reporting queries
//! - [`facade`] maps both onto outcome codes and placeholder values

pub mod cli;
pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod facade;
pub mod load;
pub mod reports;
pub mod store;
