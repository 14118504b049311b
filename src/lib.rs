pub mod advisory;
pub mod board;
pub mod client;
pub mod config;
pub mod data;
pub mod departure;
pub mod error;
pub mod forecast;
pub mod location;
pub mod schedule;
pub mod tools;
pub mod units;
