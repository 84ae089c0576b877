// Library exports for the bridge web service

pub use error::AppError;

pub mod config;
pub mod db;
mod error;
pub mod ledger;
pub mod web;
