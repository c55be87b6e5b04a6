pub mod config;
pub mod db;
pub mod error_convert;
pub mod health;
pub mod openapi;
pub mod rest;
pub mod telemetry;

// Case workflow domain modules
pub mod repo;
