#![doc = "report-builder: client-side core for the report builder UI."]

//! This crate contains the state store and query-fetch layer backing the
//! report builder: an observable in-memory document of markdown and query
//! blocks, plus a client for the export endpoint that feeds those query
//! blocks with data. Rendering, theming and authentication live elsewhere;
//! this crate only exposes typed state and a query function for them.

pub mod cli;
pub mod config;
pub mod contract;
pub mod query;
pub mod report;
pub mod store;
