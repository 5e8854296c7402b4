//! Skills Matrix - Skills Self-Assessment Engine
//!
//! This crate builds a personalised sequence of skills from a catalog,
//! records a respondent's self-rated levels, infers related levels from
//! declarative rules and keeps the whole session persisted so it can be
//! resumed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
