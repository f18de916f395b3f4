//! Cache
//!
//! Este módulo contiene la cache de rosters de cada vista.

pub mod roster_cache;

pub use roster_cache::{Roster, RosterCache, RosterSnapshot};
