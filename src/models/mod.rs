//! Modelos del sistema
//!
//! Este módulo contiene las entidades de la flota tal como las expone el
//! backend REST con su schema canónico (snake_case).

pub mod document;
pub mod driver;
pub mod employee;
pub mod entity;
pub mod pairing;
pub mod vehicle;

pub use document::Document;
pub use driver::Driver;
pub use employee::Employee;
pub use entity::{EntityId, EntityKind, Partition, RosterEntity};
pub use pairing::{Pairing, PairingKind, PairingReceipt};
pub use vehicle::Vehicle;
