//! DTOs de la consola
//!
//! Formularios validados, envelopes de respuesta y vistas serializadas.

pub mod api_response;
pub mod auth_dto;
pub mod driver_dto;
pub mod employee_dto;
pub mod pairing_dto;
pub mod roster_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
pub use driver_dto::DriverForm;
pub use employee_dto::EmployeeForm;
pub use vehicle_dto::VehicleForm;
