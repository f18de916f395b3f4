use serde::{Deserialize, Serialize};

use crate::models::{Driver, Employee, EntityId, Vehicle};

// Request para emparejar conductor y vehículo
#[derive(Debug, Clone, Deserialize)]
pub struct PairDriverVehicleRequest {
    pub driver_id: EntityId,
    pub vehicle_id: EntityId,
}

// Request para asignar un conductor a un empleado
#[derive(Debug, Clone, Deserialize)]
pub struct PairEmployeeDriverRequest {
    pub employee_id: EntityId,
    pub driver_id: EntityId,
}

// Opciones del formulario de emparejamiento conductor↔vehículo
#[derive(Debug, Serialize)]
pub struct VehiclePairingCandidates {
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
}

// Opciones del formulario de emparejamiento empleado↔conductor
#[derive(Debug, Serialize)]
pub struct EmployeePairingCandidates {
    pub employees: Vec<Employee>,
    pub drivers: Vec<Driver>,
}
