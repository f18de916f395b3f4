//! Backend de flota en memoria
//!
//! Implementa `FleetBackend` sobre un store protegido por un Mutex. Sirve
//! para el modo demo (`FLEET_BACKEND_MODE=memory`) y para los tests: cuenta
//! las peticiones recibidas, puede simular latencia y puede "caerse".

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::backend::{BackendReply, FleetBackend};
use crate::dto::{DriverForm, EmployeeForm, VehicleForm};
use crate::models::{Driver, Employee, EntityId, EntityKind, Pairing, Partition, Vehicle};
use crate::utils::errors::{FleetError, FleetResult};

/// Estado completo del backend simulado
#[derive(Debug, Clone, Default)]
pub struct FleetStore {
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
    pub employees: Vec<Employee>,
    pub pairings: Vec<Pairing>,
}

pub struct InMemoryBackend {
    pub store: Mutex<FleetStore>,
    list_calls: AtomicU64,
    mutation_calls: AtomicU64,
    latency_ms: AtomicU64,
    offline: AtomicBool,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::with_seed(FleetStore::default())
    }
}

fn optional_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn not_found(kind: EntityKind, id: &EntityId) -> BackendReply {
    BackendReply::rejected(404, format!("{} {} not found", kind, id))
}

impl InMemoryBackend {
    pub fn with_seed(store: FleetStore) -> Self {
        Self {
            store: Mutex::new(store),
            list_calls: AtomicU64::new(0),
            mutation_calls: AtomicU64::new(0),
            latency_ms: AtomicU64::new(0),
            offline: AtomicBool::new(false),
        }
    }

    /// Datos de ejemplo para arrancar la consola sin backend real
    pub fn demo() -> Self {
        let mut blocked_driver = Driver::new("d-103", "Suresh Patil");
        blocked_driver.mobile = Some("9822012345".to_string());
        blocked_driver.blocked = true;

        let mut drivers = vec![
            Driver::new("d-101", "Ravi Kumar"),
            Driver::new("d-102", "Imran Shaikh"),
            blocked_driver,
        ];
        drivers[0].mobile = Some("9876543210".to_string());
        drivers[0].license_id = Some("MH1420110062821".to_string());
        drivers[1].mobile = Some("9823098230".to_string());

        let mut vehicles = vec![
            Vehicle::new("v-201", "MH12AB1234"),
            Vehicle::new("v-202", "MH14CD5678"),
        ];
        vehicles[0].brand = Some("Maruti".to_string());
        vehicles[0].category = Some("sedan".to_string());
        vehicles[1].brand = Some("Toyota".to_string());
        vehicles[1].category = Some("suv".to_string());

        let mut employees = vec![
            Employee::new("e-301", "Asha Rao"),
            Employee::new("e-302", "Neha Joshi"),
        ];
        employees[0].email = Some("asha.rao@fleet.in".to_string());
        employees[1].email = Some("neha.joshi@fleet.in".to_string());

        Self::with_seed(FleetStore {
            drivers,
            vehicles,
            employees,
            pairings: Vec::new(),
        })
    }

    /// GETs de listados recibidos
    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::Relaxed)
    }

    /// Escrituras recibidas (altas, ediciones, bloqueos, emparejamientos)
    pub fn mutation_calls(&self) -> u64 {
        self.mutation_calls.load(Ordering::Relaxed)
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    pub async fn snapshot(&self) -> FleetStore {
        self.store.lock().await.clone()
    }

    async fn enter(&self, counter: &AtomicU64) -> FleetResult<()> {
        counter.fetch_add(1, Ordering::Relaxed);
        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.offline.load(Ordering::Relaxed) {
            return Err(FleetError::Fetch("fleet backend unreachable".to_string()));
        }
        Ok(())
    }
}

impl FleetStore {
    fn driver_mut(&mut self, id: &EntityId) -> Option<&mut Driver> {
        self.drivers.iter_mut().find(|d| &d.id == id)
    }

    fn vehicle_mut(&mut self, id: &EntityId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| &v.id == id)
    }

    fn employee_mut(&mut self, id: &EntityId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| &e.id == id)
    }

    fn release(&mut self, kind: EntityKind, id: &EntityId) {
        match kind {
            EntityKind::Driver => {
                if let Some(driver) = self.driver_mut(id) {
                    driver.paired = false;
                }
            }
            EntityKind::Vehicle => {
                if let Some(vehicle) = self.vehicle_mut(id) {
                    vehicle.paired = false;
                }
            }
            EntityKind::Employee => {
                if let Some(employee) = self.employee_mut(id) {
                    employee.driver_id = None;
                }
            }
        }
    }

    /// Deshacer todos los emparejamientos de una entidad, liberando a
    /// ambos miembros
    fn dissolve_pairings(&mut self, kind: EntityKind, id: &EntityId) {
        let (dissolved, kept): (Vec<Pairing>, Vec<Pairing>) = std::mem::take(&mut self.pairings)
            .into_iter()
            .partition(|pairing| pairing.involves(kind, id));
        self.pairings = kept;

        for pairing in dissolved {
            for (member_kind, member_id) in pairing.members() {
                let member_id = member_id.clone();
                self.release(member_kind, &member_id);
            }
        }
    }

    fn fill_driver(driver: &mut Driver, form: &DriverForm) {
        driver.name = optional_text(&form.name);
        driver.mobile = optional_text(&form.mobile);
        driver.date_of_birth = optional_date(&form.date_of_birth);
        driver.license_id = optional_text(&form.license_id);
        driver.license_expiry_date = optional_date(&form.license_expiry_date);
        driver.id_proof_type = optional_text(&form.id_proof_type);
    }

    fn fill_vehicle(vehicle: &mut Vehicle, form: &VehicleForm) {
        vehicle.vehicle_number = optional_text(&form.vehicle_number);
        vehicle.category = optional_text(&form.category);
        vehicle.brand = optional_text(&form.brand);
        vehicle.model_type = optional_text(&form.model_type);
        vehicle.fuel_type = optional_text(&form.fuel_type);
        vehicle.ownership_type = form.ownership_type.as_deref().and_then(optional_text);
        vehicle.registration_date = optional_date(&form.registration_date);
        vehicle.insurance_valid_to = optional_date(&form.insurance_valid_to);
    }
}

#[async_trait]
impl FleetBackend for InMemoryBackend {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list_drivers(&self, partition: Partition) -> FleetResult<Vec<Driver>> {
        self.enter(&self.list_calls).await?;
        let store = self.store.lock().await;
        Ok(store
            .drivers
            .iter()
            .filter(|d| partition.admits(d.blocked))
            .cloned()
            .collect())
    }

    async fn list_vehicles(&self, partition: Partition) -> FleetResult<Vec<Vehicle>> {
        self.enter(&self.list_calls).await?;
        let store = self.store.lock().await;
        Ok(store
            .vehicles
            .iter()
            .filter(|v| partition.admits(v.blacklisted))
            .cloned()
            .collect())
    }

    async fn list_employees(&self) -> FleetResult<Vec<Employee>> {
        self.enter(&self.list_calls).await?;
        Ok(self.store.lock().await.employees.clone())
    }

    async fn create_driver(&self, form: &DriverForm) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut driver = Driver::new(Uuid::new_v4().to_string(), &form.name);
        FleetStore::fill_driver(&mut driver, form);
        let id = driver.id.clone();
        self.store.lock().await.drivers.push(driver);
        Ok(BackendReply::ok_with_message(format!("Driver {} created", id)))
    }

    async fn create_vehicle(&self, form: &VehicleForm) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut store = self.store.lock().await;
        let duplicated = store
            .vehicles
            .iter()
            .any(|v| v.vehicle_number.as_deref() == Some(form.vehicle_number.as_str()));
        if duplicated {
            return Ok(BackendReply::rejected(
                409,
                format!("Vehicle {} is already registered", form.vehicle_number),
            ));
        }
        let mut vehicle = Vehicle::new(Uuid::new_v4().to_string(), &form.vehicle_number);
        FleetStore::fill_vehicle(&mut vehicle, form);
        let id = vehicle.id.clone();
        store.vehicles.push(vehicle);
        Ok(BackendReply::ok_with_message(format!("Vehicle {} created", id)))
    }

    async fn create_employee(&self, form: &EmployeeForm) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut employee = Employee::new(Uuid::new_v4().to_string(), &form.name);
        employee.phone = optional_text(&form.phone);
        employee.gender = optional_text(&form.gender);
        employee.email = optional_text(&form.email);
        employee.shift_time = form.shift_time.clone();
        employee.pickup_location = form.pickup_location.clone();
        employee.drop_location = form.drop_location.clone();
        let id = employee.id.clone();
        self.store.lock().await.employees.push(employee);
        Ok(BackendReply::ok_with_message(format!("Employee {} created", id)))
    }

    async fn update_driver(&self, id: &EntityId, form: &DriverForm) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut store = self.store.lock().await;
        match store.driver_mut(id) {
            Some(driver) => {
                FleetStore::fill_driver(driver, form);
                Ok(BackendReply::ok_with_message("Driver updated"))
            }
            None => Ok(not_found(EntityKind::Driver, id)),
        }
    }

    async fn update_vehicle(
        &self,
        id: &EntityId,
        form: &VehicleForm,
    ) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut store = self.store.lock().await;
        match store.vehicle_mut(id) {
            Some(vehicle) => {
                FleetStore::fill_vehicle(vehicle, form);
                Ok(BackendReply::ok_with_message("Vehicle updated"))
            }
            None => Ok(not_found(EntityKind::Vehicle, id)),
        }
    }

    async fn set_blocked(
        &self,
        kind: EntityKind,
        id: &EntityId,
        blocked: bool,
    ) -> FleetResult<BackendReply> {
        if !kind.has_blocked_partition() {
            return Err(FleetError::Unsupported(format!("{}s cannot be blocked", kind)));
        }
        self.enter(&self.mutation_calls).await?;

        let mut store = self.store.lock().await;
        let found = match kind {
            EntityKind::Driver => store.driver_mut(id).map(|d| d.blocked = blocked),
            EntityKind::Vehicle => store.vehicle_mut(id).map(|v| v.blacklisted = blocked),
            EntityKind::Employee => None,
        };
        if found.is_none() {
            return Ok(not_found(kind, id));
        }
        if blocked {
            store.dissolve_pairings(kind, id);
        }

        let action = if blocked { "blocked" } else { "unblocked" };
        Ok(BackendReply::ok_with_message(format!("{} {} {}", kind, id, action)))
    }

    async fn delete_employee(&self, id: &EntityId) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut store = self.store.lock().await;
        if store.employee_mut(id).is_none() {
            return Ok(not_found(EntityKind::Employee, id));
        }
        store.dissolve_pairings(EntityKind::Employee, id);
        store.employees.retain(|e| &e.id != id);
        Ok(BackendReply::ok_with_message(format!("Employee {} deleted", id)))
    }

    async fn pair_driver_vehicle(
        &self,
        driver_id: &EntityId,
        vehicle_id: &EntityId,
    ) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut store = self.store.lock().await;

        let Some(driver) = store.driver_mut(driver_id).map(|d| (d.blocked, d.paired)) else {
            return Ok(not_found(EntityKind::Driver, driver_id));
        };
        let Some(vehicle) = store
            .vehicle_mut(vehicle_id)
            .map(|v| (v.blacklisted, v.paired))
        else {
            return Ok(not_found(EntityKind::Vehicle, vehicle_id));
        };

        if driver.0 || vehicle.0 {
            return Ok(BackendReply::rejected(
                422,
                "Blocked drivers or blacklisted vehicles cannot be paired",
            ));
        }
        if driver.1 {
            return Ok(BackendReply::rejected(
                409,
                format!("Driver {} is already paired", driver_id),
            ));
        }
        if vehicle.1 {
            return Ok(BackendReply::rejected(
                409,
                format!("Vehicle {} is already paired", vehicle_id),
            ));
        }

        if let Some(driver) = store.driver_mut(driver_id) {
            driver.paired = true;
        }
        if let Some(vehicle) = store.vehicle_mut(vehicle_id) {
            vehicle.paired = true;
        }
        store.pairings.push(Pairing::DriverVehicle {
            driver_id: driver_id.clone(),
            vehicle_id: vehicle_id.clone(),
        });
        Ok(BackendReply::ok_with_message("Driver paired with vehicle"))
    }

    async fn pair_employee_driver(
        &self,
        employee_id: &EntityId,
        driver_id: &EntityId,
    ) -> FleetResult<BackendReply> {
        self.enter(&self.mutation_calls).await?;
        let mut store = self.store.lock().await;

        let Some(assigned) = store.employee_mut(employee_id).map(|e| e.driver_id.clone()) else {
            return Ok(not_found(EntityKind::Employee, employee_id));
        };
        let Some((blocked, paired)) = store.driver_mut(driver_id).map(|d| (d.blocked, d.paired))
        else {
            return Ok(not_found(EntityKind::Driver, driver_id));
        };

        if blocked {
            return Ok(BackendReply::rejected(
                422,
                "Blocked drivers cannot be assigned to employees",
            ));
        }
        if assigned.is_some() {
            return Ok(BackendReply::rejected(
                409,
                format!("Employee {} is already paired", employee_id),
            ));
        }
        if paired {
            return Ok(BackendReply::rejected(
                409,
                format!("Driver {} is already paired", driver_id),
            ));
        }

        if let Some(employee) = store.employee_mut(employee_id) {
            employee.driver_id = Some(driver_id.clone());
        }
        if let Some(driver) = store.driver_mut(driver_id) {
            driver.paired = true;
        }
        store.pairings.push(Pairing::EmployeeDriver {
            employee_id: employee_id.clone(),
            driver_id: driver_id.clone(),
        });
        Ok(BackendReply::ok_with_message("Driver assigned to employee"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_block_dissolves_pairing_on_both_sides() {
        let backend = InMemoryBackend::demo();
        let driver: EntityId = "d-101".into();
        let vehicle: EntityId = "v-201".into();

        let reply = backend.pair_driver_vehicle(&driver, &vehicle).await.unwrap();
        assert!(reply.success);

        backend
            .set_blocked(EntityKind::Vehicle, &vehicle, true)
            .await
            .unwrap();

        let store = backend.snapshot().await;
        assert!(store.pairings.is_empty());
        assert!(!store.drivers.iter().any(|d| d.id == driver && d.paired));
        assert!(store.vehicles.iter().any(|v| v.id == vehicle && v.blacklisted));
    }

    #[tokio::test]
    async fn test_second_pairing_is_a_conflict() {
        let backend = InMemoryBackend::demo();
        backend
            .pair_driver_vehicle(&"d-101".into(), &"v-201".into())
            .await
            .unwrap();
        let reply = backend
            .pair_driver_vehicle(&"d-101".into(), &"v-202".into())
            .await
            .unwrap();
        assert!(!reply.success);
        assert_eq!(reply.status, 409);
    }

    #[tokio::test]
    async fn test_offline_backend_fails_with_fetch_error() {
        let backend = InMemoryBackend::demo();
        backend.set_offline(true);
        let result = backend.list_drivers(Partition::Active).await;
        assert!(matches!(result, Err(FleetError::Fetch(_))));
        assert_eq!(backend.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_employees_cannot_be_blocked() {
        let backend = InMemoryBackend::demo();
        let result = backend
            .set_blocked(EntityKind::Employee, &"e-301".into(), true)
            .await;
        assert!(matches!(result, Err(FleetError::Unsupported(_))));
        assert_eq!(backend.mutation_calls(), 0);
    }
}
