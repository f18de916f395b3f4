//! Filtro de disponibilidad
//!
//! Una entidad está disponible para un nuevo emparejamiento si no está
//! bloqueada y, salvo que se indique lo contrario, no está ya emparejada.

use crate::models::RosterEntity;

/// Entidades elegibles, en el orden del backend
pub fn available<T: RosterEntity>(roster: &[T], exclude_already_paired: bool) -> Vec<&T> {
    roster
        .iter()
        .filter(|entity| !entity.is_blocked())
        .filter(|entity| !(exclude_already_paired && entity.is_paired()))
        .collect()
}

/// Igual que `available` pero devolviendo copias, para las vistas
pub fn available_owned<T: RosterEntity>(roster: &[T], exclude_already_paired: bool) -> Vec<T> {
    available(roster, exclude_already_paired)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, Employee, EntityId, Vehicle};

    fn driver(id: i64, name: &str, paired: bool) -> Driver {
        let mut driver = Driver::new(id, name);
        driver.paired = paired;
        driver
    }

    #[test]
    fn test_available_skips_paired() {
        let roster = vec![driver(1, "A", false), driver(2, "B", true)];
        let result = available(&roster, true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, EntityId::from(1));
    }

    #[test]
    fn test_available_skips_blacklisted_even_when_paired_allowed() {
        let mut blacklisted = Vehicle::new("v1", "MH12AB1234");
        blacklisted.blacklisted = true;
        let mut paired = Vehicle::new("v2", "MH12AB1235");
        paired.paired = true;
        let roster = vec![blacklisted, paired];

        let result = available(&roster, false);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, EntityId::from("v2"));
        assert!(available(&roster, true).is_empty());
    }

    #[test]
    fn test_available_keeps_backend_order_and_is_idempotent() {
        let roster = vec![
            driver(3, "C", false),
            driver(1, "A", false),
            driver(2, "B", true),
            driver(5, "E", false),
        ];
        let first: Vec<_> = available(&roster, true).iter().map(|d| d.id.clone()).collect();
        let second: Vec<_> = available(&roster, true).iter().map(|d| d.id.clone()).collect();
        assert_eq!(
            first,
            vec![EntityId::from(3), EntityId::from(1), EntityId::from(5)]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_assigned_employees_are_not_available() {
        let mut assigned = Employee::new("e1", "Asha");
        assigned.driver_id = Some("d1".into());
        let roster = vec![assigned, Employee::new("e2", "Neha")];
        let result = available_owned(&roster, true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, EntityId::from("e2"));
    }
}
