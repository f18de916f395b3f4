//! Filtro de búsqueda de las vistas de listado
//!
//! Coincidencia por subcadena, sin distinguir mayúsculas, sobre los campos
//! indicados. Un campo ausente cuenta como no coincidente.

use crate::models::RosterEntity;

pub fn search<'a, T: RosterEntity>(roster: &'a [T], query: &str, fields: &[&str]) -> Vec<&'a T> {
    if query.is_empty() {
        return roster.iter().collect();
    }
    let needle = query.to_lowercase();

    roster
        .iter()
        .filter(|entity| {
            fields.iter().any(|field| {
                entity
                    .field_value(field)
                    .map(|value| value.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .collect()
}
