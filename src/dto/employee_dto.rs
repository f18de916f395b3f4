use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_email, validate_not_blank, validate_phone};

// Formulario de alta de un empleado (siempre JSON, sin documentos)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmployeeForm {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(custom = "validate_not_blank")]
    pub gender: String,

    #[validate(custom = "validate_email")]
    pub email: String,

    pub shift_time: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_form_checks_email_and_phone() {
        let form = EmployeeForm {
            name: "Asha".to_string(),
            phone: "98765".to_string(),
            gender: "female".to_string(),
            email: "asha@".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("name"));
    }
}
