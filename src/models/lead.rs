use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_SERVICE: &str = "No especificado";
pub const DEFAULT_MESSAGE: &str = "Contacto desde formulario web";

/// Raw body of `POST /save_lead`; every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadForm {
    pub nombre: Option<String>,
    pub telefono: Option<String>,
    pub servicio: Option<String>,
    pub mensaje: Option<String>,
}

/// A validated lead, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    pub nombre: String,
    pub telefono: String,
    pub servicio: String,
    pub mensaje: String,
}

impl TryFrom<LeadForm> for Lead {
    type Error = AppError;

    fn try_from(form: LeadForm) -> Result<Self, Self::Error> {
        let nombre = form.nombre.filter(|v| !v.trim().is_empty());
        let telefono = form.telefono.filter(|v| !v.trim().is_empty());

        match (nombre, telefono) {
            (Some(nombre), Some(telefono)) => Ok(Lead {
                nombre,
                telefono,
                servicio: form.servicio.unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
                mensaje: form.mensaje.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            }),
            _ => Err(AppError::Validation(
                "Missing required fields: nombre and telefono.".to_string(),
            )),
        }
    }
}
