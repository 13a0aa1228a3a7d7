use heck::ToSnakeCase;
use serde::Serialize;

use crate::ast::{Schema, Service};
use crate::error::GenerateError;

pub const DEFAULT_HANDLER_IMPORT: &str = "crate::handlers";
pub const DEFAULT_GENERATED_IMPORT: &str = "crate::svc";

/// Everything a template can read; built once per generation run.
///
/// Templates see these fields by name (`service.methods`, `handler_import`, ...)
/// plus the filters registered by [`super::environment`]. Referencing
/// anything else is an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationContext {
    /// Module path of the user-owned handler code.
    pub handler_import: String,
    /// Module path of the generated routing and decoding code.
    pub generated_import: String,
    /// Proto file that declares the service.
    pub proto_file: String,
    pub package: String,
    /// snake_case service name; substituted for `NAME` in stored paths.
    pub service_name: String,
    pub service: Service,
    pub generator_version: &'static str,
}

impl GenerationContext {
    /// Pick the service to generate against.
    ///
    /// With `wanted`, the service whose short or qualified name matches;
    /// otherwise the first service of the first file.
    ///
    /// # Errors
    ///
    /// [`GenerateError::NoService`] when no service qualifies.
    pub fn select(schema: &Schema, wanted: Option<&str>) -> Result<Self, GenerateError> {
        let found = match wanted {
            Some(name) => schema.find_service(name),
            None => schema.services().next(),
        };
        let (file, service) = found.ok_or_else(|| GenerateError::NoService {
            wanted: wanted.map(str::to_string),
        })?;
        Ok(Self {
            handler_import: DEFAULT_HANDLER_IMPORT.to_string(),
            generated_import: DEFAULT_GENERATED_IMPORT.to_string(),
            proto_file: file.name.clone(),
            package: file.package.clone(),
            service_name: service.name.to_snake_case(),
            service: service.clone(),
            generator_version: env!("CARGO_PKG_VERSION"),
        })
    }

    /// Override the import paths; `None` keeps the current value.
    #[must_use]
    pub fn with_imports(mut self, handler: Option<&str>, generated: Option<&str>) -> Self {
        if let Some(handler) = handler {
            self.handler_import = handler.to_string();
        }
        if let Some(generated) = generated {
            self.generated_import = generated.to_string();
        }
        self
    }
}
