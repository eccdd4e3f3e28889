use crate::error::SchemaError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Describes one typed port of a node class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSpec {
    #[serde(rename = "type")]
    pub port_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

/// Describes one configurable parameter of a node class.
///
/// `default_value` and `constraints` are deliberately loose: the editor
/// accepts numeric bounds, enumerated options, or arbitrary nested JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub default_value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

/// Describes one callable method of a node class and the ports it touches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// The two editable fields of a [`ParameterSpec`], as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    DefaultValue,
    Constraints,
}

impl ParameterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterField::DefaultValue => "default_value",
            ParameterField::Constraints => "constraints",
        }
    }
}

/// The typed port/parameter/method description of one node class.
///
/// All four mappings are insertion-ordered with unique keys; insertion order
/// is the display order in the editor. `inputs` and `outputs` are separate
/// namespaces, so the same name may appear in both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub inputs: IndexMap<String, PortSpec>,
    #[serde(default)]
    pub outputs: IndexMap<String, PortSpec>,
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterSpec>,
    #[serde(default)]
    pub methods: IndexMap<String, MethodSpec>,
}

impl Schema {
    /// Checks well-formedness: no empty port types, and every port a method
    /// references must exist in the matching mapping.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (mapping, ports) in [("inputs", &self.inputs), ("outputs", &self.outputs)] {
            for (name, spec) in ports {
                if spec.port_type.trim().is_empty() {
                    return Err(SchemaError::EmptyPortType {
                        mapping,
                        port: name.clone(),
                    });
                }
            }
        }
        for (method, spec) in &self.methods {
            for port in &spec.inputs {
                if !self.inputs.contains_key(port) {
                    return Err(SchemaError::UnknownMethodPort {
                        method: method.clone(),
                        direction: "input",
                        port: port.clone(),
                    });
                }
            }
            for port in &spec.outputs {
                if !self.outputs.contains_key(port) {
                    return Err(SchemaError::UnknownMethodPort {
                        method: method.clone(),
                        direction: "output",
                        port: port.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the parameter spec for `key`, or an error naming the key.
    pub fn parameter(&self, key: &str) -> Result<&ParameterSpec, SchemaError> {
        self.parameters
            .get(key)
            .ok_or_else(|| SchemaError::UnknownParameter(key.to_string()))
    }

    /// Writes one editable field of a parameter. This is the single entry
    /// point the synchronizer uses for its optimistic apply.
    pub fn set_parameter_field(
        &mut self,
        key: &str,
        field: ParameterField,
        value: serde_json::Value,
    ) -> Result<(), SchemaError> {
        let spec = self
            .parameters
            .get_mut(key)
            .ok_or_else(|| SchemaError::UnknownParameter(key.to_string()))?;
        match field {
            ParameterField::DefaultValue => spec.default_value = value,
            ParameterField::Constraints => spec.constraints = Some(value),
        }
        Ok(())
    }
}
