//! # Document Loading
//!
//! Reads schema and candidate documents from disk as `serde_json::Value`.
//! YAML input is parsed with `serde_yaml` and converted to the equivalent
//! JSON tree, so the engine only ever sees JSON values.

use std::path::Path;

use clap::ValueEnum;
use serde_json::Value;
use thiserror::Error;

/// Input format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// `.yaml` and `.yml` files are YAML, everything else is JSON.
    #[default]
    Auto,
    Json,
    Yaml,
}

impl Format {
    /// Resolve `Auto` against the extension of `path`.
    pub fn resolve(self, path: &Path) -> Format {
        match self {
            Format::Auto => match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
                "yaml" | "yml" => Format::Yaml,
                _ => Format::Json,
            },
            explicit => explicit,
        }
    }
}

/// Errors raised while loading a document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML tree uses a construct with no JSON equivalent.
    #[error("cannot convert YAML in {path} to JSON: {source}")]
    Conversion {
        path: String,
        #[source]
        source: ConversionError,
    },
}

/// A YAML construct with no JSON equivalent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// NaN and infinities have no JSON number form.
    #[error("float {0} is not representable in JSON")]
    NonFiniteFloat(f64),

    /// Sequences, mappings, and null cannot be JSON object keys.
    #[error("mapping key {0} is not a scalar")]
    CompoundKey(String),
}

/// Load `path` as a JSON value, parsing it according to `format`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub fn load(path: &Path, format: Format) -> Result<Value, LoadError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    parse(&content, format.resolve(path), &display)
}

/// Parse `content` in an already-resolved `format`. `origin` names the
/// source in error messages.
pub fn parse(content: &str, format: Format, origin: &str) -> Result<Value, LoadError> {
    match format {
        Format::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
                    path: origin.to_string(),
                    source,
                })?;
            yaml_to_json_value(&yaml).map_err(|source| LoadError::Conversion {
                path: origin.to_string(),
                source,
            })
        }
        Format::Json | Format::Auto => {
            serde_json::from_str(content).map_err(|source| LoadError::Json {
                path: origin.to_string(),
                source,
            })
        }
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped in favor of the tagged value. Scalar map keys are
/// stringified; compound keys are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, ConversionError> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => number(n)?,
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => items
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<_, _>>()
            .map(Value::Array)?,
        Yaml::Mapping(map) => map
            .iter()
            .map(|(k, v)| Ok((key(k)?, yaml_to_json_value(v)?)))
            .collect::<Result<_, ConversionError>>()
            .map(Value::Object)?,
        Yaml::Tagged(tagged) => yaml_to_json_value(&tagged.value)?,
    })
}

fn number(n: &serde_yaml::Number) -> Result<Value, ConversionError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    // Every remaining YAML number is a float.
    let f = n.as_f64().unwrap_or(f64::NAN);
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .ok_or(ConversionError::NonFiniteFloat(f))
}

fn key(k: &serde_yaml::Value) -> Result<String, ConversionError> {
    match k {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => key(&tagged.value),
        other => Err(ConversionError::CompoundKey(format!("{other:?}"))),
    }
}
