//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use shopdesk_api::{EntityId, ImageUpload, ListQuery};

use crate::cli::{ListArgs, NamedFields, PayloadArgs};
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

pub fn entity_id(raw: &str) -> EntityId {
    EntityId::from(raw)
}

/// Translate list flags into the query passed to the backend.
pub fn list_query(args: &ListArgs) -> ListQuery {
    let mut query = ListQuery::paged(args.page, args.size);
    if let Some(ref term) = args.search {
        query = query.search(term.clone());
    }
    if let Some(ref status) = args.status {
        query = query.status(status.to_uppercase());
    }
    query
}

/// Parse a CLI value as JSON when it looks like JSON, else keep it a string.
pub fn loose_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Request body builder: `--from-file` contents overlaid with flag values.
#[derive(Debug, Default)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    pub fn from_args(args: &PayloadArgs) -> Result<Self, CliError> {
        let Some(ref path) = args.from_file else {
            return Ok(Self::default());
        };
        match read_json_file(path)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(CliError::Validation {
                field: "from-file".into(),
                reason: "expected a JSON object".into(),
            }),
        }
    }

    /// Set `key` when the flag was given.
    pub fn opt(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.fields.insert(key.to_owned(), value.into());
        }
        self
    }

    /// Apply `KEY=VALUE` pairs from `--set`.
    pub fn assignments(mut self, pairs: &[String]) -> Result<Self, CliError> {
        for pair in pairs {
            let (key, value) = pair.split_once('=').ok_or_else(|| CliError::Validation {
                field: "set".into(),
                reason: format!("expected KEY=VALUE, got '{pair}'"),
            })?;
            self.fields.insert(key.trim().to_owned(), loose_json(value));
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode into the typed request body.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, CliError> {
        serde_json::from_value(Value::Object(self.fields)).map_err(|e| CliError::Validation {
            field: "payload".into(),
            reason: e.to_string(),
        })
    }

    /// Like `build`, but refuse an empty body.
    pub fn build_nonempty<T: DeserializeOwned>(self, what: &str) -> Result<T, CliError> {
        if self.is_empty() {
            return Err(CliError::Validation {
                field: what.into(),
                reason: "no fields given; pass flags or --from-file".into(),
            });
        }
        self.build()
    }
}

/// Payload for the shared name/description/--set field group.
pub fn named_payload(fields: &NamedFields) -> Result<Payload, CliError> {
    Payload::from_args(&fields.payload)?
        .opt("name", fields.name.clone())
        .opt("description", fields.description.clone())
        .assignments(&fields.set)
}

/// Validate an image file before any request is made.
pub fn load_image(path: &Path) -> Result<ImageUpload, CliError> {
    Ok(ImageUpload::from_path(path)?)
}

pub fn opt_string<T: ToString>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
