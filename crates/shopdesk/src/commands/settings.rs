//! Platform settings handlers.

use tabled::Tabled;

use shopdesk_api::{CoreApi, Setting};

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Strings print bare; everything else as compact JSON.
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<&Setting> for SettingRow {
    fn from(s: &Setting) -> Self {
        Self {
            key: s.key.clone(),
            value: value_text(&s.value),
            description: s.description.clone().unwrap_or_default(),
        }
    }
}

fn detail(s: &Setting) -> String {
    output::detail_lines(&[
        ("Key", s.key.clone()),
        ("Value", value_text(&s.value)),
        ("Description", s.description.clone().unwrap_or_default()),
    ])
}

pub async fn handle(api: &CoreApi, args: SettingsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SettingsCommand::List => {
            let settings = api.settings().list().await?;
            let out = output::render_list(
                &global.output,
                &settings,
                |s| SettingRow::from(s),
                |s| s.key.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SettingsCommand::Get { key } => {
            let setting = api.settings().get(&key).await?;
            let out = output::render_single(&global.output, &setting, detail, |s| {
                value_text(&s.value)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SettingsCommand::Set { key, value } => {
            let setting = api.settings().update(&key, util::loose_json(&value)).await?;
            output::note(&format!("✓ {} updated", setting.key), global.quiet);
            let out = output::render_single(&global.output, &setting, detail, |s| {
                value_text(&s.value)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strings_print_without_quotes() {
        assert_eq!(value_text(&json!("VND")), "VND");
        assert_eq!(value_text(&json!(5)), "5");
        assert_eq!(value_text(&json!({"a": true})), r#"{"a":true}"#);
    }
}
