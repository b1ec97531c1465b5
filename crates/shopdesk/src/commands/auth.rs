//! Login, logout, whoami, and the `profile` group.

use dialoguer::Input;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use shopdesk_api::{CoreApi, ProfileUpdate, UserProfile};

use crate::cli::{GlobalOpts, LoginArgs, ProfileArgs, ProfileCommand};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

/// Serializable view of the stored session (no token).
#[derive(Serialize)]
struct SessionView {
    username: String,
    role: String,
    user_id: Option<String>,
    customer_id: Option<String>,
    api_url: String,
}

fn session_detail(s: &SessionView) -> String {
    output::detail_lines(&[
        ("Username", s.username.clone()),
        ("Role", s.role.clone()),
        ("User ID", s.user_id.clone().unwrap_or_default()),
        ("Customer ID", s.customer_id.clone().unwrap_or_default()),
        ("API", s.api_url.clone()),
    ])
}

fn profile_detail(p: &UserProfile) -> String {
    output::detail_lines(&[
        ("ID", p.id.to_string()),
        ("Username", p.username.clone()),
        ("Full name", p.full_name.clone().unwrap_or_default()),
        ("Email", p.email.clone().unwrap_or_default()),
        ("Phone", p.phone.clone().unwrap_or_default()),
        ("Role", util::opt_string(p.role.as_ref())),
    ])
}

fn prompt_password(label: &str) -> Result<SecretString, CliError> {
    let pass = rpassword::prompt_password(label).map_err(util::prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(pass))
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(
    api: &CoreApi,
    args: LoginArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let profile_name = config::active_profile_name(global, cfg);
    let profile = config::effective_profile(global, cfg)?;

    let username = match args.username {
        Some(u) => u,
        None => match shopdesk_config::resolve_username(&profile, &profile_name) {
            Ok(u) => u,
            Err(_) => Input::new()
                .with_prompt("Username")
                .interact_text()
                .map_err(util::prompt_err)?,
        },
    };

    let password = match shopdesk_config::resolve_password(&profile, &profile_name) {
        Ok(pw) => pw,
        Err(_) => prompt_password("Password: ")?,
    };

    let session = api.login(&username, &password).await?;
    output::note(
        &format!(
            "✓ Logged in as {} ({}) on profile '{profile_name}'",
            session.username, session.role
        ),
        global.quiet,
    );
    Ok(())
}

pub async fn logout(api: &CoreApi, global: &GlobalOpts) -> Result<(), CliError> {
    if api.session().is_none() {
        output::note("Not logged in", global.quiet);
        return Ok(());
    }
    api.logout().await?;
    output::note("✓ Logged out", global.quiet);
    Ok(())
}

pub fn whoami(api: &CoreApi, global: &GlobalOpts) -> Result<(), CliError> {
    let session = api.require_session()?;
    let view = SessionView {
        username: session.username,
        role: session.role.to_string(),
        user_id: session.user_id,
        customer_id: session.customer_id,
        api_url: api.http().base_url().to_string(),
    };
    let out = output::render_single(&global.output, &view, session_detail, |s| {
        s.username.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn profile(api: &CoreApi, args: ProfileArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ProfileCommand::Show => {
            let me = api.user().profile().await?;
            let out = output::render_single(&global.output, &me, profile_detail, |p| {
                p.username.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProfileCommand::Update {
            email,
            full_name,
            phone,
        } => {
            let update = ProfileUpdate {
                email,
                full_name,
                phone,
            };
            if update == ProfileUpdate::default() {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: "nothing to update; pass --email, --full-name, or --phone".into(),
                });
            }
            let me = api.user().update_profile(&update).await?;
            let out = output::render_single(&global.output, &me, profile_detail, |p| {
                p.username.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProfileCommand::Password => {
            let current = prompt_password("Current password: ")?;
            let new = prompt_password("New password: ")?;
            let again = prompt_password("Repeat new password: ")?;
            if new.expose_secret() != again.expose_secret() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "new passwords do not match".into(),
                });
            }
            api.user().change_password(&current, &new).await?;
            output::note("✓ Password changed", global.quiet);
            Ok(())
        }
    }
}
