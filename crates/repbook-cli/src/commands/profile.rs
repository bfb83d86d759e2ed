use repbook_core::Namespace;

use crate::app::{missing_config_message, resolve_config_path, AppContext};
use crate::cli::{OutputArgs, ProfileSwitchArgs};
use crate::config::{read_config, write_config};
use crate::errors::CliError;
use crate::output::print_json;
use crate::ui::{header, kv, print, receipt};

pub fn handle_show(ctx: &AppContext, output: &OutputArgs) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let store_path = ctx.store_path()?;
    let state = ctx.open_state()?;
    let metadata = state.store().backend().metadata()?;
    let ui_ctx = ctx.ui_context(output.json);

    if ui_ctx.mode.is_json() {
        return print_json(&serde_json::json!({
            "name": config.profile.name,
            "prefix": config.profile.prefix,
            "store": store_path,
            "plans": state.workouts().len(),
            "metadata": metadata,
        }));
    }

    let store_display = store_path.display().to_string();
    let plans = state.workouts().len().to_string();
    let device = metadata.device_id.to_string();
    let created = metadata.created_at.format("%Y-%m-%d %H:%M UTC").to_string();

    print(&ui_ctx, &header(&ui_ctx, "profile", Some(&config.profile.name)));
    for (key, value) in [
        ("Name", config.profile.name.as_str()),
        ("Prefix", config.profile.prefix.as_str()),
        ("Store", store_display.as_str()),
        ("Plans", plans.as_str()),
        ("Format", metadata.format_version.as_str()),
        ("Device", device.as_str()),
        ("Created", created.as_str()),
    ] {
        print(&ui_ctx, &kv(&ui_ctx, key, value));
    }
    Ok(())
}

pub fn handle_switch(ctx: &AppContext, args: &ProfileSwitchArgs) -> anyhow::Result<()> {
    if args.name.is_none() && args.prefix.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass --name and/or --prefix.",
        )
        .into());
    }

    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Err(CliError::not_found(
            missing_config_message(&config_path),
            "Hint: Run `repbook init` to create it.",
        )
        .into());
    }
    let mut config = read_config(&config_path)?;

    if let Some(name) = &args.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(CliError::invalid_input("Display name cannot be empty").into());
        }
        config.profile.name = name.to_string();
    }
    if let Some(prefix) = &args.prefix {
        let namespace =
            Namespace::new(prefix.trim()).map_err(|e| CliError::invalid_input(e.to_string()))?;
        config.profile.prefix = namespace.prefix().to_string();
    }

    write_config(&config_path, &config)?;
    tracing::info!(name = %config.profile.name, prefix = %config.profile.prefix, "switched profile");

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Profile switched",
                &[("Name", &config.profile.name), ("Prefix", &config.profile.prefix)],
            ),
        );
    }
    Ok(())
}
