//! `stoplist settings show|set`: local, trusted access to the stored options.
use stoplist_core::api::{save_settings, ActionMode, AppContext, CliError, SettingsForm, StoplistSettings};

use crate::commands::cli::SetArgs;
use crate::http::models::SettingsView;

pub fn handle_show(ctx: &AppContext) -> Result<i32, CliError> {
    let services = ctx.build_services()?;
    let settings = StoplistSettings::load(services.options.as_ref())?;
    print_json(&SettingsView::from(&settings))?;
    Ok(0)
}

pub fn handle_set(args: SetArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let form = settings_form(&args)?;
    if form.action.is_none() && form.tags.is_none() {
        return Err(CliError::Command(
            "nothing to change: pass --action, --tag or --tags-file".into(),
        ));
    }

    let services = ctx.build_services()?;
    let settings = save_settings(services.options.as_ref(), &form)?;
    print_json(&SettingsView::from(&settings))?;
    Ok(0)
}

/// Builds the same form the admin page submits, rejecting unknown actions up front.
fn settings_form(args: &SetArgs) -> Result<SettingsForm, CliError> {
    let action = match args.action.as_deref().map(str::trim) {
        Some(raw) => {
            let mode = ActionMode::parse(raw).ok_or_else(|| {
                let allowed: Vec<&str> = ActionMode::ALL.iter().map(|m| m.as_str()).collect();
                CliError::Command(format!(
                    "unknown action {raw:?}; expected one of {}",
                    allowed.join(", ")
                ))
            })?;
            Some(mode.as_str().to_string())
        }
        None => None,
    };

    let mut lines = args.tags.clone();
    if let Some(path) = args.tags_file.as_deref() {
        let text = std::fs::read_to_string(path)?;
        lines.extend(text.lines().map(str::to_string));
    }
    let tags = (!args.tags.is_empty() || args.tags_file.is_some()).then(|| lines.join("\n"));

    Ok(SettingsForm { action, tags })
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Command(format!("failed to encode output: {e}")))?;
    println!("{out}");
    Ok(())
}
