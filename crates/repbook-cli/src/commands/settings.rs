use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use repbook_core::model::SoundType;

use crate::app::AppContext;
use crate::cli::{LogoSetArgs, OutputArgs, SettingsSetArgs};
use crate::errors::CliError;
use crate::output::print_json;
use crate::ui::{header, kv, print, receipt, truncate};

pub fn handle_show(ctx: &AppContext, output: &OutputArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let settings = state.settings();
    let ui_ctx = ctx.ui_context(output.json);

    if ui_ctx.mode.is_json() {
        return print_json(settings);
    }

    print(&ui_ctx, &header(&ui_ctx, "settings", None));
    print(&ui_ctx, &kv(&ui_ctx, "Volume", &format!("{:.2}", settings.volume)));
    print(
        &ui_ctx,
        &kv(
            &ui_ctx,
            "Sound",
            &format!("{} ({})", settings.sound_type.as_str(), settings.sound_type.label()),
        ),
    );
    Ok(())
}

pub fn handle_set(ctx: &AppContext, args: &SettingsSetArgs) -> anyhow::Result<()> {
    if args.volume.is_none() && args.sound.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass --volume <0-1> or --sound beep1|beep2|beep3.",
        )
        .into());
    }
    let sound = args
        .sound
        .as_deref()
        .map(|s| s.trim().parse::<SoundType>())
        .transpose()?;

    let mut state = ctx.open_state()?;
    let mut settings = state.settings().clone();
    if let Some(volume) = args.volume {
        settings = settings.with_volume(volume);
    }
    if let Some(sound) = sound {
        settings = settings.with_sound_type(sound);
    }
    state.update_settings(settings.clone())?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let volume = format!("{:.2}", settings.volume);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Settings saved",
                &[("Volume", &volume), ("Sound", settings.sound_type.as_str())],
            ),
        );
    }
    Ok(())
}

pub fn handle_logo_show(ctx: &AppContext) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let ui_ctx = ctx.ui_context(false);
    let logo = state.logo();

    if ui_ctx.mode.is_pretty() {
        print(&ui_ctx, &header(&ui_ctx, "logo", Some(state.display_name())));
        print(&ui_ctx, &kv(&ui_ctx, "Logo", &truncate(logo, 72)));
    } else {
        println!("{}", logo);
    }
    Ok(())
}

pub fn handle_logo_set(ctx: &AppContext, args: &LogoSetArgs) -> anyhow::Result<()> {
    let source = args.source.trim();
    let logo = if is_url(source) {
        source.to_string()
    } else {
        data_url_from_file(Path::new(source))?
    };

    let mut state = ctx.open_state()?;
    state.update_logo(logo.as_str())?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let stored = truncate(&logo, 48);
        let size = format!("{} bytes", logo.len());
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Logo updated", &[("Logo", &stored), ("Size", &size)]),
        );
    }
    Ok(())
}

fn is_url(source: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| source.starts_with(scheme))
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Inline an image file as a `data:` URL.
fn data_url_from_file(path: &Path) -> anyhow::Result<String> {
    let mime = image_mime(path).ok_or_else(|| {
        CliError::invalid_input(format!(
            "Unsupported logo file {}\nHint: Use a png, jpg, gif, webp or svg image, or an http(s) URL.",
            path.display()
        ))
    })?;
    let bytes = std::fs::read(path).map_err(|e| {
        CliError::not_found(
            format!("Failed to read logo {}: {}", path.display(), e),
            "Hint: Check the file path.",
        )
    })?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/logo.png"));
        assert!(is_url("data:image/png;base64,AA=="));
        assert!(!is_url("logo.png"));
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("a/logo.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("logo.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("logo.txt")), None);
        assert_eq!(image_mime(Path::new("logo")), None);
    }

    #[test]
    fn test_data_url_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, [0u8, 1, 2]).unwrap();

        assert_eq!(data_url_from_file(&path).unwrap(), "data:image/png;base64,AAEC");
    }
}
