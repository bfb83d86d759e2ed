use std::io::Write;
use std::thread;
use std::time::Duration;

use repbook_core::model::{AppSettings, SoundType};
use repbook_core::timer::{format_elapsed, CountdownTick, RestCountdown};
use repbook_core::tools::{estimate_one_rm, percentage_table, plate_loader};

use crate::app::AppContext;
use crate::cli::{OneRmArgs, PlatesArgs, RestArgs};
use crate::errors::CliError;
use crate::helpers::parse_number;
use crate::output::print_json;
use crate::ui::{badge, blank_line, format_kg, header, kv, print, simple_table, Badge, Column};

pub fn handle_one_rm(ctx: &AppContext, args: &OneRmArgs) -> anyhow::Result<()> {
    let weight = parse_number(&args.weight, "Weight")?;
    let reps = parse_number(&args.reps, "Reps")?;
    let one_rm = estimate_one_rm(weight, reps);
    let rows = percentage_table(one_rm);
    let ui_ctx = ctx.ui_context(args.output.json);

    if ui_ctx.mode.is_json() {
        return print_json(&serde_json::json!({
            "weight": weight,
            "reps": reps,
            "one_rm": one_rm,
            "percentages": rows,
        }));
    }

    print(&ui_ctx, &header(&ui_ctx, "1RM", None));
    print(&ui_ctx, &kv(&ui_ctx, "1RM", &format!("{} kg", format_kg(one_rm))));
    blank_line(&ui_ctx);
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| vec![format!("{}%", row.percent), format!("{} kg", format_kg(row.weight))])
        .collect();
    print(
        &ui_ctx,
        &simple_table(&ui_ctx, &[Column::numeric("%"), Column::numeric("Weight")], &table_rows),
    );
    Ok(())
}

pub fn handle_plates(ctx: &AppContext, args: &PlatesArgs) -> anyhow::Result<()> {
    let target = parse_number(&args.target, "Target weight")?;
    if !args.bar.is_finite() || args.bar < 0.0 {
        return Err(CliError::invalid_input(format!(
            "Bar weight must be positive, got {}",
            args.bar
        ))
        .into());
    }
    let load = plate_loader(target, args.bar);
    let ui_ctx = ctx.ui_context(args.output.json);

    if ui_ctx.mode.is_json() {
        return print_json(&serde_json::json!({
            "target": target,
            "bar": load.bar,
            "per_side": load.per_side,
            "remainder_per_side": load.remainder_per_side,
        }));
    }

    let plates = if load.per_side.is_empty() {
        "-".to_string()
    } else {
        load.per_side
            .iter()
            .map(|p| format_kg(*p))
            .collect::<Vec<_>>()
            .join(" + ")
    };

    print(&ui_ctx, &header(&ui_ctx, "plates", None));
    print(&ui_ctx, &kv(&ui_ctx, "Target", &format!("{} kg", format_kg(target))));
    print(&ui_ctx, &kv(&ui_ctx, "Bar", &format!("{} kg", format_kg(load.bar))));
    print(&ui_ctx, &kv(&ui_ctx, "Per side", &plates));
    if load.remainder_per_side > 0.0 {
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Warn,
                &format!(
                    "{} kg per side cannot be loaded with the available plates",
                    format_kg(load.remainder_per_side)
                ),
            ),
        );
    }
    Ok(())
}

pub fn handle_rest(ctx: &AppContext, args: &RestArgs) -> anyhow::Result<()> {
    if args.seconds == 0 {
        return Err(CliError::invalid_input("Rest must be at least one second").into());
    }
    let settings = ctx.open_state()?.settings().clone();
    let ui_ctx = ctx.ui_context(false);

    let mut countdown = RestCountdown::new();
    countdown.toggle(args.seconds);
    let mut stdout = std::io::stdout();
    if ui_ctx.allows_animation() {
        print!("\rRest {}", format_elapsed(u64::from(args.seconds)));
        stdout.flush()?;
    }

    loop {
        thread::sleep(Duration::from_secs(1));
        match countdown.tick() {
            CountdownTick::Remaining(left) => {
                if ui_ctx.allows_animation() {
                    print!("\rRest {}", format_elapsed(u64::from(left)));
                    stdout.flush()?;
                }
            }
            CountdownTick::Fired | CountdownTick::Idle => break,
        }
    }

    if ui_ctx.allows_animation() {
        println!();
    }
    print!("{}", alert(&settings));
    stdout.flush()?;
    if !ctx.quiet() {
        print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Rest over"));
    }
    Ok(())
}

/// Terminal bells for the configured sound; nothing when muted.
fn alert(settings: &AppSettings) -> &'static str {
    if settings.volume <= 0.0 {
        return "";
    }
    match settings.sound_type {
        SoundType::Beep1 | SoundType::Beep2 => "\x07",
        SoundType::Beep3 => "\x07\x07",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_follows_settings() {
        let settings = AppSettings::default();
        assert_eq!(alert(&settings), "\x07");
        assert_eq!(alert(&settings.clone().with_sound_type(SoundType::Beep3)), "\x07\x07");
        assert_eq!(alert(&settings.with_volume(0.0)), "");
    }
}
