use chrono::Utc;

use repbook_core::measurements::metric_series;
use repbook_core::model::{BodyMeasurement, Metric};

use crate::app::AppContext;
use crate::cli::{IdArgs, MeasureAddArgs, MeasureChartArgs, OutputArgs};
use crate::errors::CliError;
use crate::helpers::{parse_date, today};
use crate::output::print_json;
use crate::ui::format::{bar, pad_right};
use crate::ui::{badge, blank_line, format_kg, header, hint, kv, print, receipt, table, Badge, Column};

pub fn handle_add(ctx: &AppContext, args: &MeasureAddArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => today(),
    };

    let measurement = BodyMeasurement {
        id: Utc::now().timestamp_millis().to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        weight: field(&args.weight),
        waist: field(&args.waist),
        chest: field(&args.chest),
        biceps: field(&args.biceps),
        thigh: field(&args.thigh),
    };
    let saved = state.measurements().add(measurement)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let mut items = vec![("ID", saved.id.as_str()), ("Date", saved.date.as_str())];
        for metric in Metric::ALL {
            let value = saved.value(metric);
            if !value.is_empty() {
                items.push((metric.label(), value));
            }
        }
        print(&ui_ctx, &receipt(&ui_ctx, "Measurement saved", &items));
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, output: &OutputArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let ui_ctx = ctx.ui_context(output.json);
    let items = state.measurements().list();

    if ui_ctx.mode.is_json() {
        return print_json(&items);
    }

    print(&ui_ctx, &header(&ui_ctx, "measurements", None));
    if items.is_empty() {
        print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No measurements yet"));
        return Ok(());
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|m| {
            let mut row = vec![m.id.clone(), m.date.clone()];
            row.extend(Metric::ALL.iter().map(|metric| cell(m.value(*metric))));
            row
        })
        .collect();
    let mut columns = vec![Column::new("ID"), Column::new("Date")];
    columns.extend(Metric::ALL.iter().map(|metric| Column::numeric(metric.label())));
    print(&ui_ctx, &table(&ui_ctx, &columns, &rows));
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    ctx.require_confirmation(
        &format!("Delete measurement {}?", args.id),
        "Deleting the measurement",
    )?;
    let removed = state.measurements().delete(&args.id)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Measurement deleted",
                &[("ID", &removed.id), ("Date", &removed.date)],
            ),
        );
    }
    Ok(())
}

pub fn handle_chart(ctx: &AppContext, args: &MeasureChartArgs) -> anyhow::Result<()> {
    let metric: Metric = args.metric.parse()?;
    let state = ctx.open_state()?;
    let ui_ctx = ctx.ui_context(args.output.json);
    let series = metric_series(&state.measurements().list(), metric);

    if ui_ctx.mode.is_json() {
        return print_json(&serde_json::json!({
            "metric": series.metric,
            "label": series.label,
            "chartable": series.is_chartable(),
            "domain": [series.domain.0, series.domain.1],
            "points": series.points,
        }));
    }

    if !series.is_chartable() {
        return Err(CliError::not_found(
            format!("Not enough data to chart {}", series.label),
            "Hint: Record at least two measurements with `repbook measure add`.",
        )
        .into());
    }

    let (min, max) = series.domain;
    print(&ui_ctx, &header(&ui_ctx, "chart", Some(series.label)));
    print(
        &ui_ctx,
        &kv(&ui_ctx, "Range", &format!("{} - {}", format_kg(min), format_kg(max))),
    );
    blank_line(&ui_ctx);
    for point in &series.points {
        let value = format_kg(point.value);
        if ui_ctx.mode.is_pretty() {
            let width = ui_ctx.width.saturating_sub(22).clamp(10, 40);
            println!(
                "{}  {}  {}",
                point.date,
                pad_right(&value, 6),
                bar(point.value, min, max, width, ui_ctx.unicode)
            );
        } else {
            println!("{}\t{}", point.date, value);
        }
    }
    if ui_ctx.mode.is_pretty() {
        blank_line(&ui_ctx);
        print(&ui_ctx, &hint(&ui_ctx, "repbook measure chart waist|chest|biceps|thigh"));
    }
    Ok(())
}

fn field(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn cell(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
