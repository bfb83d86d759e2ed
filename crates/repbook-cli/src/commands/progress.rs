use std::path::Path;

use repbook_core::progress::{plan_report, report_filename, ProgressReport};
use repbook_core::{fs, RepbookError};

use crate::app::AppContext;
use crate::cli::ProgressArgs;
use crate::output::print_json;
use crate::ui::format::{bar, pad_right};
use crate::ui::{badge, blank_line, format_kg, header, print, receipt, Badge, UiContext};

pub fn handle_progress(ctx: &AppContext, args: &ProgressArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let plan = state
        .workouts()
        .get(&args.plan)
        .ok_or_else(|| RepbookError::PlanNotFound(args.plan.clone()))?;
    let history = state.history().list(&args.plan);

    let mut report = plan_report(state.display_name(), &args.plan, plan, &history);
    if let Some(exercise_id) = &args.exercise {
        report.exercises.retain(|series| &series.exercise_id == exercise_id);
        if report.exercises.is_empty() {
            return Err(RepbookError::NotFound(format!(
                "Exercise '{}' in plan '{}'",
                exercise_id, args.plan
            ))
            .into());
        }
    }

    let ui_ctx = ctx.ui_context(args.output.json);

    if let Some(dir) = &args.save {
        let (extension, contents) = if ui_ctx.mode.is_json() {
            ("json", serde_json::to_string_pretty(&report)?)
        } else {
            ("txt", report_text(&report))
        };
        let path = Path::new(dir).join(report_filename(&report.client, &report.plan_id, extension));
        fs::write_atomic(&path, contents.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write report {}: {}", path.display(), e))?;
        tracing::info!(path = %path.display(), "saved progress report");

        if ui_ctx.mode.is_json() {
            return print_json(&serde_json::json!({ "saved": path }));
        }
        if !ctx.quiet() {
            let saved = path.display().to_string();
            print(&ui_ctx, &receipt(&ui_ctx, "Report saved", &[("File", &saved)]));
        }
        return Ok(());
    }

    if ui_ctx.mode.is_json() {
        return print_json(&report);
    }

    print(&ui_ctx, &header(&ui_ctx, "progress", Some(&report.title)));
    if ui_ctx.mode.is_pretty() {
        render_pretty(&ui_ctx, &report);
    } else {
        println!("{}", report_text(&report));
    }
    Ok(())
}

fn render_pretty(ui_ctx: &UiContext, report: &ProgressReport) {
    let width = ui_ctx.width.saturating_sub(30).clamp(10, 40);
    for series in &report.exercises {
        blank_line(ui_ctx);
        println!("{}", series.name);
        if series.points.is_empty() {
            print(ui_ctx, &badge(ui_ctx, Badge::Info, "No weights logged yet"));
            continue;
        }
        let (min, max) = weight_range(&series.points);
        for point in &series.points {
            let weight = format!("{}kg", format_kg(point.weight));
            println!(
                "  {}  {}  {}",
                pad_right(&point.date, 12),
                pad_right(&weight, 8),
                bar(point.weight, min, max, width, ui_ctx.unicode)
            );
        }
    }
}

/// Text form of the report: a title, then one block per exercise.
fn report_text(report: &ProgressReport) -> String {
    let mut lines = vec![format!("{}: {} ({})", report.client, report.title, report.plan_id)];
    for series in &report.exercises {
        lines.push(String::new());
        if series.pl.is_empty() {
            lines.push(series.name.clone());
        } else {
            lines.push(format!("{} ({})", series.name, series.pl));
        }
        if series.points.is_empty() {
            lines.push("  -".to_string());
        }
        for point in &series.points {
            lines.push(format!("  {}\t{}kg", point.date, format_kg(point.weight)));
        }
    }
    lines.join("\n")
}

fn weight_range(points: &[repbook_core::progress::ProgressPoint]) -> (f64, f64) {
    let min = points.iter().map(|p| p.weight).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.weight).fold(f64::NEG_INFINITY, f64::max);
    // bars start from a fifth below the lightest weight
    (min - (max - min) / 5.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use repbook_core::progress::{ExerciseSeries, ProgressPoint};

    fn point(date: &str, weight: f64) -> ProgressPoint {
        ProgressPoint {
            date: date.to_string(),
            weight,
            full_date: format!("{}, 10:00", date),
        }
    }

    #[test]
    fn test_report_text() {
        let report = ProgressReport {
            client: "Jan".to_string(),
            plan_id: "fbw".to_string(),
            title: "FBW".to_string(),
            exercises: vec![
                ExerciseSeries {
                    exercise_id: "f_1".to_string(),
                    name: "Squat".to_string(),
                    pl: "Przysiad".to_string(),
                    points: vec![point("01.03.2025", 100.0), point("08.03.2025", 102.5)],
                },
                ExerciseSeries {
                    exercise_id: "f_2".to_string(),
                    name: "Plank".to_string(),
                    pl: String::new(),
                    points: vec![],
                },
            ],
        };

        let text = report_text(&report);
        assert!(text.starts_with("Jan: FBW (fbw)"));
        assert!(text.contains("Squat (Przysiad)"));
        assert!(text.contains("  08.03.2025\t102.5kg"));
        assert!(text.contains("Plank\n  -"));
    }

    #[test]
    fn test_weight_range_pads_below_minimum() {
        let (min, max) = weight_range(&[point("a", 100.0), point("b", 110.0)]);
        assert_eq!(min, 98.0);
        assert_eq!(max, 110.0);
    }
}
