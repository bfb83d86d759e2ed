//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Repbook · command (context)"
/// Plain mode: "repbook command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Repbook", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("repbook {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() {
        let rule = if ctx.unicode { "\u{2500}" } else { "-" };
        rule.repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

/// `[OK] message`, colored when the terminal allows.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let mark = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        return mark;
    }
    format!("{} {}", mark, message)
}

/// `Key: value` when pretty, `key=value` otherwise.
///
/// Plain keys are lowercased with spaces as `_` so scripts can grep them.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let label = styled(&format!("{}:", key), styles::dim(), ctx.color);
            format!("{} {}", label, value)
        }
        OutputMode::Plain | OutputMode::Json => {
            format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
        }
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    match ctx.mode {
        OutputMode::Pretty => format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text),
        OutputMode::Plain | OutputMode::Json => format!("hint={}", text),
    }
}

/// Summary printed after a command changed something.
///
/// Pretty: an OK badge with the title, then indented pairs.
/// Plain: `status=ok`, then one `key=value` line per pair.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };
    std::iter::once(first)
        .chain(
            items
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cell alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
        }
    }

    /// Right-aligned column for weights, counts and positions.
    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Right,
        }
    }
}

/// Bordered table when pretty; tab-separated rows without a header
/// otherwise.
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }
    let mut table = build_table(ctx, columns, rows);
    if ctx.unicode {
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_width(ctx.width as u16);
    table.to_string()
}

/// Borderless variant of [`table`] with dimmed headers.
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }
    let mut table = build_table(ctx, columns, rows);
    table.load_preset(NOTHING);
    for column in table.column_iter_mut() {
        column.set_padding((0, 2));
    }
    table.to_string()
}

fn build_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> ComfyTable {
    let mut table = ComfyTable::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(columns.iter().map(|column| {
        let cell = Cell::new(column.header);
        if ctx.color {
            cell.add_attribute(Attribute::Dim)
        } else {
            cell
        }
    }));
    for row in rows {
        table.add_row(row);
    }
    for (i, column) in columns.iter().enumerate() {
        if let (Align::Right, Some(target)) = (column.align, table.column_mut(i)) {
            target.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

// Values may contain spaces ("100kg x 5 | 8p"), so plain rows are tab-separated.
fn plain_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a message to stdout with proper mode handling.
///
/// In JSON mode, this does nothing (JSON output is handled separately).
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Error text for stderr: an ERR badge and a hint line when pretty,
/// `error=` and `hint=` lines otherwise.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let first = match ctx.mode {
        OutputMode::Pretty => badge(ctx, Badge::Err, message),
        OutputMode::Plain | OutputMode::Json => format!("error={}", message),
    };
    match error_hint {
        Some(h) => format!("{}\n{}", first, hint(ctx, h)),
        None => first,
    }
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_modes() {
        let h = header(&pretty_ctx(), "history", Some("fbw"));
        assert!(h.contains("Repbook"));
        assert!(h.contains("history (fbw)"));
        assert_eq!(header(&plain_ctx(), "history", Some("fbw")), "repbook history");
    }

    #[test]
    fn test_kv_plain_normalizes_key() {
        assert_eq!(kv(&plain_ctx(), "Sound Type", "beep2"), "sound_type=beep2");
    }

    #[test]
    fn test_kv_pretty() {
        let line = kv(&pretty_ctx(), "Volume", "0.5");
        assert_eq!(line, "Volume: 0.5");
    }

    #[test]
    fn test_receipt_plain() {
        let r = receipt(&plain_ctx(), "Saved", &[("Plan", "fbw"), ("Exercises", "3")]);
        assert_eq!(r, "status=ok\nplan=fbw\nexercises=3");
    }

    #[test]
    fn test_plain_table_keeps_spaces_in_cells() {
        let columns = [Column::new("#"), Column::new("Result")];
        let rows = vec![vec!["1".to_string(), "100kg x 5 | 8p".to_string()]];
        assert_eq!(table(&plain_ctx(), &columns, &rows), "1\t100kg x 5 | 8p");
        assert_eq!(simple_table(&plain_ctx(), &columns, &rows), "1\t100kg x 5 | 8p");
    }

    #[test]
    fn test_pretty_table_has_headers() {
        let columns = [Column::new("Date"), Column::new("Duration")];
        let rows = vec![vec!["2025-03-10".to_string(), "30 min".to_string()]];
        let t = table(&pretty_ctx(), &columns, &rows);
        assert!(t.contains("Date"));
        assert!(t.contains("30 min"));
    }

    #[test]
    fn test_error_message_plain() {
        let msg = error_message(&plain_ctx(), "boom", Some("Run `repbook init`."));
        assert_eq!(msg, "error=boom\nhint=Run `repbook init`.");
    }
}
