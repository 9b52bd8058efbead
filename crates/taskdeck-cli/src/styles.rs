use anstyle::{AnsiColor, Color, Style};

/// Section headings and the usage line in `--help`.
pub const HEADING: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Green)))
    .bold();

/// Flags and placeholders in `--help`.
pub const LITERAL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

/// Task names in `--list`.
pub const TASK: Style = LITERAL.bold();

/// Pre/post hook annotations in `--list`.
pub const HOOK: Style = Style::new().dimmed();

pub fn get_clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(HEADING)
        .usage(HEADING)
        .literal(LITERAL)
        .placeholder(LITERAL)
}

/// Wraps `text` in `style` and its reset sequence.
pub fn paint(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
