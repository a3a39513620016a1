//! Markdown-to-terminal rendering.
//!
//! The model replies use four textual conventions that must survive to
//! the screen: `**bold**`, `-`/`*` bullets with 2-space nesting,
//! `N. text` ordered items, and `[label](url)` links. Everything else
//! is wrapped to the terminal width and printed as-is.

use std::sync::LazyLock;

use console::style;
use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("static regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("static regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)[-*] (.*)$").expect("static regex"));
static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\. (.*)$").expect("static regex"));

/// Render one bot reply for the terminal.
pub fn render_markdown(text: &str) -> String {
    let width = terminal_width();
    text.lines()
        .map(|line| render_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(line: &str, width: usize) -> String {
    if let Some(caps) = BULLET.captures(line) {
        // Two spaces of source indent per nesting level
        let level = caps[1].len() / 2;
        let indent = "  ".repeat(level);
        return format!("{indent}• {}", render_inline(&caps[2]));
    }
    if let Some(caps) = ORDERED.captures(line) {
        return format!("{}. {}", &caps[1], render_inline(&caps[2]));
    }
    let rendered = render_inline(line);
    if rendered.len() > width {
        textwrap::fill(&rendered, width)
    } else {
        rendered
    }
}

/// Bold and link spans inside one line.
fn render_inline(line: &str) -> String {
    let with_bold = BOLD.replace_all(line, |caps: &regex::Captures<'_>| {
        style(&caps[1]).bold().to_string()
    });
    LINK.replace_all(&with_bold, |caps: &regex::Captures<'_>| {
        format!("{} ({})", &caps[1], style(&caps[2]).underlined())
    })
    .into_owned()
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(80)
        .clamp(40, 100)
}
