//! Terminal rendering of [`PactError`]s
//!
//! Produces a header line, an optional source snippet with the failing span
//! underlined, and the call stack.

use super::{PactError, StackFrame};
use crate::shared::SpanInfo;
use colored::Colorize;

/// Diagnostic renderer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Number of context lines before/after the error
    pub context_lines: usize,
    /// Use unicode box drawing
    pub use_unicode: bool,
    /// Use ANSI colors
    pub use_colors: bool,
    /// Show source snippets
    pub show_source: bool,
    /// Show call stack
    pub show_stack: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            context_lines: 2,
            use_unicode: true,
            use_colors: true,
            show_source: true,
            show_stack: true,
        }
    }
}

impl DiagnosticConfig {
    /// Plain ASCII output without colors, for logs and tests
    pub fn plain() -> Self {
        DiagnosticConfig {
            use_unicode: false,
            use_colors: false,
            ..DiagnosticConfig::default()
        }
    }

    fn separator(&self) -> &'static str {
        if self.use_unicode {
            "│"
        } else {
            "|"
        }
    }
}

/// Source text the error points into
#[derive(Debug, Clone, Copy)]
pub struct SourceInfo<'a> {
    /// File name or `<interactive>`
    pub filename: &'a str,
    /// Full source text
    pub source: &'a str,
}

/// Render an error with optional source context
pub fn render_diagnostic(
    error: &PactError,
    source: Option<&SourceInfo<'_>>,
    config: &DiagnosticConfig,
) -> String {
    let mut output = header(error, config);

    if let (Some(src), Some(span), true) = (source, error.info.0.as_ref(), config.show_source) {
        output.push_str(&source_snippet(span, src, config));
    }

    if config.show_stack && !error.call_stack.is_empty() {
        output.push_str(&call_stack(&error.call_stack, config));
    }

    output
}

/// Render several errors separated by a rule
pub fn render_diagnostics(
    errors: &[PactError],
    source: Option<&SourceInfo<'_>>,
    config: &DiagnosticConfig,
) -> String {
    let rule = if config.use_unicode { "─" } else { "-" }.repeat(60);
    errors
        .iter()
        .map(|e| render_diagnostic(e, source, config))
        .collect::<Vec<_>>()
        .join(format!("\n{}\n", rule).as_str())
}

fn header(error: &PactError, config: &DiagnosticConfig) -> String {
    let kind = error.kind.to_string();
    if config.use_colors {
        format!("{}: {}\n", kind.bright_red().bold(), error.to_string().bold())
    } else {
        format!("{}: {}\n", kind, error)
    }
}

fn source_snippet(span: &SpanInfo, src: &SourceInfo<'_>, config: &DiagnosticConfig) -> String {
    let lines: Vec<&str> = src.source.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    // Lines are 1-based, columns 0-based
    let start_line = span.start_line.saturating_sub(1);
    let end_line = span.end_line.saturating_sub(1).max(start_line);
    let start_col = span.start_column;
    let end_col = span.end_column;

    let first = start_line.saturating_sub(config.context_lines);
    let last = end_line.saturating_add(config.context_lines).min(lines.len() - 1);
    let sep = config.separator();

    let mut out = String::from("\n");
    let location = format!("{}:{}:{}", src.filename, span.start_line, span.start_column);
    if config.use_unicode {
        out.push_str(&format!("  ╭─[{}]\n", location));
    } else {
        out.push_str(&format!("  --> {}\n", location));
    }

    for (line_num, line) in lines.iter().enumerate().take(last + 1).skip(first) {
        let in_span = line_num >= start_line && line_num <= end_line;
        let number = (line_num + 1).to_string();
        let number = if in_span && config.use_colors {
            number.bright_red().bold().to_string()
        } else {
            number
        };
        out.push_str(&format!("{:>6} {} {}\n", number, sep, line));

        if in_span {
            // Columns come from decoded data; keep the markers within the line.
            let width = line.chars().count();
            let from = if line_num == start_line { start_col.min(width) } else { 0 };
            let to = if line_num == end_line {
                end_col.min(width).max(from.saturating_add(1))
            } else {
                width
            };
            let carets = "^".repeat(to.saturating_sub(from));
            let carets = if config.use_colors {
                carets.bright_red().bold().to_string()
            } else {
                carets
            };
            out.push_str(&format!("{:>6} {} {}{}\n", "", sep, " ".repeat(from), carets));
        }
    }

    out.push_str(if config.use_unicode { "  ╰────\n" } else { "  ----\n" });
    out
}

fn call_stack(stack: &[StackFrame], config: &DiagnosticConfig) -> String {
    let mut out = String::from("\n");
    if config.use_colors {
        out.push_str(&format!("{}\n", "Call stack:".bright_cyan().bold()));
    } else {
        out.push_str("Call stack:\n");
    }

    let arrow = if config.use_unicode { "⮑" } else { "<-" };
    for frame in stack {
        let name = if config.use_colors {
            frame.name.as_str().bright_yellow().bold().to_string()
        } else {
            frame.name.to_string()
        };
        let mut line = format!("  {} ", arrow);
        if let Some(app) = &frame.app {
            let fn_type = app.fn_type.to_string();
            let fn_type = if config.use_colors {
                fn_type.bright_green().to_string()
            } else {
                fn_type
            };
            line.push_str(&format!("{} {}({})", fn_type, name, app.args.join(", ")));
        } else {
            line.push_str(&name);
        }
        if !frame.loc.is_default() {
            line.push_str(&format!(" at {}", frame.loc));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}
