use crate::Result;
use crate::providers::{ProviderOutcome, ProviderRun};
use crate::summary::SummaryStyle;
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

pub fn generate<W: Write>(runs: &[ProviderRun], use_colors: bool, writer: &mut W) -> Result<()> {
    if runs.is_empty() {
        return Ok(());
    }

    writeln!(writer, "Build report")?;
    writeln!(writer, "═══════════════════════════════════════")?;

    let term_width = get_terminal_width();

    for run in runs {
        let (icon, styled) = match &run.outcome {
            ProviderOutcome::Collected { summary, .. } => {
                let styled = if use_colors {
                    match summary.style {
                        SummaryStyle::Improved => summary.text.green().to_string(),
                        SummaryStyle::Worsened => summary.text.red().to_string(),
                        SummaryStyle::Neutral => summary.text.clone(),
                    }
                } else {
                    summary.text.clone()
                };
                ("✔️", styled)
            }
            ProviderOutcome::Failed { error } => {
                let message = format!("{}: {error}", run.identifier);
                let styled = if use_colors { message.red().bold().to_string() } else { message };
                ("🗙", styled)
            }
        };

        // Continuation lines come back from wrap_text already indented.
        let wrapped_lines = wrap_text(&styled, term_width, 5);
        if let Some(first_line) = wrapped_lines.first() {
            writeln!(writer, "  {icon} {first_line}")?;
            for line in wrapped_lines.iter().skip(1) {
                writeln!(writer, "{line}")?;
            }
        }
    }

    let failures = runs.iter().filter(|run| !run.outcome.is_collected()).count();
    if failures > 0 {
        writeln!(writer)?;
        writeln!(writer, "{failures} of {} providers failed", runs.len())?;
    }

    Ok(())
}

/// Get the terminal width, defaulting to 80 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| w as usize)
}

/// Word-wrap text to fit within a given width, with indentation for continuation lines
fn wrap_text(text: &str, width: usize, indent: usize) -> Vec<String> {
    if width <= indent {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let line_width = if lines.is_empty() {
            current_line.len()
        } else {
            indent + current_line.len()
        };

        let separator_len = usize::from(!current_line.is_empty());
        if !current_line.is_empty() && line_width + separator_len + word.len() > width {
            if lines.is_empty() {
                lines.push(current_line);
            } else {
                lines.push(format!("{:indent$}{}", "", current_line, indent = indent));
            }
            current_line = word.to_string();
        } else {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        if lines.is_empty() {
            lines.push(current_line);
        } else {
            lines.push(format!("{:indent$}{}", "", current_line, indent = indent));
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
