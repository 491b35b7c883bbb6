//! Terminal output styling for discrip.
//!
//! Everything goes through the `log` facade so the same lines reach both the
//! console and the debug log file. Styling is applied with `console` and is
//! skipped when `NO_COLOR` is set.

use console::style;
use log::{info, warn};

/// Visual hierarchy levels in the CLI output
#[derive(Debug, Clone, Copy)]
pub enum OutputLevel {
    /// Level 1: Main sections (===== SECTION =====)
    Section,
    /// Level 2: Subsections such as a season heading
    Subsection,
    /// Level 3: Listing entries
    Item,
}

impl OutputLevel {
    fn indent(&self) -> &'static str {
        match self {
            OutputLevel::Section => "",
            OutputLevel::Subsection => "  ",
            OutputLevel::Item => "    ",
        }
    }
}

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", style(title.to_uppercase()).cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print a subsection heading, preceded by a blank line
pub fn print_subsection(title: &str) {
    info!("");
    if should_use_color() {
        info!("{}» {}", OutputLevel::Subsection.indent(), style(title).bold());
    } else {
        info!("{}» {title}", OutputLevel::Subsection.indent());
    }
}

/// Print one entry of a listing
pub fn print_item(text: &str) {
    info!("{}{text}", OutputLevel::Item.indent());
}

/// Print a key-value status line
pub fn print_status(label: &str, value: &str) {
    let padding = 15usize.saturating_sub(label.len()).max(1);
    let value = if should_use_color() {
        style(value).bold().to_string()
    } else {
        value.to_string()
    };
    info!(
        "{}{label}:{} {value}",
        OutputLevel::Subsection.indent(),
        " ".repeat(padding)
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", style(message).green());
    } else {
        info!("  ✓ {message}");
    }
}

/// Print a warning for a recoverable problem
pub fn print_warning(message: &str) {
    if should_use_color() {
        warn!("  ⚠ {}", style(message).yellow());
    } else {
        warn!("  ⚠ {message}");
    }
}
