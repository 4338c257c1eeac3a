// vidnorm-cli/src/terminal.rs
//
// Styled stdout output for command results. Diagnostics go through the `log`
// macros (console appender on stderr); this module only renders the final
// report a user reads once a command has finished.

use console::style;
use vidnorm_core::reporting::RunSummary;
use vidnorm_core::MediaDescription;

/// Whether to style output (respects NO_COLOR).
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled()
}

/// Prints a section header for a phase of the report.
pub fn print_section(title: &str) {
    println!();
    if should_use_color() {
        println!("===== {} =====", style(title.to_uppercase()).cyan());
    } else {
        println!("===== {} =====", title.to_uppercase());
    }
}

/// Prints a key/value line.
pub fn print_status(label: &str, value: impl std::fmt::Display) {
    let label = format!("{label}:");
    if should_use_color() {
        println!("  {:<18} {}", style(label).bold(), value);
    } else {
        println!("  {label:<18} {value}");
    }
}

pub fn print_success(message: &str) {
    if should_use_color() {
        println!("  ✓ {}", style(message).green());
    } else {
        println!("  ✓ {message}");
    }
}

pub fn print_warning(message: &str) {
    if should_use_color() {
        println!("  ! {}", style(message).yellow());
    } else {
        println!("  ! {message}");
    }
}

/// Prints a fatal error on stderr.
pub fn print_error(message: &str) {
    if should_use_color() {
        eprintln!("{} {}", style("Error:").red().bold(), message);
    } else {
        eprintln!("Error: {message}");
    }
}

/// Prints one description with its streams indented below it.
pub fn print_description(description: &MediaDescription) {
    let mut lines = description.lines().into_iter();
    if let Some(header) = lines.next() {
        if should_use_color() {
            println!("  {}", style(header).bold());
        } else {
            println!("  {header}");
        }
    }
    for line in lines {
        println!("  {line}");
    }
}

/// Prints a per-file line for every entry in the run summary.
pub fn print_summary(summary: &RunSummary) {
    for entry in &summary.entries {
        let name = vidnorm_core::utils::display_name(&entry.file);
        if entry.success {
            print_success(&format!("{name}: {}", entry.detail));
        } else if should_use_color() {
            println!("  ✗ {}", style(format!("{name}: {}", entry.detail)).red());
        } else {
            println!("  ✗ {name}: {}", entry.detail);
        }
    }
}
