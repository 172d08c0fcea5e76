use owo_colors::OwoColorize;

use brevis_core::{ArticleContent, SummaryResult};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Brevis".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Extract and summarize news articles\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print a labelled value under the current step
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print extraction details summary
pub fn print_article_details(article: &ArticleContent) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Extraction Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    print_detail("Title", article.display_title());
    print_detail("Method", &article.method.to_string());
    print_detail("Characters", &article.char_count().to_string());
    if let Some(keywords) = &article.keywords {
        print_detail("Keywords", &keywords.join(", "));
    }
    if let Some(images) = &article.images {
        print_detail("Images", &images.len().to_string());
    }
    eprintln!();
}

/// Print summary details
pub fn print_summary_details(summary: &SummaryResult, elapsed: std::time::Duration) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Summary Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    print_detail("Model", &summary.model);
    print_detail("Chunks", &summary.chunk_summaries.len().to_string());
    print_detail("Characters", &summary.full_summary.chars().count().to_string());
    print_detail("Time", &format!("{:.2}s", elapsed.as_secs_f64()));
    eprintln!();
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
