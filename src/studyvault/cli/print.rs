use colored::Colorize;
use studyvault::api::{CmdMessage, MessageLevel, PendingInsert};
use studyvault::model::{LineMatch, Section, SectionHeading, LIBRARY_EXT};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const RULE_WIDTH: usize = 60;
const MAX_TITLE_WIDTH: usize = 48;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub(super) fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("{} {}", "[!]".red().bold(), err);
}

pub(super) fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let prefix = match message.level {
            MessageLevel::Info => "[*]".cyan().bold(),
            MessageLevel::Success => "[+]".green().bold(),
            MessageLevel::Warning => "[*]".yellow().bold(),
            MessageLevel::Error => "[!]".red().bold(),
        };
        out.push_str(&format!("{} {}\n", prefix, message.content));
    }
    out
}

pub(super) fn render_libraries(names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    let mut out = format!("\n{}\n", "Available Libraries:".cyan().bold());
    for (i, name) in names.iter().enumerate() {
        out.push_str(&format!(
            " {}] {}{}\n",
            (i + 1).to_string().cyan().bold(),
            name,
            LIBRARY_EXT
        ));
    }
    out
}

pub(super) fn render_sections(sections: &[SectionHeading]) -> String {
    if sections.is_empty() {
        return format!("{} No sections found.\n", "[*]".yellow().bold());
    }

    let titles: Vec<String> = sections
        .iter()
        .map(|s| truncate_to_width(&s.title, MAX_TITLE_WIDTH))
        .collect();
    let title_width = titles.iter().map(|t| t.width()).max().unwrap_or(0);
    let index_width = sections.len().to_string().len();

    let mut out = format!("\n{}\n{}\n", "Section Index".blue().bold(), rule());
    for (i, (heading, title)) in sections.iter().zip(&titles).enumerate() {
        let padding = title_width.saturating_sub(title.width());
        out.push_str(&format!(
            "{} {}{}  {}\n",
            format!("{:>width$}.", i + 1, width = index_width).cyan(),
            title.bold(),
            " ".repeat(padding),
            format!("(line {})", heading.line_number).dimmed()
        ));
    }
    out
}

pub(super) fn render_section(section: &Section) -> String {
    let mut out = format!("\n{}\n{}\n", section.title.blue().bold(), rule());
    for line in &section.lines {
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str(&format!("{}\n", rule()));
    out
}

pub(super) fn render_line_matches(matches: &[LineMatch], header: &str) -> String {
    if matches.is_empty() {
        return String::new();
    }
    let width = matches
        .iter()
        .map(|m| m.line_number.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = format!("\n{}\n", header.yellow().bold());
    for m in matches {
        out.push_str(&format!(
            "{}: {}\n",
            format!("{:>width$}", m.line_number, width = width).dimmed(),
            m.content
        ));
    }
    out
}

pub(super) fn render_section_matches(sections: &[Section], keyword: &str) -> String {
    if sections.is_empty() {
        return String::new();
    }
    let mut out = format!(
        "\n{}\n{}\n",
        format!(
            "Found {} section(s) containing '{}':",
            sections.len(),
            keyword
        )
        .yellow()
        .bold(),
        rule()
    );
    for section in sections {
        out.push_str(&format!("{}\n{}\n", section.title.blue().bold(), rule()));
        for line in &section.lines {
            out.push_str(&format!(" {}\n", line));
        }
        out.push_str(&format!("{}\n", rule()));
    }
    out
}

pub(super) fn render_preview(pending: &PendingInsert) -> String {
    let mut out = format!(
        "\n{}\n{}\n",
        format!("Preview of section '{}':", pending.section).cyan().bold(),
        rule()
    );
    for line in &pending.preview {
        if line.inserted {
            out.push_str(&format!("{} {}\n", "+".green().bold(), line.text.green()));
        } else {
            out.push_str(&format!("  {}\n", line.text));
        }
    }
    out.push_str(&format!("{}\n", rule()));
    out
}

pub(super) fn render_config(entries: &[(String, String)]) -> String {
    let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in entries {
        let padding = key_width.saturating_sub(key.width());
        out.push_str(&format!("{}{} = {}\n", key.bold(), " ".repeat(padding), value));
    }
    out
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH).dimmed().to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
