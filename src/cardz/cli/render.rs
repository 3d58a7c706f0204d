use cardz::api::{CmdMessage, MessageLevel};
use cardz::check::CheckReport;
use cardz::config::CardzConfig;
use cardz::model::{Card, Entry, Folder};
use cardz::study::StudySession;
use cardz::tree::OutlineRow;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const FOLDER_MARKER: &str = "▸";
const SIDE_SEPARATOR: &str = " │ ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn breadcrumb(path: &[Folder]) -> String {
    path.iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

pub(super) fn print_breadcrumb(path: &[Folder]) {
    println!("{}", breadcrumb(path).bold());
}

/// Folder listing: subfolders marked, cards numbered by position.
pub(super) fn print_entries(path: &[Folder], entries: &[Entry]) {
    print_breadcrumb(path);
    if entries.is_empty() {
        println!("{}", "  (empty)".dimmed());
        return;
    }
    let mut position = 0;
    for entry in entries {
        match entry {
            Entry::Folder(folder) => {
                println!("  {} {}", FOLDER_MARKER.cyan(), folder.name.cyan().bold());
            }
            Entry::Card(card) => {
                position += 1;
                print_card_line(&format!("{}. ", position), card);
            }
        }
    }
}

pub(super) fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("No cards found.");
        return;
    }
    for card in cards {
        print_card_line("  ", card);
    }
}

fn print_card_line(prefix: &str, card: &Card) {
    let idx = format!("  {}", prefix);
    let available = LINE_WIDTH.saturating_sub(idx.width() + TIME_WIDTH);
    let text = format!("{}{}{}", one_line(&card.front), SIDE_SEPARATOR, one_line(&card.back));
    let shown = truncate_to_width(&text, available);
    let padding = available.saturating_sub(shown.width());
    println!(
        "{}{}{}{}",
        idx.yellow(),
        shown,
        " ".repeat(padding),
        format_time_ago(card.last_modified()).dimmed()
    );
}

fn one_line(text: &str) -> String {
    text.replace('\n', " ")
}

pub(super) fn print_card(card: &Card, path: &[Folder]) {
    if !path.is_empty() {
        println!("{}", breadcrumb(path).dimmed());
    }
    println!("{}", card.front.bold());
    println!("--------------------------------");
    println!("{}", card.back);
    println!();
    println!("{} {}", "id:".dimmed(), card.id.dimmed());
    println!(
        "{} {}",
        "created:".dimmed(),
        format_time_ago(card.date_created).trim().dimmed()
    );
    if let Some(updated) = card.date_updated {
        println!(
            "{} {}",
            "updated:".dimmed(),
            format_time_ago(updated).trim().dimmed()
        );
    }
}

pub(super) fn print_outline(rows: &[OutlineRow]) {
    for row in rows {
        let indent = "  ".repeat(row.depth);
        let count = match row.card_count {
            0 => String::new(),
            1 => " (1 card)".to_string(),
            n => format!(" ({} cards)", n),
        };
        println!("{}{}{}", indent, row.folder.name.cyan(), count.dimmed());
    }
}

pub(super) fn print_check_report(report: &CheckReport) {
    for issue in &report.issues {
        println!("  {} {}", "✗".red(), issue);
    }
}

pub(super) fn print_config(config: &CardzConfig) {
    for (key, value) in config.list_all() {
        println!("{} = {}", key, value);
    }
}

pub(super) fn print_study_card(study: &StudySession) {
    let Some(side) = study.visible_side() else {
        return;
    };
    let label = if study.is_flipped() { "back" } else { "front" };
    println!();
    println!(
        "{} {}",
        format!("[{}/{}]", study.position(), study.len()).yellow(),
        label.dimmed()
    );
    println!("{}", side.bold());
}

pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;
    if s.width() <= max_width {
        return s.to_string();
    }
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_wide_chars() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        let wide = truncate_to_width("日本語のテキスト", 7);
        assert!(wide.width() <= 7);
        assert!(wide.ends_with('…'));
    }

    #[test]
    fn listing_text_stays_on_one_line() {
        assert_eq!(one_line("to be\nor not"), "to be or not");
        assert_eq!(one_line("plain"), "plain");
    }

    #[test]
    fn breadcrumb_joins_names() {
        let root = Folder::new("root".into(), "Root".into(), None);
        let child = Folder::new("f".into(), "Spanish".into(), Some("root".into()));
        assert_eq!(breadcrumb(&[root, child]), "Root / Spanish");
    }
}
