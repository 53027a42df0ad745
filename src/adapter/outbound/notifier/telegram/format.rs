//! Message formatting for Telegram notifications.

use crate::port::Message;

/// Telegram rejects messages longer than 4096 characters.
const MAX_DIAGNOSTIC_CHARS: usize = 3500;

/// Format a message as Telegram `MarkdownV2`.
///
/// A listing renders as its title linked to the listing page, followed by
/// a bold price label.
pub fn format_message(message: &Message) -> String {
    match message {
        Message::Listing(listing) => format!(
            "[{}]({})\n*Цена:* {}",
            escape_markdown(listing.title()),
            escape_link_url(listing.page_url()),
            listing.price()
        ),
        Message::Diagnostic(text) => format!(
            "⚠️ *Ошибка проверки объявлений*\n\n{}",
            escape_markdown(&truncate(text, MAX_DIAGNOSTIC_CHARS))
        ),
        Message::Notice(text) => escape_markdown(text),
    }
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape the URL part of an inline link, where only `)` and `\` are special.
fn escape_link_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len() + 4);
    for c in url.chars() {
        if c == ')' || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
