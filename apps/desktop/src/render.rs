//! Plain-text rendering of the controller's view state.

use std::fmt::Write;

use client_core::{Alert, Pager};
use shared::domain::{creation_fields, Address, FieldKind};

const NAME_WIDTH: usize = 28;
const CITY_WIDTH: usize = 18;

pub fn page_table(items: &[&Address]) -> String {
    if items.is_empty() {
        return "(no addresses)\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<NAME_WIDTH$}  {:<CITY_WIDTH$}  {}",
        "#", "Name", "City", "Email"
    );
    for (row, address) in items.iter().enumerate() {
        let card = if address.send_christmas_card { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:>3}  {:<NAME_WIDTH$}  {:<CITY_WIDTH$}  {}{card}",
            row + 1,
            clip(&address.full_name(), NAME_WIDTH),
            clip(&address.city, CITY_WIDTH),
            address.email_address,
        );
    }
    out
}

/// `« 3 4 [5] 6 7 »  page 5 of 9, 84 addresses`; arrows only when there is
/// somewhere to go.
pub fn pager_footer(pager: &Pager) -> String {
    if pager.page_count() == 0 {
        return "0 addresses".to_string();
    }
    let mut links = Vec::new();
    if pager.current_page() > 1 {
        links.push("«".to_string());
    }
    for page in pager.visible_pages() {
        if page == pager.current_page() {
            links.push(format!("[{page}]"));
        } else {
            links.push(page.to_string());
        }
    }
    if pager.current_page() < pager.page_count() {
        links.push("»".to_string());
    }
    format!(
        "{}  page {} of {}, {} addresses",
        links.join(" "),
        pager.current_page(),
        pager.page_count(),
        pager.total_items()
    )
}

/// Numbers continue from `first`, so a tail of the list keeps its indices.
pub fn alert_lines(alerts: &[Alert], first: usize) -> String {
    let mut out = String::new();
    for (index, alert) in alerts.iter().enumerate() {
        let _ = writeln!(out, "! {}. {}", first + index + 1, alert.text());
    }
    out
}

pub fn address_detail(address: &Address) -> String {
    let mut out = String::new();
    for field in creation_fields() {
        let value = match field.kind {
            FieldKind::Text => address.text_field(field.name).unwrap_or_default(),
            FieldKind::CheckBox if address.send_christmas_card => "yes",
            FieldKind::CheckBox => "no",
        };
        if !value.is_empty() {
            let _ = writeln!(out, "  {}: {value}", field.label());
        }
    }
    out
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
