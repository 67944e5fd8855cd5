//! CSV rendering for address exports.
//!
//! Text cells are always quoted and booleans are left bare, so spreadsheet
//! imports keep zip codes like `01234` as text.

use shared::domain::{Address, FieldKind, FieldSpec};

pub fn render(addresses: &[Address], fields: &[FieldSpec]) -> String {
    let mut out = String::new();
    let header: Vec<String> = fields.iter().map(|f| quote(&f.label())).collect();
    push_row(&mut out, &header);

    for address in addresses {
        let row: Vec<String> = fields.iter().map(|f| cell(address, f)).collect();
        push_row(&mut out, &row);
    }
    out
}

fn cell(address: &Address, field: &FieldSpec) -> String {
    match field.kind {
        FieldKind::CheckBox => address.send_christmas_card.to_string(),
        FieldKind::Text => quote(address.text_field(field.name).unwrap_or_default()),
    }
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push_str(&cells.join(","));
    out.push_str("\r\n");
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
