//! Pretty output formatting.

use todo_list_core::item::Item;

use crate::client::health::ReadyStatus;

/// Format an item for display.
pub fn format_item(item: &Item) -> String {
    let mark = if item.completed { "x" } else { " " };
    let mut output = format!("[{}] #{}", mark, item.id);
    if let Some(desc) = &item.description {
        output.push_str(&format!(" {}", desc));
    }
    output
}

/// Format items for display.
pub fn format_items(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }
    let mut output = format!("ITEMS ({})\n", items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format_item(item)));
    }
    output
}

/// Format a readiness status for display.
pub fn format_ready(status: &ReadyStatus) -> String {
    match (&status.error, status.healthy) {
        (_, true) => "Ready".to_string(),
        (Some(error), false) => format!("Not ready: {}", error),
        (None, false) => "Not ready".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, completed: bool, description: Option<&str>) -> Item {
        Item {
            id,
            completed,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_format_item() {
        assert_eq!(format_item(&item(3, true, Some("walk"))), "[x] #3 walk");
        assert_eq!(format_item(&item(4, false, None)), "[ ] #4");
    }

    #[test]
    fn test_format_items_empty() {
        assert_eq!(format_items(&[]), "No items found.");
    }

    #[test]
    fn test_format_items() {
        let output = format_items(&[item(1, false, Some("a")), item(2, true, Some("b"))]);
        assert!(output.starts_with("ITEMS (2)\n"));
        assert!(output.contains("[ ] #1 a"));
        assert!(output.contains("[x] #2 b"));
    }

    #[test]
    fn test_format_ready() {
        let ready = ReadyStatus {
            healthy: true,
            error: None,
        };
        let broken = ReadyStatus {
            healthy: false,
            error: Some("Connection failed: refused".to_string()),
        };
        assert_eq!(format_ready(&ready), "Ready");
        assert_eq!(format_ready(&broken), "Not ready: Connection failed: refused");
    }
}
