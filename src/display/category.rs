//! Category display formatting

use super::owner_label;
use crate::models::{Category, User};

/// Format categories as a table
pub fn format_category_list(categories: &[&Category], users: &[&User]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<12}  {:<24}  {:<10}  {}\n", "ID", "Name", "Ownership", "Owner"));
    output.push_str(&format!("{:-<12}  {:-<24}  {:-<10}  {:-<12}\n", "", "", "", ""));

    for category in categories {
        let icon = category.icon.as_deref().map(|i| format!("{} ", i)).unwrap_or_default();
        output.push_str(&format!(
            "{:<12}  {:<24}  {:<10}  {}\n",
            category.id.to_string(),
            format!("{}{}", icon, category.name),
            category.ownership.to_string(),
            owner_label(category.owner_id, users),
        ));
    }

    output
}
