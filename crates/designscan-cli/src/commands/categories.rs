//! Categories command implementation.

use crate::config::Config;

/// Execute the categories command.
pub fn execute_categories(config: &Config) {
    print!("{}", category_listing(&config.extractor.categories));
}

fn category_listing(categories: &[String]) -> String {
    categories
        .iter()
        .map(|category| format!("{}\n", category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_keeps_order() {
        let listing = category_listing(&Config::default().extractor.categories);
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "User Journey");
        assert_eq!(lines[7], "Responsive Breakpoints");
    }
}
