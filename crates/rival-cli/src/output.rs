//! Terminal output formatting.

use colored::Colorize;
use rival_core::analysis::render::{format_number, format_price};
use rival_core::product::model::ProductRecord;
use rival_core::{AnalysisFailure, ErrorKind};
use unicode_width::UnicodeWidthStr;

/// Print a single product.
pub fn print_product(p: &ProductRecord) {
    let title = p.title.as_deref().unwrap_or("(untitled)");
    println!("{} {}", title.cyan().bold(), format!("({})", p.asin).dimmed());
    println!();

    if let Some(ref brand) = p.brand {
        println!("{}: {}", "Brand".bold(), brand);
    }
    if p.price.is_some() {
        println!("{}: {}", "Price".bold(), format_price(p.price, p.currency.as_deref()));
    }
    if let Some(rating) = p.rating {
        println!("{}: {}", "Rating".bold(), format_number(rating).yellow());
    }
    if let Some(ref categories) = p.categories {
        if !categories.is_empty() {
            println!("{}: {}", "Categories".bold(), categories.join(" > "));
        }
    }
    if let Some(ref domain) = p.amazon_domain {
        println!("{}: amazon.{}", "Marketplace".bold(), domain);
    }
    if let Some(ref parent) = p.parent_asin {
        println!("{}: {}", "Parent".bold(), parent.dimmed());
    }
}

/// Print products as a table.
pub fn print_products_table(products: &[ProductRecord]) {
    if products.is_empty() {
        println!("{}", "No products found.".dimmed());
        return;
    }

    println!("{:<12} {:<40} {:<14} {:<6}", "ASIN", "Title", "Price", "Rating");
    println!("{}", "─".repeat(75));

    for p in products {
        let title = truncate_visual(p.title.as_deref().unwrap_or("-"), 38);
        let pad = 40usize.saturating_sub(UnicodeWidthStr::width(title.as_str()));
        let price = match p.price {
            Some(_) => format_price(p.price, p.currency.as_deref()),
            None => "-".to_string(),
        };
        let rating = p.rating.map(format_number).unwrap_or_else(|| "-".to_string());

        println!(
            "{:<12} {}{} {:<14} {:<6}",
            p.asin,
            title,
            " ".repeat(pad),
            price,
            rating
        );
    }
}

/// Print a pipeline failure to stderr. Diagnostics are always shown for
/// model failures and otherwise only with `--verbose`.
pub fn print_failure(failure: &AnalysisFailure, verbose: bool) {
    eprintln!("{} {}", "✗".red().bold(), failure.user_hint().red());

    let show_diagnostic = verbose || failure.kind == ErrorKind::Model;
    if let (true, Some(diagnostic)) = (show_diagnostic, failure.diagnostic.as_deref()) {
        eprintln!();
        eprintln!("{}", "Diagnostic (truncated):".dimmed());
        for line in diagnostic.lines() {
            eprintln!("  {}", line.dimmed());
        }
    }
}

/// Truncate to a display width, accounting for wide characters.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("short", 10), "short");
        assert_eq!(truncate_visual("abcdefghij", 6), "abcd..");
        assert_eq!(truncate_visual("日本語テキスト", 6), "日本..");
        assert_eq!(truncate_visual("abcdef", 3), "...");
    }
}
