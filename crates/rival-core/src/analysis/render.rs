//! Plain-text report rendering.

use super::model::{AnalysisOutput, CompetitorInsight};

/// Competitors shown in a report; the rest are dropped from display.
pub const MAX_COMPETITORS_SHOWN: usize = 5;

/// Shown in place of a missing title, price or rating.
const MISSING: &str = "n/a";

/// Render the report: summary, positioning, the first five competitors in
/// model order, and recommendations when there are any.
pub fn render_report(output: &AnalysisOutput) -> String {
    let mut lines = vec![
        format!("Summary:\n{}", output.summary),
        format!("\nPositioning:\n{}", output.positioning),
        "\nCompetitors:".to_string(),
    ];

    for c in output.top_competitors.iter().take(MAX_COMPETITORS_SHOWN) {
        lines.push(competitor_line(c));
    }

    if !output.recommendations.is_empty() {
        lines.push("\nRecommendations:".to_string());
        for r in &output.recommendations {
            lines.push(format!("- {}", r));
        }
    }

    lines.join("\n")
}

/// `- {asin} | {title} | {price} | {rating} | {key points}`
pub fn competitor_line(c: &CompetitorInsight) -> String {
    format!(
        "- {} | {} | {} | {} | {}",
        c.asin,
        c.title.as_deref().unwrap_or(MISSING),
        format_price(c.price, c.currency.as_deref()),
        c.rating.map(format_number).unwrap_or_else(|| MISSING.to_string()),
        c.key_points.join("; ")
    )
}

/// `EUR 7.5` with a currency code, `$7.5` without one.
pub fn format_price(price: Option<f64>, currency: Option<&str>) -> String {
    let amount = price.map(format_number).unwrap_or_else(|| MISSING.to_string());
    match currency {
        Some(code) if !code.is_empty() => format!("{} {}", code, amount),
        _ => format!("${}", amount),
    }
}

/// Shortest round-trip form, keeping one decimal on whole numbers (`4.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(asin: &str, currency: Option<&str>) -> CompetitorInsight {
        CompetitorInsight {
            asin: asin.to_string(),
            title: Some(format!("Title {}", asin)),
            price: Some(10.0),
            currency: currency.map(str::to_string),
            rating: Some(4.5),
            key_points: vec!["solid".to_string()],
        }
    }

    fn output(competitors: Vec<CompetitorInsight>, recommendations: Vec<&str>) -> AnalysisOutput {
        AnalysisOutput {
            summary: "S".to_string(),
            positioning: "P".to_string(),
            top_competitors: competitors,
            recommendations: recommendations.into_iter().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_full_report() {
        let out = AnalysisOutput {
            summary: "S".to_string(),
            positioning: "P".to_string(),
            top_competitors: vec![CompetitorInsight {
                asin: "Y2".to_string(),
                title: Some("Gadget".to_string()),
                price: Some(7.5),
                currency: Some("EUR".to_string()),
                rating: Some(4.0),
                key_points: vec!["cheaper".to_string()],
            }],
            recommendations: vec!["Lower price".to_string()],
        };
        assert_eq!(
            render_report(&out),
            "Summary:\nS\n\nPositioning:\nP\n\nCompetitors:\n- Y2 | Gadget | EUR 7.5 | 4.0 | cheaper\n\nRecommendations:\n- Lower price"
        );
    }

    #[test]
    fn test_no_competitors_keeps_header() {
        let text = render_report(&output(vec![], vec![]));
        assert_eq!(text, "Summary:\nS\n\nPositioning:\nP\n\nCompetitors:");
    }

    #[test]
    fn test_at_most_five_competitors_in_order() {
        let competitors: Vec<_> = ["C7", "C1", "C5", "C3", "C2", "C6", "C4"]
            .iter()
            .map(|a| insight(a, Some("USD")))
            .collect();
        let text = render_report(&output(competitors, vec![]));
        let shown: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("- "))
            .map(|l| l[2..].split(" | ").next().unwrap())
            .collect();
        assert_eq!(shown, vec!["C7", "C1", "C5", "C3", "C2"]);
    }

    #[test]
    fn test_empty_currency_uses_dollar_sign() {
        assert_eq!(competitor_line(&insight("A", Some(""))), "- A | Title A | $10.0 | 4.5 | solid");
        assert_eq!(competitor_line(&insight("A", None)), "- A | Title A | $10.0 | 4.5 | solid");
    }

    #[test]
    fn test_missing_values_and_key_points() {
        let c = CompetitorInsight {
            asin: String::new(),
            title: None,
            price: None,
            currency: Some("GBP".to_string()),
            rating: None,
            key_points: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(competitor_line(&c), "-  | n/a | GBP n/a | n/a | a; b");
    }

    #[test]
    fn test_recommendations_bulleted() {
        let text = render_report(&output(vec![], vec!["one", "two"]));
        assert!(text.ends_with("Competitors:\n\nRecommendations:\n- one\n- two"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4.0");
        assert_eq!(format_number(7.5), "7.5");
        assert_eq!(format_number(9.99), "9.99");
        assert_eq!(format_number(1299.0), "1299.0");
    }
}
