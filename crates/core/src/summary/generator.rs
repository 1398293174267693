//! Default renderer: a small SVG scoreboard.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::{SummaryArtifact, SummaryArtifactGenerator};
use crate::countries::NewCountryRecord;
use crate::errors::Result;
use crate::math::round_to;

const WIDTH: u32 = 640;
const HEADER_HEIGHT: u32 = 88;
const ROW_HEIGHT: u32 = 30;
const PADDING: u32 = 24;
const TOP_COUNT: usize = 5;

/// Renders the refresh summary as an SVG scoreboard: total record
/// count, refresh timestamp, and the top countries by estimated GDP.
pub struct SvgSummaryGenerator;

impl SummaryArtifactGenerator for SvgSummaryGenerator {
    fn generate(
        &self,
        countries: &[NewCountryRecord],
        refreshed_at: DateTime<Utc>,
    ) -> Result<SummaryArtifact> {
        let mut ranked: Vec<&NewCountryRecord> = countries
            .iter()
            .filter(|c| c.estimated_gdp.is_some())
            .collect();
        ranked.sort_by(|a, b| {
            b.estimated_gdp
                .partial_cmp(&a.estimated_gdp)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(TOP_COUNT);

        let height = HEADER_HEIGHT + ROW_HEIGHT * (ranked.len() as u32) + PADDING;
        let mut svg = String::with_capacity(2_048);

        svg.push_str(&format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{WIDTH}' height='{height}' \
             viewBox='0 0 {WIDTH} {height}' font-family='monospace'>"
        ));
        svg.push_str("<rect width='100%' height='100%' fill='#10141a'/>");
        svg.push_str(
            "<text x='24' y='36' font-size='20' fill='#e8eaed'>Country cache summary</text>",
        );
        svg.push_str(&format!(
            "<text x='24' y='62' font-size='13' fill='#9aa0a6'>{} countries, refreshed {}</text>",
            countries.len(),
            xml_escape(&refreshed_at.to_rfc3339()),
        ));

        for (rank, country) in ranked.iter().enumerate() {
            let y = HEADER_HEIGHT + ROW_HEIGHT * (rank as u32 + 1) - ROW_HEIGHT / 2;
            let gdp = country.estimated_gdp.unwrap_or(0.0);
            svg.push_str(&format!(
                "<text x='24' y='{y}' font-size='14' fill='#e8eaed'>{}. {}</text>",
                rank + 1,
                xml_escape(&country.name),
            ));
            svg.push_str(&format!(
                "<text x='{}' y='{y}' font-size='14' fill='#8ab4f8' text-anchor='end'>{}</text>",
                WIDTH - 24,
                format_amount(gdp),
            ));
        }

        svg.push_str("</svg>");

        Ok(SummaryArtifact {
            bytes: svg.into_bytes(),
            content_type: "image/svg+xml",
        })
    }
}

/// Compact human form for large GDP figures.
fn format_amount(value: f64) -> String {
    const UNITS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in UNITS {
        if value >= *scale {
            return format!("{}{suffix}", round_to(value / scale, 2));
        }
    }
    round_to(value, 2).to_string()
}

fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, gdp: Option<f64>) -> NewCountryRecord {
        NewCountryRecord {
            name: name.to_string(),
            capital: None,
            region: None,
            population: 1_000,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: gdp,
            flag_url: None,
            last_refreshed_at: Utc::now(),
        }
    }

    #[test]
    fn test_renders_svg_with_top_countries() {
        let records = vec![
            record("Small", Some(1.0e6)),
            record("Big", Some(9.0e9)),
            record("Unrated", None),
        ];
        let artifact = SvgSummaryGenerator
            .generate(&records, Utc::now())
            .unwrap();

        assert_eq!(artifact.content_type, "image/svg+xml");
        let body = String::from_utf8(artifact.bytes).unwrap();
        assert!(body.starts_with("<svg"));
        assert!(body.contains("3 countries"));
        // Ranked by GDP, countries without a figure left off the board.
        assert!(body.contains("1. Big"));
        assert!(body.contains("2. Small"));
        assert!(!body.contains("Unrated"));
        assert!(body.contains("9B"));
    }

    #[test]
    fn test_names_are_escaped() {
        let records = vec![record("Trinidad & Tobago", Some(1.0))];
        let artifact = SvgSummaryGenerator
            .generate(&records, Utc::now())
            .unwrap();
        let body = String::from_utf8(artifact.bytes).unwrap();
        assert!(body.contains("Trinidad &amp; Tobago"));
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount(1_234.0), "1.23K");
        assert_eq!(format_amount(5.6e9), "5.6B");
        assert_eq!(format_amount(2.0e12), "2T");
        assert_eq!(format_amount(999.0), "999");
    }
}
