use crate::models::ExecutiveSummary;
use crate::report::canvas::{FontStyle, TextStyle};
use crate::report::palette::{ScoreTier, BLACK};

use super::{ReportWriter, EXECUTIVE_SUMMARY};

pub(crate) fn render(w: &mut ReportWriter<'_>, summary: &ExecutiveSummary, insights: Option<&str>) {
    let band_top = w.section_header(EXECUTIVE_SUMMARY, Some("AI-Generated Medical Overview"));

    let score = summary.confidence_score;
    let tier = ScoreTier::of(score);
    w.header_badge(
        band_top,
        &format!("AI Confidence: {score}% ({})", tier.label()),
        tier.confidence_color(),
    );

    let body = TextStyle::new(11.0, FontStyle::Regular, BLACK, 6.0);
    w.paragraph(0.0, &summary.content, body);
    w.canvas.advance(5.0);

    if !summary.key_findings.is_empty() {
        w.subheading("Key Findings");
        w.numbered(&summary.key_findings);
    }

    if let Some(insights) = insights.map(str::trim).filter(|text| !text.is_empty()) {
        w.canvas.advance(3.0);
        w.subheading("Supplementary Insights");
        w.paragraph(5.0, insights, TextStyle::body());
    }

    w.end_section();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::canvas::DrawOp;
    use crate::report::palette::{GREEN, RED};
    use crate::report::sections::fixtures::sample_report;

    fn summary() -> ExecutiveSummary {
        sample_report().executive_summary.unwrap()
    }

    fn all_texts(w: &ReportWriter<'_>) -> Vec<String> {
        w.canvas
            .pages()
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| op.as_text().map(str::to_string))
            .collect()
    }

    fn badge_fill(w: &ReportWriter<'_>) -> Option<crate::report::palette::Rgb> {
        // The badge is the second rect: the band comes first.
        w.canvas.pages()[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { fill, .. } => *fill,
                _ => None,
            })
            .nth(1)
    }

    #[test]
    fn confidence_badge_shows_value_and_tier_color() {
        let config = ReportConfig::default();
        let mut w = ReportWriter::new(&config);
        render(&mut w, &summary(), None);
        assert!(all_texts(&w).contains(&"AI Confidence: 82% (High)".to_string()));
        assert_eq!(badge_fill(&w), Some(GREEN));

        let mut low = summary();
        low.confidence_score = 20;
        let mut w = ReportWriter::new(&config);
        render(&mut w, &low, None);
        assert_eq!(badge_fill(&w), Some(RED));
    }

    #[test]
    fn key_findings_are_numbered() {
        let config = ReportConfig::default();
        let mut w = ReportWriter::new(&config);
        render(&mut w, &summary(), None);
        let texts = all_texts(&w);
        assert!(texts.contains(&"1. Headache pattern suggests tension type".to_string()));
        assert!(texts.contains(&"2. Blood pressure needs review".to_string()));
    }

    #[test]
    fn insights_render_only_when_present() {
        let config = ReportConfig::default();
        let mut w = ReportWriter::new(&config);
        render(&mut w, &summary(), Some("   "));
        assert!(!all_texts(&w).contains(&"Supplementary Insights".to_string()));

        let mut w = ReportWriter::new(&config);
        render(&mut w, &summary(), Some("Sleep hygiene matters here."));
        let texts = all_texts(&w);
        assert!(texts.contains(&"Supplementary Insights".to_string()));
        assert!(texts.contains(&"Sleep hygiene matters here.".to_string()));
    }

    #[test]
    fn empty_content_still_renders_header() {
        let config = ReportConfig::default();
        let mut w = ReportWriter::new(&config);
        render(&mut w, &ExecutiveSummary::default(), None);
        assert_eq!(w.canvas.sections().len(), 1);
        assert!(all_texts(&w).contains(&"AI Confidence: 0% (Low)".to_string()));
    }
}
