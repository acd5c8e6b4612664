use crate::models::LifestyleModifications;
use crate::report::canvas::TextStyle;
use crate::report::palette::{ALERT_RED, WARNING_PANEL};

use super::{ReportWriter, LIFESTYLE_MODIFICATIONS};

const NOTHING_SPECIFIC: &str = "No specific recommendations provided.";

pub(crate) fn render(w: &mut ReportWriter<'_>, lifestyle: &LifestyleModifications) {
    let subtitle = format!(
        "AI-Personalized Health Plan for {} Context",
        w.config.region_label
    );
    w.section_header(LIFESTYLE_MODIFICATIONS, Some(&subtitle));

    let diet = &lifestyle.diet;
    w.subheading(&format!("Diet & Nutrition ({} Context)", w.config.region_label));
    recommendations(w, &diet.recommendations);

    if !diet.regional_foods.is_empty() {
        w.canvas.advance(3.0);
        let label = format!("Recommended {} Foods:", demonym(&w.config.region_label));
        w.paragraph(5.0, &label, TextStyle::bold(10.0));
        w.paragraph(10.0, &diet.regional_foods.join(", "), TextStyle::body());
    }

    if !diet.restrictions.is_empty() {
        w.canvas.advance(3.0);
        w.alert_box(
            "Dietary Restrictions",
            ALERT_RED,
            WARNING_PANEL,
            None,
            &diet.restrictions,
        );
    }
    w.canvas.advance(5.0);

    w.subheading("Exercise & Physical Activity");
    recommendations(w, &lifestyle.exercise.recommendations);
    w.canvas.advance(5.0);

    w.subheading("General Lifestyle Modifications");
    recommendations(w, &lifestyle.lifestyle.recommendations);

    w.end_section();
}

fn recommendations(w: &mut ReportWriter<'_>, items: &[String]) {
    if items.is_empty() {
        w.empty_note(NOTHING_SPECIFIC);
    } else {
        w.bullets(items);
    }
}

fn demonym(region: &str) -> &str {
    match region {
        "India" => "Indian",
        other => other,
    }
}
