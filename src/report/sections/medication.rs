use crate::models::{MedicationRecommendation, MedicationRecommendations};
use crate::report::canvas::{Block, BlockLine, FontStyle, TextStyle};
use crate::report::palette::{ALERT_RED, BLACK, BORDER, BRAND_BLUE, GREEN, MUTED, PANEL, WARNING_PANEL};

use super::{or_unspecified, ReportWriter, MEDICATION_RECOMMENDATIONS};

pub(crate) fn render(w: &mut ReportWriter<'_>, medications: &MedicationRecommendations) {
    w.section_header(MEDICATION_RECOMMENDATIONS, Some("Personalized Treatment Plan"));

    if medications.primary_medications.is_empty() {
        w.empty_note("No medication recommended. Consult a doctor before starting any treatment.");
        w.canvas.advance(3.0);
    } else {
        w.subheading("Primary Medications");
        for (i, medication) in medications.primary_medications.iter().enumerate() {
            w.full_width_block(&medication_card(i + 1, medication));
            w.canvas.advance(5.0);
        }
    }

    if !medications.interactions.is_empty() {
        w.alert_box(
            "Drug Interaction Warnings",
            ALERT_RED,
            WARNING_PANEL,
            None,
            &medications.interactions,
        );
    }

    if !medications.contraindications.is_empty() {
        w.alert_box(
            "Contraindications",
            ALERT_RED,
            WARNING_PANEL,
            None,
            &medications.contraindications,
        );
    }

    if !medications.alternatives.is_empty() {
        let items: Vec<String> = medications
            .alternatives
            .iter()
            .map(|alt| {
                if alt.reason.trim().is_empty() {
                    alt.medication.clone()
                } else {
                    format!("{}: {}", alt.medication, alt.reason)
                }
            })
            .collect();
        w.subheading("Alternative Options");
        w.bullets(&items);
    }

    w.end_section();
}

fn medication_card(number: usize, medication: &MedicationRecommendation) -> Block {
    let mut card = Block::card(PANEL, BORDER).line(BlockLine::new(
        format!("{number}. {}", or_unspecified(&medication.medication)),
        TextStyle::new(13.0, FontStyle::Bold, BLACK, 7.0),
    ));

    if !medication.indian_brands.is_empty() {
        card.push(BlockLine::new(
            format!("Indian Brands: {}", medication.indian_brands.join(", ")),
            TextStyle::body().with_color(BRAND_BLUE),
        ));
    }
    card.push(BlockLine::new(
        format!(
            "Dosage: {} | Duration: {}",
            or_unspecified(&medication.dosage),
            or_unspecified(&medication.duration)
        ),
        TextStyle::body(),
    ));
    if !medication.cost.trim().is_empty() {
        card.push(BlockLine::new(
            format!("Cost: {}", medication.cost),
            TextStyle::new(10.0, FontStyle::Bold, GREEN, 6.0),
        ));
    }
    if !medication.reasoning.trim().is_empty() {
        card.push(BlockLine::new(
            format!("AI Reasoning: {}", medication.reasoning),
            TextStyle::small()
                .with_font(FontStyle::Italic)
                .with_color(MUTED),
        ));
    }
    card
}
