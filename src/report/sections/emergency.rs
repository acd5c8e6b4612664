use crate::models::EmergencyProtocols;
use crate::report::canvas::{Block, BlockLine, TextStyle};
use crate::report::palette::{
    ALERT_RED, EMERGENCY_PANEL, INFO_PANEL, INFO_TEXT, URGENT_PANEL, URGENT_TEXT,
};

use super::{ReportWriter, EMERGENCY_PROTOCOLS};

pub(crate) fn render(w: &mut ReportWriter<'_>, emergency: &EmergencyProtocols) {
    w.section_header(EMERGENCY_PROTOCOLS, Some("Critical Warning Signs & Action Steps"));

    let number = &w.config.emergency_number;
    let lead = if emergency.warning_signs_immediate.is_empty() {
        format!("Call {number} immediately for any sudden, severe or rapidly worsening symptom.")
    } else {
        format!("Call {number} immediately if you experience:")
    };
    w.alert_box(
        "IMMEDIATE EMERGENCY SIGNS",
        ALERT_RED,
        EMERGENCY_PANEL,
        Some(&lead),
        &emergency.warning_signs_immediate,
    );

    if !emergency.warning_signs_urgent.is_empty() {
        w.alert_box(
            "URGENT MEDICAL ATTENTION NEEDED",
            URGENT_TEXT,
            URGENT_PANEL,
            None,
            &emergency.warning_signs_urgent,
        );
    }

    let mut contacts = Block::panel(INFO_PANEL)
        .line(BlockLine::new(
            format!(
                "EMERGENCY CONTACTS ({})",
                w.config.region_label.to_uppercase()
            ),
            TextStyle::bold(12.0).with_color(INFO_TEXT),
        ))
        .line(BlockLine::new(
            w.config.emergency_contacts_line.as_str(),
            TextStyle::body(),
        ));
    for contact in &emergency.emergency_contacts {
        contacts.push(BlockLine::bullet(contact.as_str(), TextStyle::body()));
    }
    w.full_width_block(&contacts);
    w.canvas.advance(8.0);

    if !emergency.action_steps.is_empty() {
        w.subheading("Emergency Action Steps");
        w.numbered(&emergency.action_steps);
    }

    w.end_section();
}
