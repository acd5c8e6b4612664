//! Fixed color tables and score tiers.
//!
//! Every numeric score in a report goes through [`ScoreTier::of`], so the
//! thresholds are identical for every badge, bar and gauge in a document.
//! Enumerated levels map through total `match` tables with a neutral arm
//! for unrecognized values.

use serde::{Deserialize, Serialize};

use crate::models::{Priority, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BRAND_BLUE: Rgb = Rgb(59, 130, 246);
pub const GREEN: Rgb = Rgb(34, 197, 94);
pub const YELLOW: Rgb = Rgb(234, 179, 8);
pub const ORANGE: Rgb = Rgb(249, 115, 22);
pub const RED: Rgb = Rgb(239, 68, 68);
pub const ALERT_RED: Rgb = Rgb(220, 38, 38);
pub const NEUTRAL: Rgb = Rgb(128, 128, 128);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const MUTED: Rgb = Rgb(100, 100, 100);
pub const PANEL: Rgb = Rgb(248, 250, 252);
pub const BORDER: Rgb = Rgb(226, 232, 240);
pub const RULE: Rgb = Rgb(200, 200, 200);
pub const WARNING_PANEL: Rgb = Rgb(254, 242, 242);
pub const EMERGENCY_PANEL: Rgb = Rgb(254, 226, 226);
pub const URGENT_PANEL: Rgb = Rgb(254, 243, 199);
pub const URGENT_TEXT: Rgb = Rgb(180, 83, 9);
pub const INFO_PANEL: Rgb = Rgb(239, 246, 255);
pub const INFO_TEXT: Rgb = Rgb(29, 78, 216);

/// Three-tier classification of a 0-100 score.
///
/// `< 40` Low, `40..=69` Moderate, `>= 70` High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreTier {
    Low,
    Moderate,
    High,
}

impl ScoreTier {
    pub const MODERATE_FROM: u8 = 40;
    pub const HIGH_FROM: u8 = 70;

    pub fn of(score: u8) -> Self {
        if score >= Self::HIGH_FROM {
            Self::High
        } else if score >= Self::MODERATE_FROM {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Color when a higher score means more danger (risk score).
    pub fn severity_color(&self) -> Rgb {
        match self {
            Self::Low => GREEN,
            Self::Moderate => YELLOW,
            Self::High => RED,
        }
    }

    /// Color when a higher score means more certainty (confidence).
    pub fn confidence_color(&self) -> Rgb {
        match self {
            Self::Low => RED,
            Self::Moderate => YELLOW,
            Self::High => GREEN,
        }
    }
}

/// Severity rank of a palette color, 0 = calm. Used to compare tiers.
pub fn severity_rank(color: Rgb) -> u8 {
    match color {
        GREEN => 1,
        YELLOW => 2,
        ORANGE => 3,
        RED | ALERT_RED => 4,
        _ => 0,
    }
}

pub fn risk_score_color(score: u8) -> Rgb {
    ScoreTier::of(score).severity_color()
}

pub fn confidence_color(score: u8) -> Rgb {
    ScoreTier::of(score).confidence_color()
}

/// Low/Moderate/High/Critical to green/yellow/orange/red.
pub fn risk_level_color(level: &RiskLevel) -> Rgb {
    match level {
        RiskLevel::Low => GREEN,
        RiskLevel::Moderate => YELLOW,
        RiskLevel::High => ORANGE,
        RiskLevel::Critical => RED,
        RiskLevel::Unrecognized(_) => NEUTRAL,
    }
}

pub fn priority_color(priority: &Priority) -> Rgb {
    match priority {
        Priority::High => RED,
        Priority::Medium => YELLOW,
        Priority::Low => GREEN,
        Priority::Unrecognized(_) => NEUTRAL,
    }
}

/// Four-tier health score color; higher is healthier.
pub fn health_score_color(score: u8) -> Rgb {
    match score {
        80..=u8::MAX => GREEN,
        60..=79 => YELLOW,
        40..=59 => ORANGE,
        _ => ALERT_RED,
    }
}
