//! Similarity score presentation: percentage, three-tier label, colour tier.

/// Tier boundaries are inclusive on the lower edge: `0.9` is already "Sangat Cocok".
const EXCELLENT_MIN: f64 = 0.9;
const PROMISING_MIN: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    Excellent,
    Promising,
    Fair,
}

impl ScoreTier {
    /// Tier for a similarity fraction in `[0, 1]`.
    pub fn from_fraction(score: f64) -> Self {
        if score >= EXCELLENT_MIN {
            Self::Excellent
        } else if score >= PROMISING_MIN {
            Self::Promising
        } else {
            Self::Fair
        }
    }

    /// Tier for a score already expressed as a percentage (the simulate endpoint).
    pub fn from_percent(percent: f64) -> Self {
        Self::from_fraction(percent / 100.0)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Sangat Cocok",
            Self::Promising => "Potensial",
            Self::Fair => "Cukup Cocok",
        }
    }

    /// CSS modifier for score badges, e.g. `score-badge--excellent`.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "score-badge--excellent",
            Self::Promising => "score-badge--promising",
            Self::Fair => "score-badge--fair",
        }
    }

    /// Solid fill used by printed reports.
    pub fn report_color(self) -> &'static str {
        match self {
            Self::Excellent => "#16A34A",
            Self::Promising => "#3B82F6",
            Self::Fair => "#F59E0B",
        }
    }

    pub const ALL: [ScoreTier; 3] = [Self::Excellent, Self::Promising, Self::Fair];
}

/// `round(score × 100)`, clamped to `0..=100`.
pub fn percentage(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}

pub fn score_label(score: f64) -> &'static str {
    ScoreTier::from_fraction(score).label()
}

/// Styling bucket for the free-text recommendation level returned by the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTier {
    Replication,
    Collaboration,
    Other,
}

impl LevelTier {
    pub fn classify(level: &str) -> Self {
        if level.contains("Replikasi") {
            Self::Replication
        } else if level.contains("Kolaborasi") {
            Self::Collaboration
        } else {
            Self::Other
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Replication => "level-tag--replication",
            Self::Collaboration => "level-tag--collaboration",
            Self::Other => "level-tag--other",
        }
    }
}
