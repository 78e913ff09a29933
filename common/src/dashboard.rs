//! Dashboard widgets: progress circles and match score bands

pub const DEFAULT_PROGRESS: u8 = 92;

/// Value of a `data-progress` attribute, clamped to 0..=100.
/// Missing or unparsable values give [`DEFAULT_PROGRESS`].
pub fn progress_from_attr(attr: Option<&str>) -> u8 {
    attr.map(str::trim)
        .and_then(|s| s.trim_end_matches('%').parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(DEFAULT_PROGRESS)
}

/// CSS background for a progress circle filled to `percent`.
pub fn conic_gradient(percent: u8) -> String {
    let p = percent.min(100);
    format!(
        "conic-gradient(var(--primary-color) 0% {p}%, rgba(59, 130, 246, 0.2) {p}% 100%)"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    Poor,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            80..=89 => ScoreBand::Good,
            70..=79 => ScoreBand::Average,
            60..=69 => ScoreBand::Poor,
            _ => ScoreBand::Weak,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "match-excellent",
            ScoreBand::Good => "match-good",
            ScoreBand::Average => "match-average",
            ScoreBand::Poor => "match-poor",
            ScoreBand::Weak => "match-weak",
        }
    }
}
