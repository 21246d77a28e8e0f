//! Verdict types: interpretation of the model's risk probability.

use serde::{Deserialize, Serialize};

use super::locale::Locale;

/// Decision threshold. Probabilities strictly above it are high risk.
pub const RISK_THRESHOLD: f64 = 0.5;

/// Binary risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    /// Classify a probability. `0.5` itself is low risk.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > RISK_THRESHOLD {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Headline shown above the result.
    #[must_use]
    pub fn headline(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::High, Locale::English) => "HIGH RISK",
            (Self::High, Locale::Indonesian) => "BERISIKO TINGGI",
            (Self::Low, Locale::English) => "LOW RISK",
            (Self::Low, Locale::Indonesian) => "RISIKO RENDAH",
        }
    }

    /// Fixed advisory text.
    #[must_use]
    pub fn advisory(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::High, Locale::English) => {
                "The model detected a pattern associated with heart attack risk. \
                 Please consult a doctor as soon as possible."
            }
            (Self::High, Locale::Indonesian) => {
                "Model mendeteksi pola yang mengarah pada risiko serangan jantung. \
                 Segera konsultasikan ke dokter."
            }
            (Self::Low, Locale::English) => {
                "Your health profile looks safe. Keep up a healthy lifestyle."
            }
            (Self::Low, Locale::Indonesian) => {
                "Profil kesehatan Anda terpantau aman. Pertahankan gaya hidup sehat."
            }
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Classification of one successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Unique identifier
    pub id: String,

    /// Model probability, stored exactly as returned
    pub probability: f64,

    pub label: RiskLabel,

    /// Advisory text in the locale the verdict was produced for
    pub advisory: String,

    pub locale: Locale,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Verdict {
    /// Probability as a percentage, not re-derived or rounded.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.probability * 100.0
    }

    /// Percentage with one decimal, e.g. `73.0%`.
    #[must_use]
    pub fn display_percentage(&self) -> String {
        format!("{:.1}%", self.percentage())
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        self.label.headline(self.locale)
    }

    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        self.label == RiskLabel::High
    }
}

/// Turn a model probability into a verdict.
#[must_use]
pub fn classify(probability: f64, locale: Locale) -> Verdict {
    let label = RiskLabel::from_probability(probability);
    Verdict {
        id: uuid_v4(),
        probability,
        label,
        advisory: label.advisory(locale).to_string(),
        locale,
        created_at: chrono::Utc::now(),
    }
}

/// Random (v4) UUID from a ChaCha20 CSPRNG seeded by the OS.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let mut bytes: [u8; 16] = rng.gen();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
