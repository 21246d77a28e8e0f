//! Closed answer vocabularies and their canonical model codes.
//!
//! Every choice field in the intake is backed by one of these enumerations.
//! The input label (what the intake shows and stores) and the canonical code
//! (what the fitted preprocessing transform was trained on) are both produced
//! by exhaustive `match`es, so adding a variant without mapping it does not
//! compile.

use serde::{Deserialize, Serialize};

/// A closed set of answer labels.
pub trait Choice: Copy + Sized + 'static {
    /// Every variant, in presentation order.
    const ALL: &'static [Self];

    /// Input labels, in the same order as [`Choice::ALL`].
    const LABELS: &'static [&'static str];

    /// The label stored in the wizard for this variant.
    fn label(self) -> &'static str;

    /// Parse a stored label back into the variant.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == label)
    }
}

/// A choice that the scoring model consumes as a categorical code.
pub trait CanonicalCode: Choice {
    /// Token from the fitted transform's training vocabulary.
    fn code(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];
    const LABELS: &'static [&'static str] = &["Male", "Female"];

    fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl CanonicalCode for Gender {
    fn code(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeLevel {
    Low,
    Middle,
    High,
}

impl Choice for IncomeLevel {
    const ALL: &'static [Self] = &[Self::Low, Self::Middle, Self::High];
    const LABELS: &'static [&'static str] = &["Low", "Middle", "High"];

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Middle => "Middle",
            Self::High => "High",
        }
    }
}

impl CanonicalCode for IncomeLevel {
    fn code(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Middle => "Middle",
            Self::High => "High",
        }
    }
}

/// Smoking history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingStatus {
    Never,
    Past,
    Current,
}

impl SmokingStatus {
    /// Past and current smokers both count as smokers.
    #[must_use]
    pub fn is_smoker(self) -> bool {
        matches!(self, Self::Past | Self::Current)
    }
}

impl Choice for SmokingStatus {
    const ALL: &'static [Self] = &[Self::Never, Self::Past, Self::Current];
    const LABELS: &'static [&'static str] = &["Never", "Past", "Current"];

    fn label(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Past => "Past",
            Self::Current => "Current",
        }
    }
}

impl CanonicalCode for SmokingStatus {
    fn code(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Past => "Past",
            Self::Current => "Current",
        }
    }
}

/// Alcohol consumption.
///
/// `Unknown` is a category of its own in the training vocabulary; it is not
/// folded into any other level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlcoholConsumption {
    Unknown,
    Moderate,
    High,
}

impl Choice for AlcoholConsumption {
    const ALL: &'static [Self] = &[Self::Unknown, Self::Moderate, Self::High];
    const LABELS: &'static [&'static str] = &["Unknown", "Moderate", "High"];

    fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl CanonicalCode for AlcoholConsumption {
    fn code(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryHabits {
    Healthy,
    Unhealthy,
}

impl Choice for DietaryHabits {
    const ALL: &'static [Self] = &[Self::Healthy, Self::Unhealthy];
    const LABELS: &'static [&'static str] = &["Healthy", "Unhealthy"];

    fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
        }
    }
}

impl CanonicalCode for DietaryHabits {
    fn code(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
        }
    }
}

/// Three-level ordinal shared by physical activity, air pollution exposure
/// and stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Moderate,
    High,
}

impl Choice for Level {
    const ALL: &'static [Self] = &[Self::Low, Self::Moderate, Self::High];
    const LABELS: &'static [&'static str] = &["Low", "Moderate", "High"];

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl CanonicalCode for Level {
    fn code(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Urban,
    Rural,
}

impl Choice for Region {
    const ALL: &'static [Self] = &[Self::Urban, Self::Rural];
    const LABELS: &'static [&'static str] = &["Urban", "Rural"];

    fn label(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Rural => "Rural",
        }
    }
}

impl CanonicalCode for Region {
    fn code(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Rural => "Rural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EkgResult {
    Normal,
    Abnormal,
}

impl Choice for EkgResult {
    const ALL: &'static [Self] = &[Self::Normal, Self::Abnormal];
    const LABELS: &'static [&'static str] = &["Normal", "Abnormal"];

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Abnormal => "Abnormal",
        }
    }
}

impl CanonicalCode for EkgResult {
    fn code(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Abnormal => "Abnormal",
        }
    }
}

/// Binary answer shown with the Indonesian labels `Tidak` / `Ya`.
///
/// Not a categorical code: the model receives it as a 0/1 flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }
}

impl Choice for YesNo {
    const ALL: &'static [Self] = &[Self::No, Self::Yes];
    const LABELS: &'static [&'static str] = &["Tidak", "Ya"];

    fn label(self) -> &'static str {
        match self {
            Self::No => "Tidak",
            Self::Yes => "Ya",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_labels_consistent<T: Choice + std::fmt::Debug + PartialEq>() {
        let labels: Vec<&str> = T::ALL.iter().map(|v| v.label()).collect();
        assert_eq!(labels, T::LABELS);
        for v in T::ALL {
            assert_eq!(T::from_label(v.label()), Some(*v));
        }
    }

    #[test]
    fn test_labels_match_variants() {
        assert_labels_consistent::<Gender>();
        assert_labels_consistent::<IncomeLevel>();
        assert_labels_consistent::<SmokingStatus>();
        assert_labels_consistent::<AlcoholConsumption>();
        assert_labels_consistent::<DietaryHabits>();
        assert_labels_consistent::<Level>();
        assert_labels_consistent::<Region>();
        assert_labels_consistent::<EkgResult>();
        assert_labels_consistent::<YesNo>();
    }

    #[test]
    fn test_smoker_classification() {
        assert!(SmokingStatus::Current.is_smoker());
        assert!(SmokingStatus::Past.is_smoker());
        assert!(!SmokingStatus::Never.is_smoker());
    }

    #[test]
    fn test_yes_no_uses_localized_labels() {
        assert_eq!(YesNo::from_label("Ya"), Some(YesNo::Yes));
        assert_eq!(YesNo::from_label("Tidak"), Some(YesNo::No));
        assert_eq!(YesNo::from_label("Yes"), None);
        assert_eq!(YesNo::Yes.flag(), 1);
        assert_eq!(YesNo::No.flag(), 0);
    }

    #[test]
    fn test_unknown_alcohol_is_distinct_code() {
        let codes: Vec<&str> = AlcoholConsumption::ALL.iter().map(|a| a.code()).collect();
        assert_eq!(codes, vec!["Unknown", "Moderate", "High"]);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(SmokingStatus::from_label("current"), None);
        assert_eq!(Gender::from_label("male"), None);
    }
}
