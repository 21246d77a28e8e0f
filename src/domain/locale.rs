//! Display captions for steps, fields and choices.
//!
//! Captions are presentation only: stored labels and canonical codes do not
//! depend on the locale.

use serde::{Deserialize, Serialize};

use super::catalog::{FieldId, Step};

/// Fixed screen text outside the catalog: titles, key hints and notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiText {
    AppTitle,
    Step,
    ResultTitle,
    Field,
    Choice,
    Next,
    Analyze,
    Back,
    Sample,
    Restart,
    StartOver,
    EditAnswers,
    Quit,
    ModelUnavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    English,
    Indonesian,
}

impl Locale {
    /// Parse a locale tag such as `en`, `id`, `en-US` or `id_ID`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::English),
            "id" | "in" => Some(Self::Indonesian),
            _ => None,
        }
    }

    /// Step title shown in the progress header.
    #[must_use]
    pub fn step_title(self, step: Step) -> &'static str {
        const EN: [&str; 6] = [
            "Personal Data",
            "Lifestyle",
            "Environment",
            "Medical History",
            "Heart & Medication",
            "Lab & Vitals",
        ];
        const ID: [&str; 6] = [
            "Data Diri",
            "Gaya Hidup",
            "Lingkungan",
            "Riwayat Medis",
            "Jantung & Obat",
            "Lab & Vital",
        ];
        let i = usize::from(step.number() - 1);
        match self {
            Self::English => EN[i],
            Self::Indonesian => ID[i],
        }
    }

    /// Caption of an input field.
    #[must_use]
    pub fn field_caption(self, id: FieldId) -> &'static str {
        let (en, id_) = match id {
            FieldId::Age => ("Age", "Usia"),
            FieldId::Gender => ("Gender", "Jenis Kelamin"),
            FieldId::IncomeLevel => ("Income", "Pendapatan"),
            FieldId::SmokingStatus => ("Smoking", "Merokok"),
            FieldId::AlcoholConsumption => ("Alcohol", "Alkohol"),
            FieldId::DietaryHabits => ("Diet", "Pola Makan"),
            FieldId::PhysicalActivity => ("Physical Activity", "Aktivitas Fisik"),
            FieldId::Region => ("Region", "Wilayah"),
            FieldId::SleepHours => ("Sleep Hours/Day", "Jam Tidur/Hari"),
            FieldId::AirPollutionExposure => ("Air Pollution", "Polusi Udara"),
            FieldId::StressLevel => ("Stress Level", "Tingkat Stres"),
            FieldId::HasDiabetes => ("Diabetes", "Diabetes"),
            FieldId::HasHypertension => ("Hypertension", "Hipertensi"),
            FieldId::HasObesity => ("Obesity", "Obesitas"),
            FieldId::ParticipatedInFreeScreening => {
                ("Joined Free Screening?", "Ikut Skrining Gratis?")
            }
            FieldId::FamilyHistory => {
                ("Family History of Heart Disease", "Riwayat Keluarga Sakit Jantung")
            }
            FieldId::PreviousHeartDisease => {
                ("Previous Heart Disease", "Riwayat Jantung Sebelumnya")
            }
            FieldId::MedicationUsage => ("Regular Medication?", "Minum Obat Rutin?"),
            FieldId::EkgResults => ("EKG Result", "Hasil EKG"),
            FieldId::BpSystolic => ("Systolic BP", "Tensi Sistolik"),
            FieldId::CholesterolLevel => ("Total Cholesterol", "Total Kolesterol"),
            FieldId::CholesterolLdl => ("LDL (Bad)", "LDL (Jahat)"),
            FieldId::FastingBloodSugar => ("Fasting Blood Sugar", "Gula Darah Puasa"),
            FieldId::BpDiastolic => ("Diastolic BP", "Tensi Diastolik"),
            FieldId::CholesterolHdl => ("HDL (Good)", "HDL (Baik)"),
            FieldId::Triglycerides => ("Triglycerides", "Trigliserida"),
            FieldId::WaistCircumference => ("Waist Circumference (cm)", "Lingkar Pinggang (cm)"),
            FieldId::HeartRate => ("Heart Rate", "Detak Jantung"),
        };
        match self {
            Self::English => en,
            Self::Indonesian => id_,
        }
    }

    /// Caption of a stored choice label.
    ///
    /// Only the Yes/No labels are stored in Indonesian; everything else is
    /// shown as stored.
    #[must_use]
    pub fn choice_caption(self, label: &'static str) -> &'static str {
        match (self, label) {
            (Self::English, "Ya") => "Yes",
            (Self::English, "Tidak") => "No",
            _ => label,
        }
    }

    #[must_use]
    pub fn ui(self, text: UiText) -> &'static str {
        let (en, id) = match text {
            UiText::AppTitle => ("Heart Attack Risk Check", "Cek Risiko Serangan Jantung"),
            UiText::Step => ("Step", "Langkah"),
            UiText::ResultTitle => (" Analysis Result ", " Hasil Analisis "),
            UiText::Field => ("Field ", "Kolom "),
            UiText::Choice => ("Choice ", "Pilihan "),
            UiText::Next => ("Next ", "Lanjut "),
            UiText::Analyze => ("Analyze ", "Analisis "),
            UiText::Back => ("Back ", "Kembali "),
            UiText::Sample => ("Sample ", "Contoh "),
            UiText::Restart => ("Restart ", "Mulai Ulang "),
            UiText::StartOver => ("Start Over ", "Ulangi "),
            UiText::EditAnswers => ("Edit Answers ", "Ubah Jawaban "),
            UiText::Quit => ("Quit", "Keluar"),
            UiText::ModelUnavailable => (
                "Model not loaded: analysis is unavailable.",
                "Model belum dimuat: analisis tidak tersedia.",
            ),
        };
        match self {
            Self::English => en,
            Self::Indonesian => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("en"), Some(Locale::English));
        assert_eq!(Locale::from_tag("en-US"), Some(Locale::English));
        assert_eq!(Locale::from_tag("ID_id"), Some(Locale::Indonesian));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_step_titles() {
        assert_eq!(Locale::Indonesian.step_title(Step::FIRST), "Data Diri");
        assert_eq!(Locale::English.step_title(Step::LAST), "Lab & Vitals");
    }

    #[test]
    fn test_choice_captions_keep_stored_labels() {
        assert_eq!(Locale::English.choice_caption("Ya"), "Yes");
        assert_eq!(Locale::Indonesian.choice_caption("Ya"), "Ya");
        assert_eq!(Locale::English.choice_caption("Current"), "Current");
    }

    #[test]
    fn test_screen_text_follows_locale() {
        assert_eq!(Locale::English.ui(UiText::ResultTitle), " Analysis Result ");
        assert_eq!(Locale::Indonesian.ui(UiText::ResultTitle), " Hasil Analisis ");
        assert_eq!(Locale::Indonesian.ui(UiText::Step), "Langkah");
        assert_ne!(
            Locale::English.ui(UiText::AppTitle),
            Locale::Indonesian.ui(UiText::AppTitle)
        );
    }
}
