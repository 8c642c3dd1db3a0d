use std::{collections::HashMap, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::EstateError;

pub const UNCATEGORIZED: &str = "uncategorized";

/// Folds a missing or blank category into [`UNCATEGORIZED`].
pub fn normalize_category(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => UNCATEGORIZED,
    }
}

/// Display languages for category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    /// Picks the language from a BCP 47 tag such as `fr-FR`.
    pub fn from_locale(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("fr") {
            Language::French
        } else {
            Language::English
        }
    }
}

impl FromStr for Language {
    type Err = EstateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "fr" | "french" | "français" => Ok(Language::French),
            other => Err(EstateError::InvalidInput(format!("unsupported language `{other}`"))),
        }
    }
}

// code -> (english, french)
static CATEGORY_LABELS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> =
    Lazy::new(|| {
        HashMap::from([
            ("rent", ("Rent", "Loyer")),
            ("charges", ("Service charges", "Charges locatives")),
            ("deposit", ("Security deposit", "Dépôt de garantie")),
            ("maintenance", ("Maintenance", "Entretien")),
            ("repairs", ("Repairs", "Réparations")),
            ("renovation", ("Renovation", "Travaux")),
            ("mortgage", ("Mortgage", "Crédit immobilier")),
            ("loan", ("Loan", "Prêt")),
            ("insurance", ("Insurance", "Assurance")),
            ("taxes", ("Property tax", "Taxe foncière")),
            ("utilities", ("Utilities", "Énergie et eau")),
            ("management_fees", ("Management fees", "Frais de gestion")),
            ("condo_fees", ("Condominium fees", "Charges de copropriété")),
            ("other", ("Other", "Autre")),
            (UNCATEGORIZED, ("Uncategorized", "Non catégorisé")),
        ])
    });

/// Human label for a raw category code. Unknown codes are title-cased.
pub fn display_label(code: &str, language: Language) -> String {
    let normalized = normalize_category(Some(code));
    match CATEGORY_LABELS.get(normalized) {
        Some((english, french)) => match language {
            Language::English => english.to_string(),
            Language::French => french.to_string(),
        },
        None => title_case(normalized),
    }
}

fn title_case(code: &str) -> String {
    code.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
