use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported site languages. Korean is the primary locale and the fallback
/// for unknown `lang` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
    Ja,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ko" => Ok(Locale::Ko),
            "en" => Ok(Locale::En),
            "ja" => Ok(Locale::Ja),
            _ => Err(()),
        }
    }
}

/// Optional `?lang=` query parameter; anything outside the closed set
/// resolves to the default locale.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LocaleQuery {
    pub lang: Option<String>,
}

impl LocaleQuery {
    pub fn resolve(&self) -> Locale {
        self.lang
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Resolve an optional `lang` value, falling back to the default locale.
pub fn resolve_lang(lang: Option<&str>) -> Locale {
    lang.and_then(|s| s.parse().ok()).unwrap_or_default()
}

/// The three parallel values of a localized field, resolved by a single
/// indexed lookup rather than per-field conditionals.
#[derive(Debug, Clone)]
pub struct Localized<T> {
    pub ko: T,
    pub en: T,
    pub ja: T,
}

impl<T> Localized<T> {
    pub fn new(ko: T, en: T, ja: T) -> Self {
        Self { ko, en, ja }
    }

    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::Ko => &self.ko,
            Locale::En => &self.en,
            Locale::Ja => &self.ja,
        }
    }

    pub fn into_get(self, locale: Locale) -> T {
        match locale {
            Locale::Ko => self.ko,
            Locale::En => self.en,
            Locale::Ja => self.ja,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_is_korean() {
        assert_eq!(Locale::default(), Locale::Ko);
    }

    #[test]
    fn parse_known_codes() {
        assert_eq!("ko".parse(), Ok(Locale::Ko));
        assert_eq!("en".parse(), Ok(Locale::En));
        assert_eq!("ja".parse(), Ok(Locale::Ja));
    }

    #[test]
    fn parse_unknown_code_fails() {
        assert!("fr".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn query_falls_back_to_default() {
        let q = LocaleQuery {
            lang: Some("de".to_string()),
        };
        assert_eq!(q.resolve(), Locale::Ko);

        let q = LocaleQuery { lang: None };
        assert_eq!(q.resolve(), Locale::Ko);

        let q = LocaleQuery {
            lang: Some("ja".to_string()),
        };
        assert_eq!(q.resolve(), Locale::Ja);
    }

    #[test]
    fn localized_lookup() {
        let title = Localized::new("안녕", "hello", "こんにちは");
        assert_eq!(*title.get(Locale::Ko), "안녕");
        assert_eq!(*title.get(Locale::En), "hello");
        assert_eq!(title.into_get(Locale::Ja), "こんにちは");
    }
}
