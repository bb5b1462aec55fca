//! Currency Formatting Module
//!
//! Turns a tip amount into the string shown on screen. The calculator only
//! sees the `CurrencyFormatter` trait, so tests and alternative front ends
//! can inject their own formatting.
//!
//! `Locale` is a closed set of presets. Each preset carries the symbol,
//! separators and fraction digits that the platform currency formatter uses
//! for that locale.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub trait CurrencyFormatter {
    fn format(&self, amount: Decimal) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub position: SymbolPosition,
    /// Placed between symbol and number, usually empty or a no-break space.
    pub symbol_separator: &'static str,
    pub decimal_separator: char,
    pub group_separator: Option<char>,
    /// Whole-part digits required beyond the first group before grouping kicks in.
    pub min_grouping_digits: usize,
    pub fraction_digits: u32,
}

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: char = '\u{202f}';

impl CurrencyFormat {
    pub fn for_locale(locale: Locale) -> Self {
        let prefix = |symbol: &'static str| CurrencyFormat {
            symbol,
            position: SymbolPosition::Prefix,
            symbol_separator: "",
            decimal_separator: '.',
            group_separator: Some(','),
            min_grouping_digits: 1,
            fraction_digits: 2,
        };
        let euro_suffix = |group: char| CurrencyFormat {
            symbol: "€",
            position: SymbolPosition::Suffix,
            symbol_separator: NBSP,
            decimal_separator: ',',
            group_separator: Some(group),
            min_grouping_digits: 1,
            fraction_digits: 2,
        };

        match locale {
            Locale::EnUs | Locale::EnCa | Locale::EnAu => prefix("$"),
            Locale::EnGb => prefix("£"),
            Locale::ZhCn => prefix("¥"),
            Locale::JaJp => CurrencyFormat {
                fraction_digits: 0,
                ..prefix("￥")
            },
            Locale::KoKr => CurrencyFormat {
                fraction_digits: 0,
                ..prefix("₩")
            },
            Locale::DeDe | Locale::ItIt => euro_suffix('.'),
            Locale::FrFr => euro_suffix(NARROW_NBSP),
            Locale::EsEs => CurrencyFormat {
                min_grouping_digits: 2,
                ..euro_suffix('.')
            },
            Locale::NlNl => CurrencyFormat {
                position: SymbolPosition::Prefix,
                ..euro_suffix('.')
            },
            Locale::PtBr => CurrencyFormat {
                symbol: "R$",
                position: SymbolPosition::Prefix,
                ..euro_suffix('.')
            },
        }
    }

    fn group(&self, whole: &str) -> String {
        let sep = match self.group_separator {
            Some(sep) if whole.len() >= 3 + self.min_grouping_digits => sep,
            _ => return whole.to_string(),
        };

        let mut out = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(c);
        }
        out
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointNearestEven);

        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        // Near Decimal::MAX the scale cannot grow, so pad rather than rescale
        let mut number = self.group(whole);
        let width = self.fraction_digits as usize;
        if width > 0 {
            number.push(self.decimal_separator);
            number.push_str(&format!("{:0<width$}", fraction, width = width));
        }

        let body = match self.position {
            SymbolPosition::Prefix => format!("{}{}{}", self.symbol, self.symbol_separator, number),
            SymbolPosition::Suffix => format!("{}{}{}", number, self.symbol_separator, self.symbol),
        };

        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    EnUs,
    EnGb,
    EnCa,
    EnAu,
    DeDe,
    FrFr,
    EsEs,
    ItIt,
    NlNl,
    PtBr,
    JaJp,
    ZhCn,
    KoKr,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("empty locale tag")]
    Empty,
    #[error("unsupported locale '{0}'")]
    Unsupported(String),
}

impl Locale {
    pub const ALL: [Locale; 13] = [
        Locale::EnUs,
        Locale::EnGb,
        Locale::EnCa,
        Locale::EnAu,
        Locale::DeDe,
        Locale::FrFr,
        Locale::EsEs,
        Locale::ItIt,
        Locale::NlNl,
        Locale::PtBr,
        Locale::JaJp,
        Locale::ZhCn,
        Locale::KoKr,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::EnCa => "en-CA",
            Locale::EnAu => "en-AU",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
            Locale::EsEs => "es-ES",
            Locale::ItIt => "it-IT",
            Locale::NlNl => "nl-NL",
            Locale::PtBr => "pt-BR",
            Locale::JaJp => "ja-JP",
            Locale::ZhCn => "zh-CN",
            Locale::KoKr => "ko-KR",
        }
    }

    /// Region picked when a tag names only a language.
    fn for_language(language: &str) -> Option<Locale> {
        let locale = match language {
            "en" => Locale::EnUs,
            "de" => Locale::DeDe,
            "fr" => Locale::FrFr,
            "es" => Locale::EsEs,
            "it" => Locale::ItIt,
            "nl" => Locale::NlNl,
            "pt" => Locale::PtBr,
            "ja" => Locale::JaJp,
            "zh" => Locale::ZhCn,
            "ko" => Locale::KoKr,
            _ => return None,
        };
        Some(locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Parses POSIX (`de_DE.UTF-8`, `fr_FR@euro`) and BCP-47 (`de-DE`) tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let tag = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('_', "-");
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }
        if tag == "C" || tag == "POSIX" {
            return Ok(Locale::EnUs);
        }

        let mut parts = tag.split('-');
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let found = match parts.next() {
            Some(region) => {
                let wanted = format!("{}-{}", language, region.to_ascii_uppercase());
                Self::ALL.into_iter().find(|l| l.tag() == wanted)
            }
            None => Self::for_language(&language),
        };

        found.ok_or_else(|| LocaleError::Unsupported(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn render(locale: Locale, amount: &str) -> String {
        CurrencyFormat::for_locale(locale).format(dec(amount))
    }

    #[test]
    fn us_dollars() {
        assert_eq!(render(Locale::EnUs, "10"), "$10.00");
        assert_eq!(render(Locale::EnUs, "9.18"), "$9.18");
        assert_eq!(render(Locale::EnUs, "0"), "$0.00");
        assert_eq!(render(Locale::EnUs, "1234567.5"), "$1,234,567.50");
        assert_eq!(render(Locale::EnUs, "999.99"), "$999.99");
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(render(Locale::EnUs, "2.345"), "$2.34");
        assert_eq!(render(Locale::EnUs, "2.355"), "$2.36");
        assert_eq!(render(Locale::EnUs, "2.3451"), "$2.35");
    }

    #[test]
    fn keeps_fraction_digits_near_decimal_max() {
        let us = CurrencyFormat::for_locale(Locale::EnUs);
        assert_eq!(
            us.format(Decimal::MAX),
            "$79,228,162,514,264,337,593,543,950,335.00"
        );
        assert_eq!(
            us.format(dec("2000000000000000000000000000.0")),
            "$2,000,000,000,000,000,000,000,000,000.00"
        );
        assert_eq!(
            CurrencyFormat::for_locale(Locale::JaJp).format(Decimal::MAX),
            "￥79,228,162,514,264,337,593,543,950,335"
        );
    }

    #[test]
    fn negative_amounts_get_a_sign() {
        assert_eq!(render(Locale::EnUs, "-3.5"), "-$3.50");
        assert_eq!(render(Locale::EnUs, "-0.001"), "$0.00");
    }

    #[test]
    fn euro_suffix_locales() {
        assert_eq!(render(Locale::DeDe, "1234.5"), "1.234,50\u{a0}€");
        assert_eq!(render(Locale::ItIt, "7.65"), "7,65\u{a0}€");
        assert_eq!(render(Locale::FrFr, "1234.5"), "1\u{202f}234,50\u{a0}€");
    }

    #[test]
    fn spanish_groups_from_five_digits() {
        assert_eq!(render(Locale::EsEs, "1234.5"), "1234,50\u{a0}€");
        assert_eq!(render(Locale::EsEs, "12345.5"), "12.345,50\u{a0}€");
    }

    #[test]
    fn prefix_with_space() {
        assert_eq!(render(Locale::NlNl, "1234.5"), "€\u{a0}1.234,50");
        assert_eq!(render(Locale::PtBr, "10"), "R$\u{a0}10,00");
    }

    #[test]
    fn zero_fraction_currencies() {
        assert_eq!(render(Locale::JaJp, "1234.5"), "￥1,234");
        assert_eq!(render(Locale::JaJp, "1235.5"), "￥1,236");
        assert_eq!(render(Locale::KoKr, "9.18"), "₩9");
    }

    #[test]
    fn other_prefix_symbols() {
        assert_eq!(render(Locale::EnGb, "10"), "£10.00");
        assert_eq!(render(Locale::ZhCn, "3"), "¥3.00");
    }

    #[test]
    fn parse_posix_and_bcp47_tags() {
        assert_eq!("de_DE.UTF-8".parse(), Ok(Locale::DeDe));
        assert_eq!("fr_FR@euro".parse(), Ok(Locale::FrFr));
        assert_eq!("en-gb".parse(), Ok(Locale::EnGb));
        assert_eq!("pt_BR".parse(), Ok(Locale::PtBr));
    }

    #[test]
    fn parse_language_only_and_posix_default() {
        assert_eq!("de".parse(), Ok(Locale::DeDe));
        assert_eq!("en".parse(), Ok(Locale::EnUs));
        assert_eq!("C".parse(), Ok(Locale::EnUs));
        assert_eq!("POSIX".parse(), Ok(Locale::EnUs));
        assert_eq!("C.UTF-8".parse(), Ok(Locale::EnUs));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!("".parse::<Locale>(), Err(LocaleError::Empty));
        assert_eq!(
            "de_CH".parse::<Locale>(),
            Err(LocaleError::Unsupported("de_CH".to_string()))
        );
        assert!("xx".parse::<Locale>().is_err());
    }

    #[test]
    fn every_tag_round_trips() {
        for locale in Locale::ALL {
            assert_eq!(locale.tag().parse(), Ok(locale));
        }
    }
}
