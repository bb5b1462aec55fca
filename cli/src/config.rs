//! Locale selection for the currency formatter.
//!
//! An explicit `--locale` wins and must be supported. Otherwise the POSIX
//! variables are consulted in precedence order, and an unsupported value there
//! falls back to en-US with a warning rather than refusing to start.

use crate::currency::{Locale, LocaleError};

/// Environment variables consulted for the locale, highest precedence first.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MONETARY", "LANG"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Flag,
    Environment(&'static str),
    Fallback,
}

pub fn resolve_locale<F>(explicit: Option<&str>, lookup: F) -> Result<(Locale, LocaleSource), LocaleError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(tag) = explicit {
        return tag.parse().map(|locale| (locale, LocaleSource::Flag));
    }

    let from_env = LOCALE_ENV_VARS.iter().find_map(|var| {
        lookup(var)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (*var, value))
    });

    match from_env {
        Some((var, value)) => match value.parse() {
            Ok(locale) => Ok((locale, LocaleSource::Environment(var))),
            Err(error) => {
                tracing::warn!(%error, var, "Falling back to {}", Locale::default());
                Ok((Locale::default(), LocaleSource::Fallback))
            }
        },
        None => Ok((Locale::default(), LocaleSource::Fallback)),
    }
}
