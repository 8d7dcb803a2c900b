use crate::common::DEFAULT_LOCALE;
use crate::errors::{ErrorKind, PolyglotError, PolyglotResult};

/// Localization switches for one facade or one request.
///
/// - `default_locale` is the locale new content is seeded under when a record
///   is localized for the first time.
/// - `working_locale` is the locale reads resolve to. When unset, each record
///   resolves to its own native language.
/// - `include_i18n` keeps the raw `i18n` map on resolved records, which
///   editing screens need. Public reads usually turn it off.
///
/// A context is a plain value: each facade owns one, and a request that
/// needs different switches takes a view with its own copy instead of
/// changing shared state.
///
/// # Examples
///
/// ```rust
/// use polyglot::i18n::LocaleContext;
///
/// let ctx = LocaleContext::default()
///     .with_working_locale("fr")
///     .with_include_i18n(false);
/// assert_eq!(ctx.default_locale(), "en");
/// assert_eq!(ctx.working_locale(), Some("fr"));
/// assert!(!ctx.include_i18n());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    default_locale: String,
    working_locale: Option<String>,
    include_i18n: bool,
}

impl Default for LocaleContext {
    fn default() -> Self {
        LocaleContext {
            default_locale: DEFAULT_LOCALE.to_string(),
            working_locale: None,
            include_i18n: true,
        }
    }
}

impl LocaleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn working_locale(&self) -> Option<&str> {
        self.working_locale.as_deref()
    }

    pub fn include_i18n(&self) -> bool {
        self.include_i18n
    }

    /// Sets the locale new content is seeded under.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] for an empty or blank locale.
    pub fn set_default_locale(&mut self, locale: &str) -> PolyglotResult<()> {
        self.default_locale = validate_locale(locale)?;
        Ok(())
    }

    /// Sets or clears the locale reads resolve to.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] for an empty or blank locale.
    pub fn set_working_locale(&mut self, locale: Option<&str>) -> PolyglotResult<()> {
        self.working_locale = match locale {
            Some(locale) => Some(validate_locale(locale)?),
            None => None,
        };
        Ok(())
    }

    pub fn set_include_i18n(&mut self, include_i18n: bool) {
        self.include_i18n = include_i18n;
    }

    /// Builder form of [LocaleContext::set_default_locale].
    ///
    /// A blank locale is ignored and the current value kept.
    pub fn with_default_locale(mut self, locale: &str) -> Self {
        if let Ok(locale) = validate_locale(locale) {
            self.default_locale = locale;
        }
        self
    }

    /// Builder form of [LocaleContext::set_working_locale].
    ///
    /// A blank locale is ignored and the current value kept.
    pub fn with_working_locale(mut self, locale: &str) -> Self {
        if let Ok(locale) = validate_locale(locale) {
            self.working_locale = Some(locale);
        }
        self
    }

    pub fn without_working_locale(mut self) -> Self {
        self.working_locale = None;
        self
    }

    pub fn with_include_i18n(mut self, include_i18n: bool) -> Self {
        self.include_i18n = include_i18n;
        self
    }
}

fn validate_locale(locale: &str) -> PolyglotResult<String> {
    let trimmed = locale.trim();
    if trimmed.is_empty() {
        log::error!("Locale must not be empty");
        return Err(PolyglotError::new(
            "Locale must not be empty",
            ErrorKind::ValidationError,
        ));
    }
    Ok(trimmed.to_string())
}
