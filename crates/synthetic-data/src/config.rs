//! Generator configuration loaded via OrthoConfig.

use chrono_tz::Tz;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::error::GeneratorError;
use crate::generator::DEFAULT_LOCALE;

const DEFAULT_TIMEZONE: &str = "UTC";

/// Settings consumed by [`crate::factory::create`].
///
/// Values are read from `SYNTHETIC_DATA_*` environment variables, a
/// configuration file or command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SYNTHETIC_DATA")]
pub struct GeneratorSettings {
    /// Locale tag selecting the provider stack, for example `ro_RO`.
    pub locale: Option<String>,
    /// IANA timezone used by date formatters.
    pub timezone: Option<String>,
    /// Seed for reproducible output; entropy is used when absent.
    pub seed: Option<u64>,
    /// Attempts the unique modifier makes before giving up.
    #[ortho_config(default = 10_000)]
    pub max_unique_attempts: usize,
}

impl GeneratorSettings {
    /// Return the configured locale, falling back to `en_US`.
    #[must_use]
    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// Return the configured timezone, falling back to UTC.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidTimezone`] when the configured name
    /// is not an IANA zone.
    pub fn timezone(&self) -> Result<Tz, GeneratorError> {
        let name = self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE);
        name.parse::<Tz>().map_err(|_| GeneratorError::InvalidTimezone {
            name: name.to_owned(),
        })
    }
}
