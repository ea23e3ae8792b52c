use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use url::Url;

use crate::error::{Error, ErrorKind};

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    /// Timezone events are compared and displayed in.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// Public feed URL template; `{id}` is replaced with the calendar id.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Resolution of the rasterized PNG pages.
    #[serde(default = "default_image_dpi")]
    pub image_dpi: f32,

    /// A filler row is inserted after this many event rows in the PDF variant.
    #[serde(default = "default_ad_frequency")]
    pub ad_frequency: usize,

    /// Seconds to wait for the browser to materialize its PDF output.
    #[serde(default = "default_render_timeout")]
    pub render_timeout: u64,

    /// Browser binary used for the headless print. Defaults to the fixed
    /// Edge install path on Windows.
    #[serde(default)]
    pub browser: Option<PathBuf>,

    /// Directory the HTML template resolves its background image against.
    /// Defaults to the directory of the running executable.
    #[serde(default)]
    pub asset_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            feed_url: default_feed_url(),
            image_dpi: default_image_dpi(),
            ad_frequency: default_ad_frequency(),
            render_timeout: default_render_timeout(),
            browser: None,
            asset_dir: None,
        }
    }
}

impl Config {
    /// Base `file://` URI substituted into the HTML template.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be resolved to an absolute path.
    pub fn asset_base_uri(&self) -> Result<Url, Error> {
        let dir = match &self.asset_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_exe()?
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        };

        let dir = if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir()?.join(dir)
        };

        Url::from_file_path(&dir).map_err(|()| {
            Error::new(
                ErrorKind::Parsing,
                format!("Not an absolute directory: {}", dir.display()),
            )
        })
    }
}

pub fn init(path: Option<PathBuf>) -> Result<Config, Error> {
    match path {
        Some(path) => {
            let string = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&string)?)
        }
        None => Ok(Config::default()),
    }
}

fn default_timezone() -> Tz {
    chrono_tz::Europe::Budapest
}

fn default_feed_url() -> String {
    "https://calendar.google.com/calendar/ical/{id}/public/basic.ics".to_owned()
}

const fn default_image_dpi() -> f32 {
    250.0
}

const fn default_ad_frequency() -> usize {
    15
}

const fn default_render_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.timezone, chrono_tz::Europe::Budapest);
        assert_eq!(config.ad_frequency, 15);
        assert_eq!(config.render_timeout, 10);
        assert!(config.browser.is_none());
        assert!(config.feed_url.contains("{id}"));
    }

    #[test]
    fn file_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            timezone = "Europe/Berlin"
            image_dpi = 72.0
            browser = "/usr/bin/chromium"
            "#,
        )
        .unwrap();

        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.image_dpi, 72.0);
        assert_eq!(config.browser, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(config.ad_frequency, 15);
    }

    #[test]
    fn asset_base_uri_is_a_file_url() {
        let config = Config {
            asset_dir: Some(std::env::temp_dir()),
            ..Config::default()
        };

        let uri = config.asset_base_uri().unwrap();
        assert_eq!(uri.scheme(), "file");
    }
}
