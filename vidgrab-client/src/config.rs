/* This file is part of the VidGrab project
*
*  Copyright (C) 2025 The VidGrab Contributors
*  
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::{num::NonZeroU64, rc::Rc, time::Duration};

use cloneable_errors::{bail, ErrorContext, ResContext};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_POLL_INTERVAL_MS};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the API endpoint paths are appended to
    pub api_base_url: Rc<str>,
    /// Pre-shared key sent with every request, if set
    pub api_key: Option<Rc<str>>,
    pub poll_interval_ms: NonZeroU64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            api_key: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.get())
    }

    /// Parses [`Self::api_base_url`], making sure it can have endpoint segments appended to it
    pub fn base_url(&self) -> Result<Url, ErrorContext> {
        let url = Url::parse(&self.api_base_url).with_context(|| format!("Invalid API base URL '{}'", self.api_base_url))?;
        if url.cannot_be_a_base() {
            bail!("API base URL '{}' cannot be used as a base", self.api_base_url);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let cfg: ClientConfig = toml::from_str(r#"api_key = "hunter2""#).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("hunter2"));
        assert_eq!(&*cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(toml::from_str::<ClientConfig>("poll_interval_ms = 0").is_err());
    }

    #[test]
    fn base_url_validation() {
        let mut cfg = ClientConfig::default();
        assert_eq!(cfg.base_url().unwrap().as_str(), DEFAULT_API_BASE_URL);

        cfg.api_base_url = "not a url".into();
        assert!(cfg.base_url().is_err());

        cfg.api_base_url = "mailto:someone@example.com".into();
        assert!(cfg.base_url().is_err());
    }
}
