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

use vidgrab_client::{constants::DEFAULT_API_BASE_URL, ClientConfig};
use web_sys::window;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Substituted at build time by the deployment
const API_BASE_OVERRIDE: Option<&str> = option_env!("VIDGRAB_API_BASE");
const API_KEY: Option<&str> = option_env!("VIDGRAB_API_KEY");

/// Without an explicit base, the API is expected under `/api/` on the page's own origin
pub fn client_config() -> ClientConfig {
    let api_base_url = match API_BASE_OVERRIDE {
        Some(base) => base.into(),
        None => window()
            .and_then(|w| w.location().origin().ok())
            .map_or_else(|| DEFAULT_API_BASE_URL.into(), |origin| format!("{origin}/api/").into()),
    };
    ClientConfig {
        api_base_url,
        api_key: API_KEY.map(Into::into),
        ..ClientConfig::default()
    }
}
