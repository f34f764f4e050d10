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
use std::num::NonZeroU64;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_POLL_INTERVAL_MS: NonZeroU64 = NonZeroU64::MIN.saturating_add(499);
pub const API_KEY_HEADER: &str = "X-API-Key";

// Fallbacks for fields missing from server responses

pub const UNKNOWN_TITLE: &str = "Unknown video";
pub const UNKNOWN_UPLOADER: &str = "Unknown uploader";
pub const DEFAULT_DURATION: &str = "00:00";
pub const DEFAULT_FILENAME: &str = "download";
