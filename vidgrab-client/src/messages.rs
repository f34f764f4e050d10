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
//! User-facing messages

use std::rc::Rc;

use cloneable_errors::{ErrorContext, IntoErrorIterator};

pub const EMPTY_URL: &str = "Please enter a video URL first.";
pub const ANALYZE_FAILED: &str = "Could not analyze this video.";
pub const DOWNLOAD_START_FAILED: &str = "Could not start the download.";
pub const DOWNLOAD_FAILED: &str = "The download failed.";
pub const CONNECTION_ERROR: &str = "Could not connect to the server";
pub const FILE_FETCH_FAILED: &str = "Could not retrieve the downloaded file";

/// Renders the whole error stack on a single line
pub fn describe_error(err: &ErrorContext) -> String {
    err.error_chain()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

pub fn connection_error(err: &ErrorContext) -> Rc<str> {
    format!("{CONNECTION_ERROR}: {}", describe_error(err)).into()
}

pub fn file_fetch_error(err: &ErrorContext) -> Rc<str> {
    format!("{FILE_FETCH_FAILED}: {}", describe_error(err)).into()
}

#[cfg(test)]
mod tests {
    use cloneable_errors::{anyhow, ErrContext};

    use super::*;

    #[test]
    fn connection_error_includes_whole_chain() {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused")
            .context("Failed to send the request");
        assert_eq!(&*connection_error(&err), "Could not connect to the server: Failed to send the request: connection refused");
    }

    #[test]
    fn single_error_is_rendered_as_is() {
        assert_eq!(describe_error(&anyhow!("timed out")), "timed out");
    }
}
