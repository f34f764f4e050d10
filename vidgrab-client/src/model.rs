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

use std::{fmt::Display, rc::Rc};

use strum::IntoStaticStr;
use vidgrab_api::{AnalyzeResponse, ApiVideoFormat, JobStatus, ProgressResponse};

use crate::constants::{DEFAULT_DURATION, UNKNOWN_TITLE, UNKNOWN_UPLOADER};

/// Lifecycle phase of a [`JobController`](crate::JobController)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, IntoStaticStr)]
pub enum Phase {
    #[default]
    Idle,
    Analyzing,
    Ready,
    Downloading,
    Completed,
    Failed,
}

impl Phase {
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// One entry of the quality menu
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FormatOption {
    pub quality_label: &'static str,
    /// Value sent as `quality` in the download request
    pub selector_value: &'static str,
}

// The menu is fixed on the client side, formats reported by the server are not offered
pub const QUALITY_OPTIONS: &[FormatOption] = &[
    FormatOption { quality_label: "Best available", selector_value: "best" },
    FormatOption { quality_label: "1080p", selector_value: "1080p" },
    FormatOption { quality_label: "720p", selector_value: "720p" },
    FormatOption { quality_label: "480p", selector_value: "480p" },
    FormatOption { quality_label: "360p", selector_value: "360p" },
    FormatOption { quality_label: "Audio only", selector_value: "audio" },
];

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VideoMetadata {
    pub title: String,
    pub uploader: String,
    pub duration_label: String,
    pub thumbnail_url: Option<String>,
    pub canonical_url: Option<String>,
    pub available_formats: &'static [FormatOption],
    /// Formats listed by the server. Kept, but not rendered.
    pub server_formats: Vec<ApiVideoFormat>,
}

impl From<AnalyzeResponse> for VideoMetadata {
    fn from(value: AnalyzeResponse) -> Self {
        let duration_label = match (value.duration_string, value.duration) {
            (Some(label), _) => label,
            (None, Some(seconds)) => format_duration(seconds),
            (None, None) => DEFAULT_DURATION.to_owned(),
        };
        Self {
            title: value.title.unwrap_or_else(|| UNKNOWN_TITLE.to_owned()),
            uploader: value.uploader.unwrap_or_else(|| UNKNOWN_UPLOADER.to_owned()),
            duration_label,
            thumbnail_url: value.thumbnail,
            canonical_url: value.webpage_url,
            available_formats: QUALITY_OPTIONS,
            server_formats: value.formats,
        }
    }
}

/// Formats a length in seconds as `M:SS` or `H:MM:SS`
pub fn format_duration(seconds: u64) -> String {
    let (hours, minutes, seconds) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Identifier of a server-side download job
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct JobHandle(Rc<str>);

impl JobHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobHandle {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for JobHandle {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The latest progress report of the active job
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProgressSnapshot {
    pub status: JobStatus,
    /// Rounded, but not clamped - whatever the server says goes
    pub percent: i64,
    pub speed_label: Option<String>,
    pub eta_label: Option<String>,
    pub filename: Option<String>,
    pub error_message: Option<String>,
}

impl From<ProgressResponse> for ProgressSnapshot {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: ProgressResponse) -> Self {
        Self {
            status: value.status,
            percent: value.progress.round() as i64,
            speed_label: value.speed,
            eta_label: value.eta,
            filename: value.filename,
            error_message: value.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_copies_fields_verbatim() {
        let meta = VideoMetadata::from(AnalyzeResponse {
            success: true,
            title: Some("Never Gonna Give You Up".into()),
            uploader: Some("Rick Astley".into()),
            duration_string: Some("3:33".into()),
            duration: Some(213),
            thumbnail: Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg".into()),
            webpage_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".into()),
            formats: vec![ApiVideoFormat { format_id: "18".into(), ext: "mp4".into(), ..Default::default() }],
            error: None,
        });
        assert_eq!(meta.title, "Never Gonna Give You Up");
        assert_eq!(meta.uploader, "Rick Astley");
        assert_eq!(meta.duration_label, "3:33");
        assert_eq!(meta.thumbnail_url.as_deref(), Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg"));
        assert_eq!(meta.canonical_url.as_deref(), Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert_eq!(meta.server_formats.len(), 1);
        assert_eq!(meta.available_formats, QUALITY_OPTIONS);
    }

    #[test]
    fn metadata_defaults() {
        let meta = VideoMetadata::from(AnalyzeResponse { success: true, ..Default::default() });
        assert_eq!(meta.title, "Unknown video");
        assert_eq!(meta.uploader, "Unknown uploader");
        assert_eq!(meta.duration_label, "00:00");
        assert_eq!(meta.thumbnail_url, None);
        assert_eq!(meta.canonical_url, None);
    }

    #[test]
    fn duration_label_from_seconds() {
        let meta = VideoMetadata::from(AnalyzeResponse { success: true, duration: Some(3725), ..Default::default() });
        assert_eq!(meta.duration_label, "1:02:05");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(600), "10:00");
    }

    #[test]
    fn quality_menu_selectors() {
        let selectors: Vec<_> = QUALITY_OPTIONS.iter().map(|o| o.selector_value).collect();
        assert_eq!(selectors, ["best", "1080p", "720p", "480p", "360p", "audio"]);
    }

    #[test]
    fn snapshot_rounds_without_clamping() {
        let snapshot = ProgressSnapshot::from(ProgressResponse { status: JobStatus::Downloading, progress: 55.5, ..Default::default() });
        assert_eq!(snapshot.percent, 56);
        let snapshot = ProgressSnapshot::from(ProgressResponse { status: JobStatus::Downloading, progress: 120.4, ..Default::default() });
        assert_eq!(snapshot.percent, 120);
        let snapshot = ProgressSnapshot::from(ProgressResponse { status: JobStatus::Downloading, progress: -3.2, ..Default::default() });
        assert_eq!(snapshot.percent, -3);
    }
}
