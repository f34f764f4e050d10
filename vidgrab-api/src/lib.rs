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
//! Request and response bodies of the VidGrab download server API.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub webpage_url: Option<String>,
    /// Video length in seconds
    pub duration: Option<u64>,
    pub duration_string: Option<String>,
    pub uploader: Option<String>,
    pub formats: Vec<ApiVideoFormat>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct ApiVideoFormat {
    pub format_id: String,
    pub ext: String,
    pub resolution: Option<String>,
    pub filesize: Option<u64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub quality_label: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct DownloadRequest {
    pub url: String,
    pub quality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_id: Option<String>,
    // always sent, the server treats null as "no trimming"
    #[serde(default)]
    pub start_time: Option<u64>,
    #[serde(default)]
    pub end_time: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct DownloadResponse {
    pub success: bool,
    pub job_id: Option<String>,
    pub error: Option<String>,
}

/// State of a server-side download job
///
/// Only [`JobStatus::Completed`] and [`JobStatus::Failed`] are terminal.
/// Any status string this client doesn't know about is read as [`JobStatus::Unknown`]
/// and treated like any other in-progress state.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    #[strum(serialize = "Queued")]
    Queued,
    #[strum(serialize = "Waiting")]
    Pending,
    #[strum(serialize = "Downloading")]
    Downloading,
    #[strum(serialize = "Processing")]
    Processing,
    #[strum(serialize = "Completed")]
    Completed,
    #[strum(serialize = "Failed")]
    Failed,
    #[serde(other)]
    #[strum(serialize = "Working")]
    Unknown,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct ProgressResponse {
    pub job_id: Option<String>,
    pub status: JobStatus,
    /// 0-100, not validated by the server
    pub progress: f64,
    pub speed: Option<String>,
    pub eta: Option<String>,
    pub filename: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned by the server together with a non-2xx status code
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_response_tolerates_missing_fields() {
        let resp: AnalyzeResponse = serde_json::from_str(r#"{"success": true, "title": "Big Buck Bunny"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.title.as_deref(), Some("Big Buck Bunny"));
        assert!(resp.formats.is_empty());
        assert_eq!(resp.duration_string, None);
    }

    #[test]
    fn analyze_failure_carries_error() {
        let resp: AnalyzeResponse = serde_json::from_str(r#"{"success": false, "error": "Unsupported URL", "formats": []}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Unsupported URL"));
    }

    #[test]
    fn analyze_formats_are_parsed() {
        let resp: AnalyzeResponse = serde_json::from_str(r#"{
            "success": true,
            "formats": [{"format_id": "137", "ext": "mp4", "resolution": "1920x1080", "filesize": 1048576, "quality_label": "1080p"}]
        }"#).unwrap();
        assert_eq!(resp.formats.len(), 1);
        assert_eq!(resp.formats[0].format_id, "137");
        assert_eq!(resp.formats[0].filesize, Some(1_048_576));
        assert_eq!(resp.formats[0].vcodec, None);
    }

    #[test]
    fn download_request_always_sends_trim_fields() {
        let req = DownloadRequest {
            url: "https://example.com/watch?v=1".into(),
            quality: "720p".into(),
            format_id: None,
            start_time: None,
            end_time: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["url"], "https://example.com/watch?v=1");
        assert_eq!(value["quality"], "720p");
        assert!(value["start_time"].is_null());
        assert!(value.as_object().unwrap().contains_key("end_time"));
        assert!(!value.as_object().unwrap().contains_key("format_id"));
    }

    #[test]
    fn job_status_known_values() {
        let statuses: Vec<JobStatus> = serde_json::from_str(r#"["queued", "pending", "downloading", "processing", "completed", "failed"]"#).unwrap();
        assert_eq!(statuses, [
            JobStatus::Queued,
            JobStatus::Pending,
            JobStatus::Downloading,
            JobStatus::Processing,
            JobStatus::Completed,
            JobStatus::Failed,
        ]);
        assert!(statuses.iter().filter(|s| s.is_terminal()).eq([&JobStatus::Completed, &JobStatus::Failed]));
    }

    #[test]
    fn job_status_unknown_value_is_in_progress() {
        let status: JobStatus = serde_json::from_str(r#""merging""#).unwrap();
        assert_eq!(status, JobStatus::Unknown);
        assert!(!status.is_terminal());
        assert_eq!(status.label(), "Working");
    }

    #[test]
    fn progress_response_defaults() {
        let resp: ProgressResponse = serde_json::from_str(r#"{"status": "completed", "filename": "x.mp4"}"#).unwrap();
        assert_eq!(resp.status, JobStatus::Completed);
        assert!(resp.progress.abs() < f64::EPSILON);
        assert_eq!(resp.filename.as_deref(), Some("x.mp4"));
    }
}
