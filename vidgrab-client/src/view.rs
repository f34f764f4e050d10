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

use std::rc::Rc;

use vidgrab_api::JobStatus;

use crate::{
    constants::DEFAULT_FILENAME,
    model::{FormatOption, Phase, ProgressSnapshot, VideoMetadata, QUALITY_OPTIONS},
    state::ControllerState,
};

/// Progress bar contents
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProgressView {
    pub status: JobStatus,
    pub status_label: &'static str,
    pub percent: i64,
    pub speed: String,
    pub eta: String,
}

impl From<&ProgressSnapshot> for ProgressView {
    fn from(value: &ProgressSnapshot) -> Self {
        Self {
            status: value.status,
            status_label: value.status.label(),
            percent: value.percent,
            speed: value.speed_label.clone().unwrap_or_else(|| "-".to_owned()),
            eta: value.eta_label.clone().unwrap_or_else(|| "-".to_owned()),
        }
    }
}

/// Everything a presentation layer needs, derived from the controller state
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewState {
    pub phase: Phase,
    /// Disable the triggers while this is set
    pub loading: bool,
    pub metadata: Option<Rc<VideoMetadata>>,
    pub quality_options: &'static [FormatOption],
    pub progress: Option<ProgressView>,
    /// Name the retrieved file will be saved under, once completed
    pub filename: Option<String>,
    pub error: Option<Rc<str>>,
    /// Failure of the last file retrieval
    pub file_error: Option<Rc<str>>,
    pub can_download: bool,
    pub can_retrieve: bool,
}

impl ViewState {
    pub(crate) fn derive(state: &ControllerState) -> Self {
        let completed = state.phase == Phase::Completed;
        Self {
            phase: state.phase,
            loading: state.loading,
            metadata: state.metadata.clone(),
            quality_options: QUALITY_OPTIONS,
            progress: state.snapshot.as_ref().map(ProgressView::from),
            filename: completed.then(|| {
                state.snapshot.as_ref()
                    .and_then(|s| s.filename.clone())
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_owned())
            }),
            error: state.error.clone(),
            file_error: state.file_error.clone(),
            can_download: !state.loading
                && matches!(state.phase, Phase::Ready | Phase::Completed | Phase::Failed)
                && state.download_url().is_some(),
            can_retrieve: completed && state.job.is_some(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::derive(&ControllerState::default())
    }
}

#[cfg(test)]
mod tests {
    use vidgrab_api::AnalyzeResponse;

    use super::*;
    use crate::model::JobHandle;

    fn ready_state() -> ControllerState {
        ControllerState {
            phase: Phase::Ready,
            source_url: Some("https://youtu.be/dQw4w9WgXcQ".into()),
            metadata: Some(Rc::new(VideoMetadata::from(AnalyzeResponse { success: true, ..Default::default() }))),
            ..Default::default()
        }
    }

    #[test]
    fn idle_view() {
        let view = ViewState::default();
        assert_eq!(view.phase, Phase::Idle);
        assert!(!view.loading);
        assert!(view.metadata.is_none());
        assert!(view.progress.is_none());
        assert!(!view.can_download);
        assert!(!view.can_retrieve);
        assert_eq!(view.quality_options.len(), 6);
    }

    #[test]
    fn ready_view_allows_download() {
        let view = ViewState::derive(&ready_state());
        assert!(view.can_download);
        assert!(view.metadata.is_some());

        let mut state = ready_state();
        state.loading = true;
        assert!(!ViewState::derive(&state).can_download);
    }

    #[test]
    fn progress_view_fills_missing_labels() {
        let mut state = ready_state();
        state.phase = Phase::Downloading;
        state.job = Some(JobHandle::from("job-1"));
        state.snapshot = Some(ProgressSnapshot {
            status: JobStatus::Downloading,
            percent: 42,
            speed_label: Some("1.2MiB/s".into()),
            eta_label: None,
            filename: None,
            error_message: None,
        });
        let view = ViewState::derive(&state);
        let progress = view.progress.unwrap();
        assert_eq!(progress.percent, 42);
        assert_eq!(progress.speed, "1.2MiB/s");
        assert_eq!(progress.eta, "-");
        assert_eq!(progress.status_label, "Downloading");
        assert!(!view.can_download);
        assert!(!view.can_retrieve);
        assert_eq!(view.filename, None);
    }

    #[test]
    fn completed_view_exposes_filename() {
        let mut state = ready_state();
        state.phase = Phase::Completed;
        state.job = Some(JobHandle::from("job-1"));
        state.snapshot = Some(ProgressSnapshot {
            status: JobStatus::Completed,
            percent: 100,
            speed_label: None,
            eta_label: None,
            filename: Some("x.mp4".into()),
            error_message: None,
        });
        let view = ViewState::derive(&state);
        assert!(view.can_retrieve);
        assert!(view.can_download);
        assert_eq!(view.filename.as_deref(), Some("x.mp4"));

        state.snapshot.as_mut().unwrap().filename = None;
        assert_eq!(ViewState::derive(&state).filename.as_deref(), Some("download"));
    }
}
