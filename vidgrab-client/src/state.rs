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

use futures::future::AbortHandle;

use crate::model::{JobHandle, Phase, ProgressSnapshot, VideoMetadata};

/// Mutable state of a [`JobController`](crate::JobController)
#[derive(Default)]
pub(crate) struct ControllerState {
    pub phase: Phase,
    /// An analyze or download-start request is in flight
    pub loading: bool,
    /// Trimmed URL of the last analyze call
    pub source_url: Option<Rc<str>>,
    pub metadata: Option<Rc<VideoMetadata>>,
    pub job: Option<JobHandle>,
    pub snapshot: Option<ProgressSnapshot>,
    pub error: Option<Rc<str>>,
    pub file_error: Option<Rc<str>>,
    pub poll_task: Option<AbortHandle>,
    /// Bumped whenever an action supersedes the one in flight
    pub epoch: u64,
}

impl ControllerState {
    /// URL a download should be started for: the canonical one if the server reported it
    pub fn download_url(&self) -> Option<Rc<str>> {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.canonical_url.as_deref())
            .map(Rc::from)
            .or_else(|| self.source_url.clone())
    }

    /// Returns whether a poll loop was running
    pub fn stop_polling(&mut self) -> bool {
        match self.poll_task.take() {
            Some(handle) => {
                handle.abort();
                true
            },
            None => false,
        }
    }

    /// Back to [`Phase::Idle`], invalidating anything still in flight
    pub fn clear(&mut self) {
        self.stop_polling();
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.loading = false;
        self.source_url = None;
        self.metadata = None;
        self.job = None;
        self.snapshot = None;
        self.error = None;
        self.file_error = None;
    }

    pub fn fail(&mut self, message: Rc<str>) {
        self.stop_polling();
        self.phase = Phase::Failed;
        self.loading = false;
        self.error = Some(message);
    }
}
