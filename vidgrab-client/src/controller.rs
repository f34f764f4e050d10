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

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use cloneable_errors::{bail, ErrorContext};
use futures::{
    future::{AbortHandle, Abortable},
    FutureExt,
};
use log::{debug, info, warn};
use slab::Slab;
use vidgrab_api::{DownloadRequest, DownloadResponse, HealthResponse, JobStatus};

use crate::{
    backend::Backend,
    config::ClientConfig,
    constants::DEFAULT_FILENAME,
    messages::{self, describe_error},
    model::{JobHandle, Phase, ProgressSnapshot, VideoMetadata},
    runtime::Runtime,
    sink::FileSink,
    state::ControllerState,
    view::ViewState,
};

type Subscriber = Rc<dyn Fn(&ViewState)>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubscriptionId(usize);

struct Shared<B, R> {
    backend: B,
    runtime: R,
    poll_interval: Duration,
    state: RefCell<ControllerState>,
    subscribers: RefCell<Slab<Subscriber>>,
}

impl<B, R> Drop for Shared<B, R> {
    fn drop(&mut self) {
        self.state.get_mut().stop_polling();
    }
}

/// Drives one video through analyze, download and retrieval
///
/// This is a cheap handle, clones share the same state.
/// The state is never borrowed across an `.await` or while subscribers run,
/// so subscribers are free to read the controller or trigger further actions.
pub struct JobController<B, R> {
    shared: Rc<Shared<B, R>>,
}

impl<B, R> Clone for JobController<B, R> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<B, R> PartialEq for JobController<B, R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<B: Backend + 'static, R: Runtime> JobController<B, R> {
    pub fn new(backend: B, runtime: R, config: &ClientConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                backend,
                runtime,
                poll_interval: config.poll_interval(),
                state: RefCell::default(),
                subscribers: RefCell::new(Slab::with_capacity(2)),
            }),
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState::derive(&self.shared.state.borrow())
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    pub fn job(&self) -> Option<JobHandle> {
        self.shared.state.borrow().job.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.shared.state.borrow().poll_task.is_some()
    }

    /// Calls `callback` with a fresh [`ViewState`] after every state change
    pub fn subscribe(&self, callback: impl Fn(&ViewState) + 'static) -> SubscriptionId {
        SubscriptionId(self.shared.subscribers.borrow_mut().insert(Rc::new(callback)))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        if self.shared.subscribers.borrow_mut().try_remove(id.0).is_none() {
            warn!("Attempted to remove a non-existent subscription with id {}", id.0);
        }
    }

    fn notify(&self) {
        let view = self.view();
        let subscribers: Vec<Subscriber> = self.shared.subscribers.borrow().iter().map(|(_, s)| s.clone()).collect();
        for subscriber in subscribers {
            subscriber(&view);
        }
    }

    fn update<T>(&self, f: impl FnOnce(&mut ControllerState) -> T) -> T {
        let result = f(&mut self.shared.state.borrow_mut());
        self.notify();
        result
    }

    /// Applies `f` only if no other action superseded the one started at `epoch`
    fn update_if_current<T>(&self, epoch: u64, f: impl FnOnce(&mut ControllerState) -> T) -> Option<T> {
        let result = {
            let mut state = self.shared.state.borrow_mut();
            if state.epoch != epoch {
                debug!("Discarding a response for a superseded action (epoch {epoch}, now {})", state.epoch);
                return None;
            }
            f(&mut state)
        };
        self.notify();
        Some(result)
    }

    /// Fetches metadata for `url`, ending in [`Phase::Ready`] or [`Phase::Failed`]
    ///
    /// Callers should not trigger this again while [`ViewState::loading`] is set.
    pub async fn analyze(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            info!("Rejected an empty video URL");
            self.update(|state| {
                state.clear();
                state.fail(messages::EMPTY_URL.into());
            });
            return;
        }

        let url: Rc<str> = url.into();
        let epoch = self.update(|state| {
            state.clear();
            state.source_url = Some(url.clone());
            state.phase = Phase::Analyzing;
            state.loading = true;
            state.epoch
        });
        info!("Analyzing {url}");

        let result = self.shared.backend.analyze(&url).await;
        self.update_if_current(epoch, |state| match result {
            Ok(response) if response.success => {
                let metadata = VideoMetadata::from(response);
                info!("Analyzed '{}' by {}", metadata.title, metadata.uploader);
                state.metadata = Some(Rc::new(metadata));
                state.phase = Phase::Ready;
                state.loading = false;
            },
            Ok(response) => {
                let message = response.error.unwrap_or_else(|| messages::ANALYZE_FAILED.to_owned());
                info!("The server could not analyze {url}: {message}");
                state.fail(message.into());
            },
            Err(err) => {
                warn!("Analyze request for {url} failed: {}", describe_error(&err));
                state.fail(messages::connection_error(&err));
            },
        });
    }

    /// Starts a server-side download at the given quality selector and begins polling its progress
    ///
    /// Any poll loop of a previous download is stopped first.
    pub async fn start_download(&self, quality: &str) {
        let (epoch, request) = {
            let mut state = self.shared.state.borrow_mut();
            if matches!(state.phase, Phase::Idle | Phase::Analyzing) {
                warn!("Ignoring a download request in the {} phase", state.phase.label());
                return;
            }
            let Some(url) = state.download_url() else {
                warn!("Ignoring a download request without a video URL");
                return;
            };
            state.stop_polling();
            state.epoch += 1;
            state.job = None;
            state.snapshot = None;
            state.error = None;
            state.file_error = None;
            state.phase = Phase::Downloading;
            state.loading = true;
            (state.epoch, DownloadRequest {
                url: url.to_string(),
                quality: quality.to_owned(),
                format_id: None,
                start_time: None,
                end_time: None,
            })
        };
        self.notify();
        info!("Requesting a {quality} download of {}", request.url);

        let result = self.shared.backend.start_download(&request).await;
        let started = self.update_if_current(epoch, |state| {
            state.loading = false;
            match result {
                Ok(DownloadResponse { success: true, job_id: Some(job_id), .. }) if !job_id.is_empty() => {
                    info!("Download job {job_id} started");
                    state.job = Some(JobHandle::from(job_id));
                    true
                },
                Ok(response) => {
                    let message = response.error.unwrap_or_else(|| messages::DOWNLOAD_START_FAILED.to_owned());
                    info!("The server refused to start the download: {message}");
                    state.fail(message.into());
                    false
                },
                Err(err) => {
                    warn!("Download request failed: {}", describe_error(&err));
                    state.fail(messages::connection_error(&err));
                    false
                },
            }
        });
        if started == Some(true) {
            self.start_polling();
        }
    }

    fn start_polling(&self) {
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(poll_loop(Rc::downgrade(&self.shared), self.shared.poll_interval), registration);
        {
            let mut state = self.shared.state.borrow_mut();
            state.stop_polling();
            state.poll_task = Some(handle);
        }
        self.shared.runtime.spawn_local(task.map(|_| ()).boxed_local());
    }

    /// Cancels the poll loop, if one is running. Does not change the phase.
    pub fn stop_polling(&self) {
        if self.shared.state.borrow_mut().stop_polling() {
            debug!("Poll loop stopped");
        }
    }

    /// One poll tick. Returns whether the loop should keep going.
    async fn poll_progress(&self) -> bool {
        let (epoch, job) = {
            let state = self.shared.state.borrow();
            match state.job {
                Some(ref job) => (state.epoch, job.clone()),
                None => {
                    debug!("Poll tick without an active job");
                    return true;
                },
            }
        };

        let response = match self.shared.backend.progress(&job).await {
            Ok(response) => response,
            Err(err) => {
                // a single dropped poll must not abort a healthy download
                warn!("Progress poll for job {job} failed: {}", describe_error(&err));
                return true;
            },
        };

        let keep_polling = self.update_if_current(epoch, |state| {
            let snapshot = ProgressSnapshot::from(response);
            let keep_polling = !snapshot.status.is_terminal();
            match snapshot.status {
                JobStatus::Completed => {
                    info!("Download job {job} completed");
                    state.stop_polling();
                    state.phase = Phase::Completed;
                },
                JobStatus::Failed => {
                    let message = snapshot.error_message.clone().unwrap_or_else(|| messages::DOWNLOAD_FAILED.to_owned());
                    info!("Download job {job} failed: {message}");
                    state.fail(message.into());
                },
                _ => (),
            }
            state.snapshot = Some(snapshot);
            keep_polling
        });
        keep_polling.unwrap_or(false)
    }

    /// Fetches the finished file and hands it to `sink`
    ///
    /// Failures are reported in [`ViewState::file_error`] and leave the phase at [`Phase::Completed`].
    pub async fn retrieve_file<S: FileSink>(&self, sink: &S) -> Result<(), ErrorContext> {
        let (epoch, job, filename) = {
            let state = self.shared.state.borrow();
            let (Phase::Completed, Some(job)) = (state.phase, state.job.clone()) else {
                bail!("There is no completed download to retrieve");
            };
            let filename = state.snapshot.as_ref()
                .and_then(|s| s.filename.clone())
                .unwrap_or_else(|| DEFAULT_FILENAME.to_owned());
            (state.epoch, job, filename)
        };

        let result = match self.shared.backend.fetch_file(&job).await {
            Ok(contents) => sink.save(&filename, contents).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                info!("Saved job {job} as {filename}");
                self.update_if_current(epoch, |state| state.file_error = None);
                Ok(())
            },
            Err(err) => {
                warn!("Retrieving the file of job {job} failed: {}", describe_error(&err));
                let message = messages::file_fetch_error(&err);
                self.update_if_current(epoch, |state| state.file_error = Some(message));
                Err(err)
            },
        }
    }

    /// Stops polling and forgets everything, from any phase
    pub fn reset(&self) {
        self.update(ControllerState::clear);
        info!("Controller reset");
    }

    /// Same as [`Self::reset`], but only leaves [`Phase::Failed`]. Returns whether it did.
    pub fn retry(&self) -> bool {
        if self.phase() != Phase::Failed {
            warn!("Ignoring a retry in the {} phase", self.phase().label());
            return false;
        }
        self.reset();
        true
    }

    /// Asks the server whether it's up. Does not touch the controller state.
    pub async fn check_health(&self) -> Result<HealthResponse, ErrorContext> {
        self.shared.backend.health().await
    }

    /// Resets the controller and drops all subscribers
    pub fn dispose(self) {
        self.reset();
        self.shared.subscribers.borrow_mut().clear();
    }
}

async fn poll_loop<B: Backend + 'static, R: Runtime>(shared: Weak<Shared<B, R>>, interval: Duration) {
    loop {
        let sleep = match shared.upgrade() {
            Some(shared) => shared.runtime.sleep(interval),
            None => return,
        };
        sleep.await;
        let Some(shared) = shared.upgrade() else { return };
        if !(JobController { shared }).poll_progress().await {
            return;
        }
    }
}
