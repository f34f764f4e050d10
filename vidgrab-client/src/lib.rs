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
//! Client-side job lifecycle for the VidGrab download server.
//!
//! The [`JobController`] owns everything the UI shows: the analyzed video, the active
//! download job and its latest progress report. Hosts plug in the network ([`Backend`]),
//! the scheduler ([`Runtime`]) and the save-to-disk primitive ([`FileSink`]), then render
//! the [`ViewState`] the controller publishes to its subscribers.

pub mod backend;
pub mod config;
pub mod constants;
pub mod controller;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod sink;
mod state;
pub mod view;

pub use backend::{Backend, HttpBackend};
pub use config::ClientConfig;
pub use controller::{JobController, SubscriptionId};
pub use model::{FormatOption, JobHandle, Phase, ProgressSnapshot, VideoMetadata, QUALITY_OPTIONS};
pub use runtime::Runtime;
#[cfg(any(test, feature = "tokio"))]
pub use runtime::TokioRuntime;
pub use sink::FileSink;
pub use view::{ProgressView, ViewState};
pub use vidgrab_api::JobStatus;
