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

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// The scheduler a [`JobController`](crate::JobController) runs its poll loop on
///
/// Everything runs on one thread: tasks are spawned locally and never need to be `Send`.
pub trait Runtime: 'static {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// [`Runtime`] backed by tokio
///
/// Tasks are spawned with [`tokio::task::spawn_local`], so the controller must be driven
/// from inside a [`tokio::task::LocalSet`].
#[cfg(any(test, feature = "tokio"))]
#[derive(Clone, Copy, Default, Debug)]
pub struct TokioRuntime;

#[cfg(any(test, feature = "tokio"))]
impl Runtime for TokioRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
