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
use vidgrab_client::Runtime;

/// [`Runtime`] on top of yew's platform executor
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct YewRuntime;

impl Runtime for YewRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        yew::platform::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(yew::platform::time::sleep(duration))
    }
}
