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

use vidgrab_client::messages::describe_error;
use yew::prelude::*;
use yew_hooks::{use_async_with_options, UseAsyncOptions};

use crate::constants::VERSION;
use crate::contexts::Controller;

#[function_component]
pub fn Header() -> Html {
    html! {
        <div id="header">
            <h1>{"VidGrab"}</h1>
            <span>{"Paste a link, pick a quality, get the file."}</span>
        </div>
    }
}

#[function_component]
pub fn Footer() -> Html {
    let controller: Controller = use_context().expect("Footer should be placed inside a Controller ContextProvider");
    let health = use_async_with_options(
        async move { controller.check_health().await.map_err(|e| describe_error(&e)) },
        UseAsyncOptions::enable_auto(),
    );

    let server_status = match (&health.data, &health.error) {
        (Some(status), _) => html! { <span>{format!("Server {}: {}", status.version, status.status)}</span> },
        (None, Some(err)) => html! { <span class="error" title={err.clone()}>{"Server unreachable"}</span> },
        (None, None) => html! { <span>{"Server: ..."}</span> },
    };

    html! {
        <div id="footer">
            {server_status}
            <span>
                {format!("VidGrab v{VERSION} © The VidGrab Contributors 2025, licensed under ")}
                <a href="https://www.gnu.org/licenses/agpl-3.0.en.html">{"AGPL v3"}</a>
            </span>
        </div>
    }
}
