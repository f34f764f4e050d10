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

use cloneable_errors::{ErrorContext, ResContext};
use gloo_console::error;
use vidgrab_client::{messages::describe_error, HttpBackend};
use yew::prelude::*;

mod components;
mod constants;
mod contexts;
mod hooks;
mod runtime;
mod utils;

use components::{header_footer::{Footer, Header}, job_panel::JobPanel};
use contexts::Controller;
use runtime::YewRuntime;

fn create_controller() -> Result<Controller, ErrorContext> {
    let config = constants::client_config();
    let backend = HttpBackend::new(&config).context("Failed to set up the API client")?;
    Ok(Controller::new(backend, YewRuntime, &config))
}

#[function_component]
fn App() -> Html {
    let controller = use_memo((), |_| create_controller());

    match *controller {
        Err(ref err) => {
            let message = describe_error(err);
            error!(format!("VidGrab failed to start: {message}"));
            html! {
                <div id="fatal-error">
                    <h2>{"VidGrab failed to start"}</h2>
                    <pre>{message}</pre>
                </div>
            }
        },
        Ok(ref controller) => html! {
            <ContextProvider<Controller> context={controller.clone()}>
                <Header />
                <JobPanel />
                <Footer />
            </ContextProvider<Controller>>
        },
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("VidGrab v{} starting", constants::VERSION);
    yew::Renderer::<App>::new().render();
}
