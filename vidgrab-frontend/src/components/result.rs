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

use yew::platform::spawn_local;
use yew::prelude::*;

use crate::contexts::Controller;
use crate::utils::BrowserFileSink;

#[derive(Properties, PartialEq)]
pub struct CompletedBoxProps {
    pub filename: AttrValue,
    pub can_retrieve: bool,
    pub file_error: Option<Rc<str>>,
}

#[function_component]
pub fn CompletedBox(props: &CompletedBoxProps) -> Html {
    let controller: Controller = use_context().expect("CompletedBox should be placed inside a Controller ContextProvider");
    let save = Callback::from(move |_: MouseEvent| {
        let controller = controller.clone();
        spawn_local(async move {
            // failures end up in the view state
            let _ = controller.retrieve_file(&BrowserFileSink).await;
        });
    });

    html! {
        <div id="result" class="completed">
            <span>{"Download complete: "}<b>{props.filename.clone()}</b></span>
            <button onclick={save} disabled={!props.can_retrieve}>{"Save file"}</button>
            if let Some(ref error) = props.file_error {
                <span class="error">{error.to_string()}</span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBoxProps {
    pub message: Rc<str>,
}

#[function_component]
pub fn ErrorBox(props: &ErrorBoxProps) -> Html {
    let controller: Controller = use_context().expect("ErrorBox should be placed inside a Controller ContextProvider");
    let retry = Callback::from(move |_: MouseEvent| {
        controller.retry();
    });

    html! {
        <div id="result" class="failed">
            <span class="error">{props.message.to_string()}</span>
            <button onclick={retry}>{"Try again"}</button>
        </div>
    }
}
