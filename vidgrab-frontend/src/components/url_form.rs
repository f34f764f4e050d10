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

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::contexts::Controller;

#[derive(Properties, PartialEq)]
pub struct UrlFormProps {
    pub loading: bool,
    /// Whether there's anything to clear
    pub resettable: bool,
}

#[function_component]
pub fn UrlForm(props: &UrlFormProps) -> Html {
    let controller: Controller = use_context().expect("UrlForm should be placed inside a Controller ContextProvider");
    let url = use_state(String::new);

    let analyze = {
        let controller = controller.clone();
        let url = url.clone();
        Callback::from(move |()| {
            let controller = controller.clone();
            let url = (*url).clone();
            spawn_local(async move { controller.analyze(&url).await });
        })
    };
    let oninput = {
        let url = url.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            url.set(input.value());
        })
    };
    let onkeydown = {
        let analyze = analyze.clone();
        let loading = props.loading;
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !loading {
                analyze.emit(());
            }
        })
    };
    let onclick = analyze.reform(|_: MouseEvent| ());
    let reset = {
        let url = url.clone();
        Callback::from(move |_: MouseEvent| {
            url.set(String::new());
            controller.reset();
        })
    };

    html! {
        <div id="url-form">
            <label for="url-input">{"Video URL"}</label>
            <input id="url-input" placeholder="https://..." value={(*url).clone()} {oninput} {onkeydown} disabled={props.loading} />
            <button {onclick} disabled={props.loading}>
                if props.loading { {"Analyzing..."} } else { {"Analyze"} }
            </button>
            if props.resettable {
                <button class="secondary" onclick={reset}>{"New video"}</button>
            }
        </div>
    }
}
