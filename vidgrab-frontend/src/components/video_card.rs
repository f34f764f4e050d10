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

use vidgrab_client::{FormatOption, VideoMetadata};
use web_sys::HtmlSelectElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::contexts::Controller;

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub metadata: Rc<VideoMetadata>,
    pub quality_options: &'static [FormatOption],
    pub can_download: bool,
}

#[function_component]
pub fn VideoCard(props: &VideoCardProps) -> Html {
    let controller: Controller = use_context().expect("VideoCard should be placed inside a Controller ContextProvider");
    let quality = use_state(|| props.quality_options.first().map_or("best", |o| o.selector_value));

    let onchange = {
        let quality = quality.clone();
        let options = props.quality_options;
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            if let Some(option) = options.iter().find(|o| o.selector_value == value) {
                quality.set(option.selector_value);
            }
        })
    };
    let download = {
        let quality = *quality;
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move { controller.start_download(quality).await });
        })
    };

    let meta = &props.metadata;
    html! {
        <div id="video-card">
            if let Some(ref thumbnail) = meta.thumbnail_url {
                <img class="thumbnail" src={thumbnail.clone()} alt="Video thumbnail" />
            }
            <div class="video-details">
                if let Some(ref url) = meta.canonical_url {
                    <h2><a href={url.clone()} target="_blank">{meta.title.clone()}</a></h2>
                } else {
                    <h2>{meta.title.clone()}</h2>
                }
                <span class="uploader">{meta.uploader.clone()}</span>
                <span class="duration">{meta.duration_label.clone()}</span>
            </div>
            <div class="download-controls">
                <label for="quality-select">{"Quality"}</label>
                <select id="quality-select" {onchange}>
                    { for props.quality_options.iter().map(|option| html! {
                        <option value={option.selector_value} selected={option.selector_value == *quality}>{option.quality_label}</option>
                    }) }
                </select>
                <button onclick={download} disabled={!props.can_download}>{"Download"}</button>
            </div>
        </div>
    }
}
