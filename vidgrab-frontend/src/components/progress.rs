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

use vidgrab_client::ProgressView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub progress: ProgressView,
}

#[function_component]
pub fn ProgressBar(props: &ProgressBarProps) -> Html {
    let progress = &props.progress;
    // the reported percentage is shown as-is, only the bar width is kept in bounds
    let width = format!("width: {}%", progress.percent.clamp(0, 100));

    html! {
        <div id="progress">
            <div class="progress-header">
                <b>{progress.status_label}</b>
                <span>{format!("{}%", progress.percent)}</span>
            </div>
            <div class="progress-track">
                <div class="progress-fill" style={width} />
            </div>
            <table class="progress-details">
                <tr><td>{"Speed:"}</td><td>{progress.speed.clone()}</td></tr>
                <tr><td>{"ETA:"}</td><td>{progress.eta.clone()}</td></tr>
            </table>
        </div>
    }
}
