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

use vidgrab_client::{constants::DEFAULT_FILENAME, messages::DOWNLOAD_FAILED, Phase};
use yew::prelude::*;

use crate::components::{
    progress::ProgressBar,
    result::{CompletedBox, ErrorBox},
    url_form::UrlForm,
    video_card::VideoCard,
};
use crate::hooks::use_job;

#[function_component]
pub fn JobPanel() -> Html {
    let (_, view) = use_job();

    html! {
        <div id="job-panel" data-phase={view.phase.label()}>
            <UrlForm loading={view.loading} resettable={view.phase != Phase::Idle} />
            if let Some(ref metadata) = view.metadata {
                <VideoCard metadata={metadata.clone()} quality_options={view.quality_options} can_download={view.can_download} />
            }
            if let Some(ref progress) = view.progress {
                <ProgressBar progress={progress.clone()} />
            }
            if view.phase == Phase::Completed {
                <CompletedBox
                    filename={AttrValue::from(view.filename.clone().unwrap_or_else(|| DEFAULT_FILENAME.to_owned()))}
                    can_retrieve={view.can_retrieve}
                    file_error={view.file_error.clone()}
                />
            }
            if view.phase == Phase::Failed {
                <ErrorBox message={view.error.clone().unwrap_or_else(|| DOWNLOAD_FAILED.into())} />
            }
        </div>
    }
}
