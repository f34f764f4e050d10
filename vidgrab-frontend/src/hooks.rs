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

use vidgrab_client::ViewState;
use yew::prelude::*;

use crate::contexts::Controller;

/// Returns the controller from context and re-renders on every state change
#[hook]
pub fn use_job() -> (Controller, ViewState) {
    let controller: Controller = use_context().expect("use_job should be called inside a Controller ContextProvider");
    let view = use_state_eq(|| controller.view());
    {
        let view = view.clone();
        use_effect_with(controller.clone(), move |controller| {
            view.set(controller.view());
            let id = controller.subscribe(move |new| view.set(new.clone()));
            let controller = controller.clone();
            move || controller.unsubscribe(id)
        });
    }
    let state = (*view).clone();
    (controller, state)
}
