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

use cloneable_errors::{anyhow, ErrorContext, ResContext};
use vidgrab_client::FileSink;
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::js_sys::{Array, JsString, Uint8Array};
use web_sys::{window, Blob, HtmlAnchorElement, Url};

// stringifying js values
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = String)]
    pub fn make_jsstring(value: &JsValue) -> JsString;
}

pub fn js_error(context: &'static str) -> impl FnOnce(JsValue) -> ErrorContext {
    move |value| anyhow!("{context}: {}", String::from(make_jsstring(&value)))
}

/// Saves files through a temporary `<a download>` link to an object URL
pub struct BrowserFileSink;

impl FileSink for BrowserFileSink {
    async fn save(&self, filename: &str, contents: Vec<u8>) -> Result<(), ErrorContext> {
        let parts = Array::of1(&Uint8Array::from(contents.as_slice()));
        let blob = Blob::new_with_u8_array_sequence(&parts).map_err(js_error("Failed to create a Blob"))?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_error("Failed to create an object URL"))?;

        let document = window().and_then(|w| w.document()).context("document should exist")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a").map_err(js_error("Failed to create a link element"))?
            .dyn_into().map_err(|_| anyhow!("<a> should be an HtmlAnchorElement"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        // give the browser a moment to start the download before the URL goes away
        yew::platform::time::sleep(Duration::from_secs(1)).await;
        Url::revoke_object_url(&url).map_err(js_error("Failed to revoke the object URL"))
    }
}
