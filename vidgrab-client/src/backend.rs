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

use cloneable_errors::{anyhow, bail, ErrorContext, ResContext};
use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use vidgrab_api::{AnalyzeRequest, AnalyzeResponse, DownloadRequest, DownloadResponse, ErrorDetail, HealthResponse, ProgressResponse};

use crate::{config::ClientConfig, constants::API_KEY_HEADER, model::JobHandle};

/// The server API as seen by the [`JobController`](crate::JobController)
///
/// Errors returned from these methods are transport or decoding failures.
/// Application-level failures (`success: false`) are regular responses.
#[allow(async_fn_in_trait)]  // the controller is single-threaded
pub trait Backend {
    async fn analyze(&self, url: &str) -> Result<AnalyzeResponse, ErrorContext>;
    async fn start_download(&self, request: &DownloadRequest) -> Result<DownloadResponse, ErrorContext>;
    async fn progress(&self, job: &JobHandle) -> Result<ProgressResponse, ErrorContext>;
    async fn fetch_file(&self, job: &JobHandle) -> Result<Vec<u8>, ErrorContext>;
    async fn health(&self) -> Result<HealthResponse, ErrorContext>;
}

impl<B: Backend> Backend for Rc<B> {
    async fn analyze(&self, url: &str) -> Result<AnalyzeResponse, ErrorContext> {
        (**self).analyze(url).await
    }
    async fn start_download(&self, request: &DownloadRequest) -> Result<DownloadResponse, ErrorContext> {
        (**self).start_download(request).await
    }
    async fn progress(&self, job: &JobHandle) -> Result<ProgressResponse, ErrorContext> {
        (**self).progress(job).await
    }
    async fn fetch_file(&self, job: &JobHandle) -> Result<Vec<u8>, ErrorContext> {
        (**self).fetch_file(job).await
    }
    async fn health(&self) -> Result<HealthResponse, ErrorContext> {
        (**self).health().await
    }
}

pub trait ReqwestUrlExt {
    #[allow(clippy::result_unit_err)]
    fn extend_segments<I>(&mut self, segments: I) -> Result<&mut Self, ()>
    where I: IntoIterator,
    I::Item: AsRef<str>;
    #[allow(clippy::result_unit_err)]
    fn join_segments<I>(&self, segments: I) -> Result<Self, ()>
    where I: IntoIterator,
    I::Item: AsRef<str>,
    Self: Sized;
}

impl ReqwestUrlExt for Url {
    fn extend_segments<I>(&mut self, segments: I) -> Result<&mut Self, ()>
        where I: IntoIterator,
        I::Item: AsRef<str>,
    {
        {
            // a trailing slash on the base would otherwise turn into an empty segment
            let mut path = self.path_segments_mut()?;
            path.pop_if_empty().extend(segments);
        }
        Ok(self)
    }
    fn join_segments<I>(&self, segments: I) -> Result<Self, ()>
        where I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.clone();
        url.extend_segments(segments)?;
        Ok(url)
    }
}

pub trait ReqwestResponseExt: Sized {
    #[allow(async_fn_in_trait)]  // this is for local use
    async fn check_status(self) -> Result<Self, ErrorContext>;
}

impl ReqwestResponseExt for reqwest::Response {
    async fn check_status(self) -> Result<Self, ErrorContext> {
        let status = self.status();
        if status.is_success() {
            Ok(self)
        } else {
            let body = self.text().await.with_context(|| format!("The server returned a '{status}' status code"))?;
            match serde_json::from_str::<ErrorDetail>(&body) {
                Ok(err) => bail!("The server returned a '{status}' status code: {}", err.detail),
                Err(..) => bail!("The server returned a '{status}' status code with the following body:\n{body}",),
            }
        }
    }
}

/// [`Backend`] talking to a real server over HTTP
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
    api_key: Option<Rc<str>>,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ErrorContext> {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ClientConfig) -> Result<Self, ErrorContext> {
        Ok(Self {
            client,
            base: config.base_url()?,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint<I>(&self, segments: I) -> Result<Url, ErrorContext>
    where I: IntoIterator,
    I::Item: AsRef<str>,
    {
        self.base.join_segments(segments).map_err(|()| anyhow!("Cannot append endpoint segments to '{}'", self.base))
    }

    /// The health check lives next to the API root, not under it
    fn health_url(&self) -> Result<Url, ErrorContext> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("Cannot build the health check URL from '{}'", self.base))?
            .pop_if_empty()
            .pop()
            .push("health");
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_key {
            Some(ref key) => request.header(API_KEY_HEADER, &**key),
            None => request,
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, ErrorContext> {
        self.authorize(self.client.get(url))
            .header("Accept", "application/json")
            .send().await.context("Failed to send the request")?
            .check_status().await?
            .json().await.context("Failed to deserialize response")
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, url: Url, body: &B) -> Result<R, ErrorContext> {
        self.authorize(self.client.post(url))
            .header("Accept", "application/json")
            .json(body)
            .send().await.context("Failed to send the request")?
            .check_status().await?
            .json().await.context("Failed to deserialize response")
    }
}

impl Backend for HttpBackend {
    async fn analyze(&self, url: &str) -> Result<AnalyzeResponse, ErrorContext> {
        let request = AnalyzeRequest { url: url.to_owned() };
        self.post_json(self.endpoint(["analyze"])?, &request).await
    }

    async fn start_download(&self, request: &DownloadRequest) -> Result<DownloadResponse, ErrorContext> {
        self.post_json(self.endpoint(["download"])?, request).await
    }

    async fn progress(&self, job: &JobHandle) -> Result<ProgressResponse, ErrorContext> {
        self.get_json(self.endpoint(["progress", job.as_str()])?).await
    }

    async fn fetch_file(&self, job: &JobHandle) -> Result<Vec<u8>, ErrorContext> {
        let bytes = self.authorize(self.client.get(self.endpoint(["file", job.as_str()])?))
            .send().await.context("Failed to send the request")?
            .check_status().await?
            .bytes().await.context("Failed to read the file contents")?;
        Ok(bytes.to_vec())
    }

    async fn health(&self) -> Result<HealthResponse, ErrorContext> {
        self.get_json(self.health_url()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(&ClientConfig { api_base_url: base.into(), ..Default::default() }).unwrap()
    }

    #[test]
    fn endpoints_are_appended_to_base() {
        let api = backend("https://dl.example.com/api/");
        assert_eq!(api.endpoint(["analyze"]).unwrap().as_str(), "https://dl.example.com/api/analyze");
        assert_eq!(api.endpoint(["progress", "3f2a"]).unwrap().as_str(), "https://dl.example.com/api/progress/3f2a");

        let api = backend("https://dl.example.com/api");
        assert_eq!(api.endpoint(["file", "3f2a"]).unwrap().as_str(), "https://dl.example.com/api/file/3f2a");

        let api = backend("http://localhost:8000/");
        assert_eq!(api.endpoint(["download"]).unwrap().as_str(), "http://localhost:8000/download");
    }

    #[test]
    fn job_ids_are_escaped() {
        let api = backend("https://dl.example.com/api/");
        assert_eq!(api.endpoint(["progress", "a/b c"]).unwrap().as_str(), "https://dl.example.com/api/progress/a%2Fb%20c");
    }

    #[test]
    fn health_sits_next_to_the_api_root() {
        let api = backend("https://h.example.com/svc/api/");
        assert_eq!(api.health_url().unwrap().as_str(), "https://h.example.com/svc/health");
        let api = backend("https://h.example.com/svc/api");
        assert_eq!(api.health_url().unwrap().as_str(), "https://h.example.com/svc/health");
        let api = backend("http://localhost:8000/");
        assert_eq!(api.health_url().unwrap().as_str(), "http://localhost:8000/health");
    }

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(http::Response::builder().status(status).body(body).unwrap())
    }

    #[tokio::test]
    async fn error_detail_is_extracted() {
        let err = response(404, r#"{"detail":"File not found"}"#).check_status().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("404"), "{message}");
        assert!(message.ends_with(": File not found"), "{message}");
    }

    #[tokio::test]
    async fn raw_body_is_the_fallback() {
        let err = response(502, "upstream went away").check_status().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("502"), "{message}");
        assert!(message.ends_with("upstream went away"), "{message}");
    }

    #[tokio::test]
    async fn success_passes_through() {
        let body = response(200, "{}").check_status().await.unwrap().text().await.unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn api_key_is_attached() {
        let api = HttpBackend::new(&ClientConfig { api_key: Some("s3cret".into()), ..Default::default() }).unwrap();
        let request = api.authorize(api.client.get("http://localhost:8000/api/analyze")).build().unwrap();
        assert_eq!(request.headers().get(API_KEY_HEADER).unwrap(), "s3cret");

        let api = HttpBackend::new(&ClientConfig::default()).unwrap();
        let request = api.authorize(api.client.get("http://localhost:8000/api/analyze")).build().unwrap();
        assert!(request.headers().get(API_KEY_HEADER).is_none());
    }
}
