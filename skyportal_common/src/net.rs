/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the synchronous HTTP seam. Network I/O on the device is blocking by nature, hence
//! everything above this layer only sees [`HttpGet`] and can be tested with in-memory clients

use std::{rc::Rc, sync::Arc, time::Duration};
use bytes::Bytes;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::header::{HeaderMap,HeaderName,HeaderValue};
use serde::de::DeserializeOwned;

use crate::define_error;

define_error!{ pub NetError =
    Io(#[from] std::io::Error) : "IO error: {0}",
    Transport(String) : "transport error: {0}",
    InvalidHeader(String) : "invalid header: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// what we get back from a GET request. Note that non-2xx status codes are not errors at this
/// level - it is up to the caller to classify them
#[derive(Debug,Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new (status: u16, body: impl Into<Bytes>)->Self { HttpResponse { status, body: body.into() } }

    pub fn is_success (&self)->bool { (200..300).contains( &self.status) }

    pub fn is_auth_failure (&self)->bool { self.status == 401 || self.status == 403 }

    /// a short, printable prefix of the body for error messages (error pages can be large HTML docs)
    pub fn body_excerpt (&self, max_len: usize)->String {
        let s = String::from_utf8_lossy( &self.body);
        s.chars().take( max_len).collect()
    }

    pub fn json<T: DeserializeOwned> (&self)->serde_json::Result<T> {
        serde_json::from_slice( &self.body)
    }
}

/// the transport collaborator: send a GET given a URL, headers and query parameters
pub trait HttpGet {
    fn get (&self, url: &str, headers: &[(&str,&str)], query: &[(&str,String)]) -> Result<HttpResponse>;
}

impl<T> HttpGet for &T where T: HttpGet + ?Sized {
    fn get (&self, url: &str, headers: &[(&str,&str)], query: &[(&str,String)]) -> Result<HttpResponse> {
        (**self).get( url, headers, query)
    }
}

impl<T> HttpGet for Rc<T> where T: HttpGet + ?Sized {
    fn get (&self, url: &str, headers: &[(&str,&str)], query: &[(&str,String)]) -> Result<HttpResponse> {
        (**self).get( url, headers, query)
    }
}

impl<T> HttpGet for Arc<T> where T: HttpGet + ?Sized {
    fn get (&self, url: &str, headers: &[(&str,&str)], query: &[(&str,String)]) -> Result<HttpResponse> {
        (**self).get( url, headers, query)
    }
}

const USER_AGENT: &str = concat!("skyportal/", env!("CARGO_PKG_VERSION"));

/// [`HttpGet`] implementation based on the blocking reqwest client. Timeouts are configured here,
/// callers cannot cancel a request once it is issued
#[derive(Debug,Clone)]
pub struct BlockingHttpClient {
    client: reqwest::blocking::Client,
}

impl BlockingHttpClient {
    pub fn new (timeout: Duration)->Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout( timeout)
            .user_agent( USER_AGENT)
            .build()
            .map_err(|e| NetError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok( BlockingHttpClient { client })
    }
}

impl HttpGet for BlockingHttpClient {
    fn get (&self, url: &str, headers: &[(&str,&str)], query: &[(&str,String)]) -> Result<HttpResponse> {
        let response = self.client.get( url)
            .headers( get_headermap( headers)?)
            .query( query)
            .send()
            .map_err(|e| NetError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| NetError::Transport(e.to_string()))?;
        Ok( HttpResponse { status, body })
    }
}

pub fn get_headermap (headers: &[(&str,&str)]) -> Result<HeaderMap> {
    let mut hm = HeaderMap::with_capacity( headers.len());
    for (k,v) in headers {
        hm.append(
            HeaderName::from_bytes( k.trim().as_bytes()).map_err(|e| NetError::InvalidHeader(e.to_string()))?,
            HeaderValue::from_str( v.trim()).map_err(|e| NetError::InvalidHeader(e.to_string()))?
        );
    }
    Ok(hm)
}

/// value for an `Authorization` header using HTTP basic auth
pub fn basic_auth_value (user: &str, password: &str)->String {
    format!("Basic {}", BASE64.encode( format!("{user}:{password}")))
}
