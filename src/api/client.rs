use std::time::Duration;

use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderValue},
};

use crate::prelude::*;

/// Build the portal HTTP client.
///
/// The default headers replicate what the portal frontend sends on every
/// request; the `Content-Type` is part of that fixed set even on GETs.
pub fn try_new(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers
        .insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.7,de-DE;q=0.3"));
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
    );
    headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
    headers.insert("priority", HeaderValue::from_static("u=0"));
    Client::builder()
        .user_agent("enerest")
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|error| Error::api("failed to build the HTTP client", error))
}
