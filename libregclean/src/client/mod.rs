//! HTTP client for the Docker Registry HTTP API v2.
//!
//! This module provides a thin blocking client built on reqwest. Each call
//! blocks until the registry answers and nothing is retried. Mutating calls
//! honour the descriptor's dry-run flag.

use crate::digest::Digest;
use crate::error::{CleanError, Result};
use crate::logging::Logger;
use crate::manifest::Manifest;
use crate::model::{Catalog, Image};
use crate::policy::TagSource;
use crate::registry::Registry;
use reqwest::Method;
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;


/// Media type requested when resolving and deleting manifests.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Header carrying the manifest digest.
pub const CONTENT_DIGEST_HEADER: &str = "Docker-Content-Digest";

/// Status reported by a simulated delete (202 Accepted, as the registry
/// answers a real one).
pub const DRY_RUN_STATUS: u16 = 202;

/// Blocking client bound to one registry.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Connection descriptor
    registry: Registry,
    /// Base URL derived from the descriptor, e.g. "http://localhost:5000"
    base_url: String,
    /// Deadline applied to every request
    timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("registry", &self.registry)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for `registry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::client::Client;
    /// use libregclean::logging::NullLogger;
    /// use libregclean::registry::Registry;
    /// use std::sync::Arc;
    ///
    /// let registry = Registry::new("localhost", 5000, true);
    /// let client = Client::new(registry, Arc::new(NullLogger)).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:5000");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a validation error when the descriptor has no host or port,
    /// or a transport error if the HTTP client cannot be built.
    pub fn new(registry: Registry, logger: Arc<dyn Logger>) -> Result<Self> {
        registry.validate()?;

        let http_client = ReqwestClient::builder()
            .build()
            .map_err(|e| CleanError::transport_with_source("Failed to create HTTP client", e))?;

        let timeout = Duration::from_secs(registry.timeout_seconds());
        let base_url = registry.base_url();

        Ok(Self {
            http_client,
            registry,
            base_url,
            timeout,
            logger,
        })
    }

    /// Returns a copy of this client whose calls use `timeout` as deadline.
    ///
    /// ```no_run
    /// # use libregclean::client::Client;
    /// # use std::time::Duration;
    /// # fn example(client: &Client) -> libregclean::Result<()> {
    /// let catalog = client.with_timeout(Duration::from_secs(5)).fetch_catalog()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches the repository catalog from `/v2/_catalog`.
    ///
    /// A body that is not catalog JSON is logged and yields an empty
    /// catalog, so a confused registry results in no work rather than an
    /// aborted run.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the registry is unreachable and an HTTP
    /// error for non-success statuses.
    pub fn fetch_catalog(&self) -> Result<Catalog> {
        let url = format!("{}/v2/_catalog", self.base_url);
        let response = self.send(self.request(Method::GET, &url), &url)?;
        let response = Self::check_response_status(response)?;
        let body = Self::read_body(response, &url)?;

        match serde_json::from_slice::<Catalog>(&body) {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                self.logger.error(&format!(
                    "Failed to decode catalog from {}: {}; continuing with an empty catalog",
                    url, e
                ));
                Ok(Catalog::default())
            }
        }
    }

    /// Fetches every tag of `{group}/{repo_name}`.
    ///
    /// The group segment is left out of the URL when it is empty.
    pub fn fetch_tag_list(&self, group: &str, repo_name: &str) -> Result<Image> {
        let url = if group.is_empty() {
            format!("{}/v2/{}/tags/list", self.base_url, repo_name)
        } else {
            format!("{}/v2/{}/{}/tags/list", self.base_url, group, repo_name)
        };

        let response = self.send(self.request(Method::GET, &url), &url)?;
        let response = Self::check_response_status(response)?;
        let body = Self::read_body(response, &url)?;

        serde_json::from_slice(&body).map_err(|e| {
            CleanError::decode_with_source(format!("Failed to decode tag list from {}", url), e)
        })
    }

    /// Fetches the manifest of `image_name:tag` including its history.
    pub fn fetch_manifest(&self, image_name: &str, tag: &str) -> Result<Manifest> {
        let url = format!("{}/v2/{}/manifests/{}", self.base_url, image_name, tag);

        let response = self.send(self.request(Method::GET, &url), &url)?;
        let response = Self::check_response_status(response)?;
        let body = Self::read_body(response, &url)?;

        Manifest::from_bytes(&body)
    }

    /// Resolves the manifest digest of `image_name:tag` with a HEAD request.
    ///
    /// # Errors
    ///
    /// [`CleanError::DigestUnavailable`] when the status is not 200 or the
    /// `Docker-Content-Digest` header is missing or malformed.
    pub fn fetch_digest(&self, image_name: &str, tag: &str) -> Result<Digest> {
        let url = format!("{}/v2/{}/manifests/{}", self.base_url, image_name, tag);
        let request = self
            .request(Method::HEAD, &url)
            .header(reqwest::header::ACCEPT, MANIFEST_V2_MEDIA_TYPE);

        let response = self.send(request, &url)?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(CleanError::digest_unavailable(
                image_name,
                tag,
                format!("status {}", response.status().as_u16()),
            ));
        }

        let header = response
            .headers()
            .get(CONTENT_DIGEST_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                CleanError::digest_unavailable(
                    image_name,
                    tag,
                    format!("response missing {} header", CONTENT_DIGEST_HEADER),
                )
            })?;

        header.parse::<Digest>().map_err(|e| {
            CleanError::digest_unavailable(image_name, tag, format!("invalid digest: {}", e))
        })
    }

    /// Deletes the manifest `digest` of `image_name`.
    ///
    /// Returns the raw status code: a non-2xx answer is reported, not turned
    /// into an error. In dry-run mode nothing is sent or validated and
    /// [`DRY_RUN_STATUS`] is returned.
    ///
    /// # Errors
    ///
    /// A validation error for a malformed digest, a transport error when the
    /// request could not be completed. Neither occurs in dry-run mode.
    pub fn delete_tag(&self, image_name: &str, digest: &str) -> Result<u16> {
        if self.registry.dry_run() {
            self.logger.info(&format!(
                "[dry-run] would delete {}@{}",
                image_name, digest
            ));
            return Ok(DRY_RUN_STATUS);
        }

        let digest: Digest = digest.parse()?;

        let url = format!("{}/v2/{}/manifests/{}", self.base_url, image_name, digest);
        let request = self
            .request(Method::DELETE, &url)
            .header(reqwest::header::ACCEPT, MANIFEST_V2_MEDIA_TYPE);

        let response = self.send(request, &url).inspect_err(|e| {
            self.logger.error(&format!(
                "Cannot delete {}@{}: {}",
                image_name, digest, e
            ));
        })?;

        Ok(response.status().as_u16())
    }

    /// Starts a request with the deadline and credentials applied.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .http_client
            .request(method, url)
            .timeout(self.timeout);

        if let Some(auth_header) = self.registry.credentials().to_header_value() {
            request = request.header(reqwest::header::AUTHORIZATION, auth_header);
        }

        request
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        request
            .send()
            .map_err(|e| self.translate_reqwest_error(e, url))
    }

    fn read_body(response: Response, url: &str) -> Result<Vec<u8>> {
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| {
                CleanError::transport_with_source(format!("Failed to read response from {}", url), e)
            })
    }

    /// Translates a reqwest error into a CleanError.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> CleanError {
        if error.is_timeout() {
            CleanError::transport_with_source(
                format!(
                    "Request to {} timed out after {} seconds",
                    url,
                    self.timeout.as_secs()
                ),
                error,
            )
        } else if error.is_connect() {
            CleanError::transport_with_source(
                format!("Failed to connect to registry at {}", self.base_url),
                error,
            )
        } else {
            CleanError::transport_with_source(
                format!("Network error communicating with {}", url),
                error,
            )
        }
    }

    fn check_response_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(CleanError::http(status.as_u16(), response.url().as_str()))
        }
    }
}

impl TagSource for Client {
    fn manifest(&self, image_name: &str, tag: &str) -> Result<Manifest> {
        self.fetch_manifest(image_name, tag)
    }

    fn digest(&self, image_name: &str, tag: &str) -> Result<Digest> {
        self.fetch_digest(image_name, tag)
    }
}
