//! HTTP client
//!
//! A thin bearer-token client over reqwest. There is deliberately no
//! retry loop, rate limiter, or extra timeout layer here: any non-2xx
//! status, transport error, or unreadable body is fatal to the calling
//! operation and surfaced as-is.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
