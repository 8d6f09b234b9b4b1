use axum::extract::RawQuery;
use axum::http::header;
use axum::response::IntoResponse;
use regex::Regex;
use std::sync::OnceLock;

use crate::services::{rdap, vendor};

static QUERY_RE: OnceLock<Regex> = OnceLock::new();

fn query_re() -> &'static Regex {
    QUERY_RE.get_or_init(|| Regex::new(r"^(.+)=(.+)$").unwrap())
}

/// GET / — dispatch on the single key=value pair in the query string.
/// Every outcome is a 200 with a text/html body; failures inside the
/// resolvers come back as an empty body, never as an error status.
pub async fn lookup(RawQuery(query): RawQuery) -> impl IntoResponse {
    let body = match query {
        Some(q) => dispatch(&q).await,
        None => String::new(),
    };
    ([(header::CONTENT_TYPE, "text/html")], body)
}

/// Fallback for every other path.
pub async fn empty_ok() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html")], String::new())
}

async fn dispatch(query: &str) -> String {
    // The query string is matched raw and greedily, so a request carrying
    // several pairs collapses into one unrecognized key and an empty body.
    let Some(caps) = query_re().captures(query) else {
        return String::new();
    };
    let value = caps[2].to_string();
    match &caps[1] {
        "ip_addr" => rdap::netname(&value).await,
        "mac_addr" => vendor::mac_vendor(&value),
        _ => String::new(),
    }
}
