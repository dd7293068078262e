use crate::error::AppError;
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use std::io::{Read, Write};
use std::time::Duration;

/// Read size used when streaming downloads to disk.
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;

pub fn build_client(
    service: &str,
    timeout_secs: u64,
    headers: HeaderMap,
) -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|err| AppError::request_error(service, format!("Client build error: {err}")))
}

pub fn http_error(service: &str, timeout_secs: u64, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::request_error(service, format!("timed out after {timeout_secs}s: {err}"))
    } else {
        AppError::request_error(service, format!("HTTP error: {err}"))
    }
}

pub fn ensure_success(service: &str, response: Response) -> Result<Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().unwrap_or_else(|_| "<failed to read error body>".to_string());
    Err(AppError::request_error(
        service,
        format!("HTTP request failed with status {status}: {body}"),
    ))
}

pub fn fetch_text(client: &Client, url: &str, timeout_secs: u64) -> Result<String, AppError> {
    let response = client.get(url).send().map_err(|err| http_error(url, timeout_secs, err))?;
    let response = ensure_success(url, response)?;
    response.text().map_err(|err| http_error(url, timeout_secs, err))
}

pub fn fetch_bytes(client: &Client, url: &str, timeout_secs: u64) -> Result<Vec<u8>, AppError> {
    let response = client.get(url).send().map_err(|err| http_error(url, timeout_secs, err))?;
    let response = ensure_success(url, response)?;
    let bytes = response.bytes().map_err(|err| http_error(url, timeout_secs, err))?;
    Ok(bytes.to_vec())
}

/// Stream `url` into `sink` in fixed-size chunks, returning the number of bytes written.
pub fn download_to<W: Write>(
    client: &Client,
    url: &str,
    timeout_secs: u64,
    sink: &mut W,
) -> Result<u64, AppError> {
    let response = client.get(url).send().map_err(|err| http_error(url, timeout_secs, err))?;
    let mut response = ensure_success(url, response)?;

    let mut buffer = [0u8; DOWNLOAD_CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let read = response.read(&mut buffer).map_err(|err| {
            AppError::request_error(url, format!("Failed while reading download: {err}"))
        })?;
        if read == 0 {
            break;
        }
        sink.write_all(&buffer[..read])?;
        written += read as u64;
    }
    sink.flush()?;
    Ok(written)
}

/// Keep at most `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
