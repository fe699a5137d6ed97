//! Slogan and PDF generation.
//!
//! PDF rendering happens on the backend. The client validates that it really
//! received a PDF and hands back the bytes; saving them is up to the caller.

use bytes::Bytes;
use leadforge_client::{endpoints, ApiRequest, AuthClient, ClientError, ClientResult};
use leadforge_core::{PdfRequest, SloganRequest, SloganResponse};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used when the backend does not suggest one.
pub const DEFAULT_PDF_FILENAME: &str = "lead-magnet.pdf";

/// A generated PDF held in memory.
#[derive(Clone)]
pub struct PdfDocument {
    bytes: Bytes,
    filename: String,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PdfDocument {
    /// Wrap raw PDF bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: DEFAULT_PDF_FILENAME.to_string(),
        }
    }

    /// Override the suggested file name.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// The PDF bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into the PDF bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Suggested file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the backend sent an empty body.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the PDF to disk.
    ///
    /// If `target` is an existing directory the suggested file name is
    /// appended. Returns the path written.
    pub async fn save(&self, target: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let target = target.as_ref();
        let path = if tokio::fs::metadata(target).await.map(|m| m.is_dir()).unwrap_or(false) {
            target.join(&self.filename)
        } else {
            target.to_path_buf()
        };
        tokio::fs::write(&path, &self.bytes).await?;
        info!(path = %path.display(), bytes = self.bytes.len(), "PDF saved");
        Ok(path)
    }
}

/// AI-backed generation endpoints.
#[derive(Debug, Clone)]
pub struct GenerationApi {
    client: AuthClient,
}

impl GenerationApi {
    /// Create the API on top of `client`.
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    /// `POST /api/generate-slogan/`
    pub async fn generate_slogan(&self, request: &SloganRequest) -> ClientResult<SloganResponse> {
        self.client.post_json(endpoints::GENERATE_SLOGAN, request).await
    }

    /// `POST /api/generate-pdf/`
    ///
    /// Fails with [`ClientError::ContentTypeMismatch`] unless the response is
    /// `application/pdf`.
    pub async fn generate_pdf(&self, request: &PdfRequest) -> ClientResult<PdfDocument> {
        request.validate()?;

        let api_request = ApiRequest::post(endpoints::GENERATE_PDF)
            .json(request)?
            .header(ACCEPT, HeaderValue::from_static("application/pdf"));
        let response = self.client.send(api_request).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_pdf(&content_type) {
            return Err(ClientError::ContentTypeMismatch {
                expected: mime::APPLICATION_PDF.to_string(),
                actual: content_type,
            });
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| DEFAULT_PDF_FILENAME.to_string());

        let bytes = response.bytes().await?;
        info!(
            lead_magnet_id = %request.lead_magnet_id,
            template_id = %request.template_id,
            bytes = bytes.len(),
            "PDF generated"
        );
        Ok(PdfDocument::new(bytes).with_filename(filename))
    }
}

fn is_pdf(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| m.essence_str() == mime::APPLICATION_PDF.essence_str())
        .unwrap_or(false)
}

/// Extract the file name from a `Content-Disposition` header, keeping only
/// the final path component. `filename*` (RFC 6266) wins over `filename`.
fn attachment_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;
    for param in disposition_params(header) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(unquote(value.trim())),
            "filename*" => extended = decode_ext_value(value.trim()),
            _ => {}
        }
    }

    let raw = extended.or(plain)?;
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    (!name.is_empty() && name != "." && name != "..").then(|| name.to_string())
}

/// Split on `;` outside quoted strings.
fn disposition_params(header: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in header.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&header[start..]);
    params
}

fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

/// `UTF-8'lang'percent-encoded`. Other charsets are ignored.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|s| s.into_owned())
}
