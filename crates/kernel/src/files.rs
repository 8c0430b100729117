//! Resolves `files`/`images` request paths to their on-disk contents.
//! File-system reading of user paths is treated as an external collaborator
//! elsewhere in this workspace's design; this module is that interface's
//! concrete (and only) implementation, kept intentionally thin.

use base64::Engine;

use crate::error::ToolError;

pub struct ResolvedFile {
    pub path: String,
    pub content: String,
}

pub struct ResolvedImage {
    pub path: String,
    pub mime_type: String,
    pub data_base64: String,
    pub bytes: u64,
}

/// Read every file in `paths` as UTF-8 text. A missing or unreadable file is
/// an internal error, not a client-facing one: the path came from a
/// continuation thread or an earlier successful call and its disappearance
/// is an environment fault, not a malformed request.
pub async fn read_files(paths: &[String]) -> Result<Vec<ResolvedFile>, ToolError> {
    let mut out = Vec::with_capacity(paths.len());

    for path in paths {
        let content = tokio::fs::read_to_string(path).await.map_err(|_| ToolError::InternalError)?;
        out.push(ResolvedFile { path: path.clone(), content });
    }

    Ok(out)
}

pub async fn read_images(paths: &[String]) -> Result<Vec<ResolvedImage>, ToolError> {
    let mut out = Vec::with_capacity(paths.len());

    for path in paths {
        let bytes = tokio::fs::read(path).await.map_err(|_| ToolError::InternalError)?;
        let mime_type = mime_type_for(path).ok_or_else(|| ToolError::InvalidRequest(format!("unsupported image format: {path}")))?;

        out.push(ResolvedImage {
            path: path.clone(),
            mime_type: mime_type.to_string(),
            data_base64: base64::engine::general_purpose::STANDARD.encode(&bytes),
            bytes: bytes.len() as u64,
        });
    }

    Ok(out)
}

fn mime_type_for(path: &str) -> Option<&'static str> {
    let ext = path.rsplit('.').next()?.to_ascii_lowercase();

    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
