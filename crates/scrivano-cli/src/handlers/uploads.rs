#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;

use reqwest::multipart::{Form, Part};
use scrivano_api_types::UploadResponse;

use crate::client::{CliError, Ctx};
use crate::print;

pub async fn upload(ctx: &Ctx, file: &Path) -> Result<(), CliError> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|source| CliError::InputFile {
            path: file.display().to_string(),
            source,
        })?;
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let part = Part::bytes(bytes).file_name(filename);
    let form = Form::new().part("file", part);

    let url = ctx.url("api/upload")?;
    let resp = ctx.client.post(url).multipart(form).send().await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;
    if !status.is_success() {
        let text = String::from_utf8_lossy(&bytes).into_owned();
        return Err(CliError::Server(format!("status {status} body {text}")));
    }

    let hosted: UploadResponse = serde_json::from_slice(&bytes)
        .map_err(|e| CliError::Server(format!("failed to parse body: {e}")))?;
    print::print_json(&hosted)
}
