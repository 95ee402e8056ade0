use actix_multipart::Field;
use actix_multipart::Multipart;
use futures::TryStreamExt;
use qd_database::Error;
use qd_database::Format;
use qd_database::Result;
use qd_database::Staged;

/// Decoded `/upload` form.
///
/// The file is streamed straight into a [`Staged`] temp file; text fields
/// are buffered.
#[derive(Debug, Default)]
pub struct Form {
    pub file: Option<Staged>,
    pub table_name: Option<String>,
    pub primary_key: Vec<String>,
}

impl Form {
    pub async fn read(mut payload: Multipart) -> Result<Self> {
        let mut form = Self::default();
        while let Some(field) = payload.try_next().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => form.file = Some(stage(field).await?),
                "table_name" => form.table_name = Some(text(field).await?),
                "primary_key" => form.primary_key.push(text(field).await?),
                other => log::debug!("ignoring form field {:?}", other),
            }
        }
        Ok(form)
    }
}

fn malformed(e: actix_multipart::MultipartError) -> Error {
    Error::validation(format!("malformed multipart payload: {}", e))
}

async fn stage(mut field: Field) -> Result<Staged> {
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();
    let mut staged = Staged::new(Format::try_from(filename.as_str())?)?;
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        staged.write(&chunk)?;
    }
    log::debug!("staged {} at {}", filename, staged.path().display());
    Ok(staged)
}

async fn text(mut field: Field) -> Result<String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes).map_err(|_| Error::validation("form fields must be UTF-8"))
}
