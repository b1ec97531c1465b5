// Image uploads
//
// Shop avatars/covers and product images go up as a multipart form with a
// single `file` part. Size and MIME type are checked before any bytes
// leave the process.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::error::Error;

/// Largest accepted image (5 MiB).
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Multipart field name the backend reads the file from.
pub const FILE_FIELD: &str = "file";

/// A validated image ready to upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read and validate an image from disk.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let size = std::fs::metadata(path)?.len();
        check_size(size)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidUpload {
                reason: format!("{} has no usable file name", path.display()),
            })?
            .to_owned();

        let bytes = std::fs::read(path)?;
        Self::from_bytes(file_name, bytes)
    }

    /// Validate in-memory bytes; the MIME type is guessed from `file_name`.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, Error> {
        let file_name = file_name.into();
        check_size(u64::try_from(bytes.len()).unwrap_or(u64::MAX))?;

        let mime = mime_guess::from_path(&file_name)
            .first()
            .ok_or_else(|| Error::InvalidUpload {
                reason: format!("cannot determine the type of {file_name}"),
            })?;

        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(Error::InvalidUpload {
                reason: format!("{file_name} is {mime}, expected an image/* file"),
            });
        }

        debug!(file_name = %file_name, %mime, size = bytes.len(), "image accepted for upload");
        Ok(Self {
            file_name,
            mime: mime.essence_str().to_owned(),
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Build the multipart form carrying this image.
    pub fn into_form(self) -> Result<Form, Error> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?;
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

fn check_size(size: u64) -> Result<(), Error> {
    if size > MAX_IMAGE_SIZE {
        return Err(Error::InvalidUpload {
            reason: format!("image is {size} bytes, the limit is {MAX_IMAGE_SIZE} bytes"),
        });
    }
    Ok(())
}
