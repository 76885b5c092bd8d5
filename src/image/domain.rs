//! Core image domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, category::CategoryId};

/// Database identifier for an image.
pub type ImageId = i64;

/// A validated, non-empty generation prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt(String);

impl Prompt {
    /// Create a prompt.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyPrompt] if `prompt` is an
    /// empty string.
    pub fn new(prompt: &str) -> Result<Self, Error> {
        let prompt = prompt.trim();

        if prompt.is_empty() {
            Err(Error::EmptyPrompt)
        } else {
            Ok(Self(prompt.to_string()))
        }
    }

    /// Create a prompt without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(prompt: &str) -> Self {
        Self(prompt.to_string())
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Prompt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prompt::new(s)
    }
}

impl Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An AI-generated image in the gallery.
///
/// The binary asset lives on disk under the upload directory and is owned by
/// the [FileStore](crate::FileStore); the record only carries its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// The image's database ID. Immutable once assigned.
    pub id: ImageId,
    /// The storage-assigned file name under the upload directory.
    pub filename: String,
    /// The file name the image was uploaded with.
    pub original_name: String,
    /// The prompt that generated the image.
    pub prompt: Prompt,
    /// The category this image belongs to.
    pub category_id: CategoryId,
    /// How many times the image has been liked. Only ever increments.
    pub likes: i64,
    /// The URL path the asset is served from.
    pub file_path: String,
    /// The asset size in bytes.
    pub file_size: i64,
    /// When the image was uploaded. Set once at creation.
    pub upload_date: OffsetDateTime,
}

/// The fields needed to create an image record.
///
/// File metadata comes pre-staged from the upload collaborator; `likes` and
/// `upload_date` are assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    /// The storage-assigned file name under the upload directory.
    pub filename: String,
    /// The file name the image was uploaded with.
    pub original_name: String,
    /// The prompt that generated the image.
    pub prompt: Prompt,
    /// The category this image belongs to.
    pub category_id: CategoryId,
    /// The URL path the asset is served from.
    pub file_path: String,
    /// The asset size in bytes.
    pub file_size: i64,
}

#[cfg(test)]
mod prompt_tests {
    use crate::{Error, image::Prompt};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(Prompt::new(""), Err(Error::EmptyPrompt));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert_eq!(Prompt::new(" \n\t"), Err(Error::EmptyPrompt));
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let prompt = Prompt::new("  a cat in a hat  ").unwrap();

        assert_eq!(prompt.as_ref(), "a cat in a hat");
    }
}
