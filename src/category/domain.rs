//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Database identifier for a category.
pub type CategoryId = i64;

/// A validated, non-empty category display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an
    /// empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the non-empty invariant is violated it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A URL-safe, lowercase category identifier used for lookup and routing.
///
/// Slugs are immutable after creation and unique across categories. Lookup is
/// exact-match and case-sensitive, which the validation guarantees trivially
/// since only lowercase characters are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Create a category slug.
    ///
    /// A valid slug is non-empty and consists of lowercase ASCII letters,
    /// digits and hyphens.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidSlug] if `slug` is empty or
    /// contains any other character.
    pub fn new(slug: &str) -> Result<Self, Error> {
        let slug = slug.trim();

        let is_valid = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if is_valid {
            Ok(Self(slug.to_string()))
        } else {
            Err(Error::InvalidSlug(slug.to_string()))
        }
    }

    /// Create a category slug without validation.
    ///
    /// The caller should ensure the string is a valid slug.
    pub fn new_unchecked(slug: &str) -> Self {
        Self(slug.to_string())
    }
}

impl AsRef<str> for CategorySlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategorySlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategorySlug::new(s)
    }
}

impl Display for CategorySlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image category (e.g., 'Photography', 'Abstract').
///
/// `image_count` is derived data: it always equals the number of images
/// referencing this category between mutations. It is maintained
/// incrementally by the image mutation functions rather than recomputed per
/// read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// The category's database ID. Immutable once assigned.
    pub id: CategoryId,
    /// The display name shown in the UI.
    pub name: CategoryName,
    /// The URL-safe identifier used for gallery filtering.
    pub slug: CategorySlug,
    /// The number of images currently in this category.
    pub image_count: i64,
}

impl Category {
    /// The synthetic category that images with a dangling `category_id` are
    /// joined to in gallery listings, so broken references degrade visibly
    /// instead of hiding the image.
    pub fn unknown() -> Self {
        Self {
            id: 0,
            name: CategoryName::new_unchecked("Unknown"),
            slug: CategorySlug::new_unchecked("unknown"),
            image_count: 0,
        }
    }
}

/// Form data for category creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    pub slug: String,
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        let name = CategoryName::new("");

        assert_eq!(name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let name = CategoryName::new("\n\t \r");

        assert_eq!(name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let name = CategoryName::new("Digital Art");

        assert!(name.is_ok())
    }
}

#[cfg(test)]
mod category_slug_tests {
    use crate::{Error, category::CategorySlug};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(
            CategorySlug::new(""),
            Err(Error::InvalidSlug("".to_string()))
        );
    }

    #[test]
    fn new_fails_on_uppercase() {
        assert_eq!(
            CategorySlug::new("Photography"),
            Err(Error::InvalidSlug("Photography".to_string()))
        );
    }

    #[test]
    fn new_fails_on_spaces() {
        assert_eq!(
            CategorySlug::new("digital art"),
            Err(Error::InvalidSlug("digital art".to_string()))
        );
    }

    #[test]
    fn new_succeeds_on_lowercase_with_hyphens_and_digits() {
        let slug = CategorySlug::new("sci-fi-2077");

        assert!(slug.is_ok());
    }
}
