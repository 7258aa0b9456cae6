use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

pub const BOOK_CATEGORIES: [&str; 30] = [
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Fantasy",
    "Romance",
    "Mystery",
    "Thriller",
    "Biography",
    "History",
    "Science",
    "Technology",
    "Philosophy",
    "Religion",
    "Self-Help",
    "Business",
    "Economics",
    "Politics",
    "Travel",
    "Cooking",
    "Art",
    "Music",
    "Sports",
    "Health",
    "Education",
    "Children",
    "Young Adult",
    "Poetry",
    "Drama",
    "Comics",
    "Other",
];

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookCategory(String);

impl BookCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }

    /// Accepts any spelling of a known category and stores the canonical one.
    pub fn try_new(category: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let category = category.into();
        let wanted = category.trim().to_lowercase();
        BOOK_CATEGORIES
            .iter()
            .find(|known| known.to_lowercase() == wanted)
            .map(|known| Self(known.to_string()))
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("Unknown category {category:?}"))
            })
    }

    /// Case-insensitive exact match.
    pub fn is(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

#[cfg(test)]
mod test {
    use super::BookCategory;

    #[test]
    fn normalizes_known_category() {
        let category = BookCategory::try_new("  science fiction ").unwrap();
        assert_eq!(category.as_ref(), "Science Fiction");
        assert!(category.is("SCIENCE FICTION"));
        assert!(!category.is("Science"));
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(BookCategory::try_new("Cookbooks").is_err());
        assert!(BookCategory::try_new("").is_err());
    }
}
