use std::path::PathBuf;

use error_stack::ResultExt;
use serde::Deserialize;
use time::macros::datetime;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{
    Book, BookAuthor, BookCategory, BookId, BookTitle, BorrowedBooks, Isbn, NewBook, User,
    UserEmail, UserId, UserName, UserRole,
};
use kernel::KernelError;

use crate::database::MemoryState;
use crate::env;
use crate::error::{ConvertError, DriverError};

const SEED_KEY: &str = "LIBRARY_SEED";

/// Initial contents of the memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// The five demo books and three demo users.
    Sample,
    Empty,
    /// JSON file of books (oldest first) and users.
    File(PathBuf),
}

impl Seed {
    /// `sample` (also the default), `empty`, or a path to a seed file.
    pub fn from_env() -> Result<Self, DriverError> {
        let seed = match env(SEED_KEY)?.as_deref() {
            None | Some("sample") => Seed::Sample,
            Some("empty") => Seed::Empty,
            Some(path) => Seed::File(PathBuf::from(path)),
        };
        Ok(seed)
    }

    pub fn load(&self) -> error_stack::Result<MemoryState, KernelError> {
        match self {
            Seed::Sample => sample().into_state(),
            Seed::Empty => Ok(MemoryState::default()),
            Seed::File(path) => {
                let raw = std::fs::read_to_string(path)
                    .convert_error()
                    .attach_printable_lazy(|| format!("Failed to read {}", path.display()))?;
                let file: SeedFile = serde_json::from_str(&raw)
                    .convert_error()
                    .attach_printable_lazy(|| format!("Malformed seed file {}", path.display()))?;
                file.into_state()
                    .attach_printable_lazy(|| format!("Invalid entry in {}", path.display()))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SeedFile {
    #[serde(default)]
    books: Vec<SeedBook>,
    #[serde(default)]
    users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize)]
struct SeedBook {
    title: String,
    author: String,
    isbn: String,
    category: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
struct SeedUser {
    name: String,
    email: String,
    #[serde(default)]
    role: UserRole,
}

impl SeedFile {
    fn into_state(self) -> error_stack::Result<MemoryState, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut books = self
            .books
            .into_iter()
            .map(|book| book.into_book(now))
            .collect::<error_stack::Result<Vec<_>, _>>()?;
        books.reverse();
        let users = self
            .users
            .into_iter()
            .map(SeedUser::into_user)
            .collect::<error_stack::Result<Vec<_>, _>>()?;
        Ok(MemoryState { books, users })
    }
}

impl SeedBook {
    fn into_book(self, now: OffsetDateTime) -> error_stack::Result<Book, KernelError> {
        let draft = NewBook::new(
            BookTitle::try_new(self.title)?,
            BookAuthor::try_new(self.author)?,
            Isbn::try_new(self.isbn)?,
            BookCategory::try_new(self.category)?,
        );
        Ok(Book::create(
            BookId::new(Uuid::new_v4()),
            draft,
            self.created_at.unwrap_or(now),
        ))
    }
}

impl SeedUser {
    fn into_user(self) -> error_stack::Result<User, KernelError> {
        Ok(User::new(
            UserId::new(Uuid::new_v4()),
            UserName::try_new(self.name)?,
            UserEmail::try_new(self.email)?,
            self.role,
            BorrowedBooks::default(),
        ))
    }
}

fn sample() -> SeedFile {
    let book = |title: &str, author: &str, isbn: &str, category: &str, at| SeedBook {
        title: title.into(),
        author: author.into(),
        isbn: isbn.into(),
        category: category.into(),
        created_at: Some(at),
    };
    let user = |name: &str, email: &str, role| SeedUser {
        name: name.into(),
        email: email.into(),
        role,
    };
    SeedFile {
        books: vec![
            book(
                "The Great Gatsby",
                "F. Scott Fitzgerald",
                "978-0743273565",
                "Fiction",
                datetime!(2024-01-01 0:00 UTC),
            ),
            book(
                "To Kill a Mockingbird",
                "Harper Lee",
                "978-0446310789",
                "Fiction",
                datetime!(2024-01-02 0:00 UTC),
            ),
            book(
                "1984",
                "George Orwell",
                "978-0451524935",
                "Science Fiction",
                datetime!(2024-01-03 0:00 UTC),
            ),
            book(
                "Pride and Prejudice",
                "Jane Austen",
                "978-0141439518",
                "Romance",
                datetime!(2024-01-04 0:00 UTC),
            ),
            book(
                "The Hobbit",
                "J.R.R. Tolkien",
                "978-0547928241",
                "Fantasy",
                datetime!(2024-01-05 0:00 UTC),
            ),
        ],
        users: vec![
            user("Admin User", "admin@library.com", UserRole::Admin),
            user("John Doe", "john@example.com", UserRole::User),
            user("Jane Smith", "jane@example.com", UserRole::User),
        ],
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use uuid::Uuid;

    use kernel::KernelError;

    use crate::database::Seed;

    fn write_seed(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("library-seed-{}.json", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn sample_is_newest_first() {
        let state = Seed::Sample.load().unwrap();
        let titles = state
            .books
            .iter()
            .map(|book| book.title().as_ref().as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            titles,
            [
                "The Hobbit",
                "Pride and Prejudice",
                "1984",
                "To Kill a Mockingbird",
                "The Great Gatsby"
            ]
        );
        assert!(state.books.iter().all(|book| *book.is_available().as_ref()));
        assert_eq!(state.users.len(), 3);
        assert_eq!(
            state.users.iter().filter(|user| user.role().is_admin()).count(),
            1
        );
    }

    #[test]
    fn empty_has_nothing() {
        let state = Seed::Empty.load().unwrap();
        assert!(state.books.is_empty());
        assert!(state.users.is_empty());
    }

    #[test]
    fn file_is_validated_and_normalized() {
        let path = write_seed(
            r#"{
                "books": [
                    {"title": " Dune ", "author": "Frank Herbert", "isbn": "978-0441013593", "category": "science fiction", "created_at": "2023-05-01T00:00:00Z"},
                    {"title": "Emma", "author": "Jane Austen", "isbn": "978-0141439587", "category": "Romance"}
                ],
                "users": [{"name": "Reader", "email": "reader@example.com"}]
            }"#,
        );
        let state = Seed::File(path.clone()).load().unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(state.books.len(), 2);
        assert_eq!(state.books[0].title().as_ref(), "Emma");
        assert_eq!(state.books[1].title().as_ref(), "Dune");
        assert_eq!(state.books[1].category().as_ref(), "Science Fiction");
        assert!(!state.users[0].role().is_admin());
    }

    #[test]
    fn bad_files_are_reported() {
        let path = write_seed(
            r#"{"books": [{"title": "Dune", "author": "Frank Herbert", "isbn": "978-0441013593", "category": "Cookbooks"}]}"#,
        );
        let report = Seed::File(path.clone()).load().unwrap_err();
        std::fs::remove_file(path).unwrap();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let path = write_seed("not json");
        let report = Seed::File(path.clone()).load().unwrap_err();
        std::fs::remove_file(path).unwrap();
        assert_eq!(report.current_context(), &KernelError::Internal);

        let missing = std::env::temp_dir().join(format!("missing-{}.json", Uuid::new_v4()));
        let report = Seed::File(missing).load().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
