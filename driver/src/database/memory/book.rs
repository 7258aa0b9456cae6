use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId, BookPatch, BorrowedAt, NewBook, UserId};
use kernel::KernelError;

use crate::database::{MemoryState, MemoryTransaction};

pub struct MemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn get_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(MemoryBookInternal::find(con, id).cloned())
    }

    async fn search(
        &self,
        con: &mut MemoryTransaction,
        query: &str,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let needle = query.to_lowercase();
        Ok(MemoryBookInternal::select(con, |book| {
            book.title().contains_lowercase(&needle)
                || book.author().contains_lowercase(&needle)
                || book.isbn().contains_lowercase(&needle)
        }))
    }

    async fn find_by_category(
        &self,
        con: &mut MemoryTransaction,
        category: &str,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(MemoryBookInternal::select(con, |book| {
            book.category().is(category)
        }))
    }

    async fn find_by_borrower(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(MemoryBookInternal::select(con, |book| {
            book.is_borrowed_by(user_id)
        }))
    }
}

#[async_trait::async_trait]
impl BookModifier for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        book: NewBook,
    ) -> error_stack::Result<Book, KernelError> {
        let book = Book::create(
            BookId::new(Uuid::new_v4()),
            book,
            OffsetDateTime::now_utc(),
        );
        con.books.insert(0, book.clone());
        debug!(id = %book.id(), "Created book");
        Ok(book)
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let updated = MemoryBookInternal::find_mut(con, book_id).map(|book| {
            book.apply(patch);
            book.clone()
        });
        Ok(updated)
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        let MemoryState { books, users } = &mut **con;
        let before = books.len();
        books.retain(|book| book.id() != book_id);
        if books.len() == before {
            return Ok(false);
        }
        users.iter_mut().for_each(|user| {
            user.release(book_id);
        });
        debug!(id = %book_id, "Deleted book");
        Ok(true)
    }

    async fn borrow(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
        user_id: &UserId,
        at: BorrowedAt,
    ) -> error_stack::Result<bool, KernelError> {
        let MemoryState { books, users } = &mut **con;
        let Some(book) = books.iter_mut().find(|book| book.id() == book_id) else {
            return Ok(false);
        };
        let Some(user) = users.iter_mut().find(|user| user.id() == user_id) else {
            return Ok(false);
        };
        if !*book.is_available().as_ref() {
            return Ok(false);
        }
        book.apply(BookPatch::borrow(user_id.clone(), at));
        user.hold(book_id.clone());
        debug!(book = %book_id, user = %user_id, "Borrowed book");
        Ok(true)
    }

    async fn return_book(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        let MemoryState { books, users } = &mut **con;
        let Some(book) = books.iter_mut().find(|book| book.id() == book_id) else {
            return Ok(false);
        };
        let Some(user) = users.iter_mut().find(|user| user.id() == user_id) else {
            return Ok(false);
        };
        if !book.is_borrowed_by(user_id) {
            return Ok(false);
        }
        book.apply(BookPatch::release());
        user.release(book_id);
        debug!(book = %book_id, user = %user_id, "Returned book");
        Ok(true)
    }
}

struct MemoryBookInternal;

impl MemoryBookInternal {
    fn find<'a>(state: &'a MemoryState, id: &BookId) -> Option<&'a Book> {
        state.books.iter().find(|book| book.id() == id)
    }

    fn find_mut<'a>(state: &'a mut MemoryState, id: &BookId) -> Option<&'a mut Book> {
        state.books.iter_mut().find(|book| book.id() == id)
    }

    fn select(state: &MemoryState, predicate: impl Fn(&Book) -> bool) -> Vec<Book> {
        state
            .books
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{BookQuery, UserQuery};
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        BookAuthor, BookCategory, BookId, BookPatch, BookTitle, BorrowedAt, Isbn, NewBook,
        UserEmail, UserId,
    };
    use kernel::KernelError;

    use crate::database::{MemoryBookRepository, MemoryDatabase, MemoryUserRepository};

    fn now() -> BorrowedAt {
        BorrowedAt::new(OffsetDateTime::now_utc())
    }

    #[tokio::test]
    async fn basic_modification() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::empty();
        let mut con = db.transact().await?;

        let book = MemoryBookRepository
            .create(
                &mut con,
                NewBook::new(
                    BookTitle::new("Brave New World"),
                    BookAuthor::new("Aldous Huxley"),
                    Isbn::new("978-0060850524"),
                    BookCategory::new("Science Fiction"),
                ),
            )
            .await?;
        assert!(*book.is_available().as_ref());

        let found = MemoryBookRepository.find_by_id(&mut con, book.id()).await?;
        assert_eq!(found.as_ref(), Some(&book));

        let patch = BookPatch {
            title: Some(BookTitle::new("Brave New World Revisited")),
            ..BookPatch::default()
        };
        let updated = MemoryBookRepository
            .update(&mut con, book.id(), patch)
            .await?
            .expect("book exists");
        assert_eq!(updated.title(), &BookTitle::new("Brave New World Revisited"));
        assert!(updated.updated_at().as_ref() > book.updated_at().as_ref());

        assert!(MemoryBookRepository.delete(&mut con, book.id()).await?);
        assert!(!MemoryBookRepository.delete(&mut con, book.id()).await?);
        assert!(MemoryBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .is_none());

        let missing = MemoryBookRepository
            .update(&mut con, book.id(), BookPatch::release())
            .await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn create_places_newest_first() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::with_sample_data()?;
        let mut con = db.transact().await?;
        let book = MemoryBookRepository
            .create(
                &mut con,
                NewBook::new(
                    BookTitle::new("Beloved"),
                    BookAuthor::new("Toni Morrison"),
                    Isbn::new("978-1400033416"),
                    BookCategory::new("Fiction"),
                ),
            )
            .await?;
        let all = MemoryBookRepository.get_all(&mut con).await?;
        assert_eq!(all.first(), Some(&book));
        assert_eq!(all.len(), 6);
        Ok(())
    }

    #[tokio::test]
    async fn queries_match_case_insensitively() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::with_sample_data()?;
        let mut con = db.transact().await?;

        let by_author = MemoryBookRepository.search(&mut con, "ORWELL").await?;
        assert_eq!(by_author.len(), 1);
        let by_isbn = MemoryBookRepository.search(&mut con, "0547928241").await?;
        assert_eq!(by_isbn[0].title(), &BookTitle::new("The Hobbit"));

        let fiction = MemoryBookRepository.find_by_category(&mut con, "fiction").await?;
        assert_eq!(fiction.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn borrow_and_return_follow_the_rules() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::with_sample_data()?;
        let mut con = db.transact().await?;
        let john = MemoryUserRepository
            .find_by_email(&mut con, &UserEmail::new("john@example.com"))
            .await?
            .expect("sample user");
        let jane = MemoryUserRepository
            .find_by_email(&mut con, &UserEmail::new("jane@example.com"))
            .await?
            .expect("sample user");
        let book = MemoryBookRepository.get_all(&mut con).await?.remove(0);

        assert!(
            MemoryBookRepository
                .borrow(&mut con, book.id(), john.id(), now())
                .await?
        );
        assert!(
            !MemoryBookRepository
                .borrow(&mut con, book.id(), jane.id(), now())
                .await?
        );
        let borrowed = MemoryBookRepository
            .find_by_borrower(&mut con, john.id())
            .await?;
        assert_eq!(borrowed.len(), 1);
        let holder = MemoryUserRepository
            .find_by_id(&mut con, john.id())
            .await?
            .expect("sample user");
        assert!(holder.borrowed_books().contains(book.id()));

        assert!(
            !MemoryBookRepository
                .return_book(&mut con, book.id(), jane.id())
                .await?
        );
        let still_out = MemoryBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .expect("book exists");
        assert!(still_out.is_borrowed_by(john.id()));

        assert!(
            MemoryBookRepository
                .return_book(&mut con, book.id(), john.id())
                .await?
        );
        let returned = MemoryBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .expect("book exists");
        assert!(*returned.is_available().as_ref());
        assert!(returned.borrowed_by().is_none());
        assert!(returned.borrowed_at().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn borrow_rejects_unknown_parties() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::with_sample_data()?;
        let mut con = db.transact().await?;
        let book = MemoryBookRepository.get_all(&mut con).await?.remove(0);
        let stranger = UserId::new(Uuid::new_v4());
        assert!(
            !MemoryBookRepository
                .borrow(&mut con, book.id(), &stranger, now())
                .await?
        );

        let user = MemoryUserRepository.get_all(&mut con).await?.remove(0);
        let ghost = BookId::new(Uuid::new_v4());
        assert!(
            !MemoryBookRepository
                .borrow(&mut con, &ghost, user.id(), now())
                .await?
        );
        assert!(
            !MemoryBookRepository
                .return_book(&mut con, &ghost, user.id())
                .await?
        );
        Ok(())
    }
}
