use std::collections::HashMap;

use error_stack::Report;
use time::OffsetDateTime;
use tracing::info;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnUserQuery, UserQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier, DependOnStoreSynchronizer};
use kernel::prelude::entity::{BookId, BookPatch, BorrowedAt, UserId};
use kernel::KernelError;

use crate::service::{notify_store, DependOnBookCollection};
use crate::transfer::{BookDto, BorrowDto, BorrowedBookDto, GetBorrowerBookDto};

const UNKNOWN_BORROWER: &str = "Unknown User";

/// Explains why the store refused a borrow or return.
async fn rejection<Q, U>(
    books: &Q,
    users: &U,
    connection: &mut Q::Transaction,
    book_id: &BookId,
    user_id: &UserId,
) -> error_stack::Result<Report<KernelError>, KernelError>
where
    Q: BookQuery,
    U: UserQuery<Transaction = Q::Transaction>,
{
    let Some(book) = books.find_by_id(connection, book_id).await? else {
        return Ok(Report::new(KernelError::NotFound)
            .attach_printable(format!("No book with id {book_id}")));
    };
    if users.find_by_id(connection, user_id).await?.is_none() {
        return Ok(Report::new(KernelError::NotFound)
            .attach_printable(format!("No user with id {user_id}")));
    }
    let reason = if *book.is_available().as_ref() {
        format!("Book {book_id} is not currently borrowed")
    } else if book.is_borrowed_by(user_id) {
        format!("Book {book_id} is already borrowed by {user_id}")
    } else {
        format!("Book {book_id} is borrowed by another user")
    };
    Ok(Report::new(KernelError::InvalidState).attach_printable(reason))
}

#[async_trait::async_trait]
pub trait RentService:
    'static
    + Sync
    + Send
    + DependOnBookCollection
    + DependOnDatabaseConnection
    + DependOnBookQuery
    + DependOnUserQuery
    + DependOnBookModifier
    + DependOnStoreSynchronizer
{
    async fn borrow_book(&self, dto: BorrowDto) -> error_stack::Result<BookDto, KernelError> {
        let book_id = BookId::new(dto.book_id);
        let user_id = UserId::new(dto.user_id);
        let at = BorrowedAt::new(OffsetDateTime::now_utc());

        let mut books = self.book_collection().write().await;
        let mut connection = self.database_connection().transact().await?;
        let borrowed = self
            .book_modifier()
            .borrow(&mut connection, &book_id, &user_id, at.clone())
            .await?;
        if !borrowed {
            let report = rejection(
                self.book_query(),
                self.user_query(),
                &mut connection,
                &book_id,
                &user_id,
            )
            .await?;
            connection.roll_back().await?;
            return Err(report);
        }
        connection.commit().await?;

        books.update_by_id(&book_id, BookPatch::borrow(user_id.clone(), at));
        let book = books.find_by_id(&book_id).cloned();
        notify_store(self.store_synchronizer()).await;
        info!(book = %book_id, user = %user_id, "Borrowed book");
        book.map(BookDto::from).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Book {book_id} is missing from the catalog"))
        })
    }

    async fn return_book(&self, dto: BorrowDto) -> error_stack::Result<BookDto, KernelError> {
        let book_id = BookId::new(dto.book_id);
        let user_id = UserId::new(dto.user_id);

        let mut books = self.book_collection().write().await;
        let mut connection = self.database_connection().transact().await?;
        let returned = self
            .book_modifier()
            .return_book(&mut connection, &book_id, &user_id)
            .await?;
        if !returned {
            let report = rejection(
                self.book_query(),
                self.user_query(),
                &mut connection,
                &book_id,
                &user_id,
            )
            .await?;
            connection.roll_back().await?;
            return Err(report);
        }
        connection.commit().await?;

        books.update_by_id(&book_id, BookPatch::release());
        let book = books.find_by_id(&book_id).cloned();
        notify_store(self.store_synchronizer()).await;
        info!(book = %book_id, user = %user_id, "Returned book");
        book.map(BookDto::from).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Book {book_id} is missing from the catalog"))
        })
    }
}

impl<T> RentService for T where
    T: DependOnBookCollection
        + DependOnDatabaseConnection
        + DependOnBookQuery
        + DependOnUserQuery
        + DependOnBookModifier
        + DependOnStoreSynchronizer
{
}

#[async_trait::async_trait]
pub trait GetBorrowedBookService:
    'static + Sync + Send + DependOnBookCollection + DependOnDatabaseConnection + DependOnUserQuery
{
    /// Books held by one user, in catalog order.
    async fn get_books_by_borrower(
        &self,
        dto: GetBorrowerBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let user_id = UserId::new(dto.user_id);
        let mut connection = self.database_connection().transact().await?;
        let user = self.user_query().find_by_id(&mut connection, &user_id).await?;
        connection.roll_back().await?;
        if user.is_none() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No user with id {user_id}")));
        }

        let books = self.book_collection().read().await;
        Ok(books
            .filter_by_borrower(&user_id)
            .into_iter()
            .cloned()
            .map(BookDto::from)
            .collect())
    }

    /// Every lent book with its borrower's name.
    async fn get_borrowed_books(&self) -> error_stack::Result<Vec<BorrowedBookDto>, KernelError> {
        let lent = {
            let books = self.book_collection().read().await;
            books
                .iter()
                .filter(|book| book.borrowed_by().is_some())
                .cloned()
                .collect::<Vec<_>>()
        };

        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().get_all(&mut connection).await?;
        connection.roll_back().await?;
        let names = users
            .into_iter()
            .map(|user| (user.id().clone(), user.name().as_ref().clone()))
            .collect::<HashMap<_, _>>();

        Ok(lent
            .into_iter()
            .map(|book| {
                let borrower_name = book
                    .borrowed_by()
                    .as_ref()
                    .and_then(|user_id| names.get(user_id))
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_BORROWER.to_string());
                BorrowedBookDto {
                    book: BookDto::from(book),
                    borrower_name,
                }
            })
            .collect())
    }
}

impl<T> GetBorrowedBookService for T where
    T: DependOnBookCollection + DependOnDatabaseConnection + DependOnUserQuery
{
}
