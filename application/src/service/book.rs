use std::collections::HashSet;

use error_stack::Report;
use tracing::info;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::update::{BookModifier, DependOnBookModifier, DependOnStoreSynchronizer};
use kernel::prelude::entity::{Book, BookAuthor, BookCategory, BookId, BookPatch, BookTitle, Isbn, NewBook};
use kernel::KernelError;

use crate::service::{notify_store, DependOnBookCollection};
use crate::transfer::{
    BookDto, CreateBookDto, DeleteBookDto, GetBookDto, GetCategoryBookDto, SearchBookDto,
    UpdateBookDto,
};

fn into_dtos<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<BookDto> {
    books.into_iter().cloned().map(BookDto::from).collect()
}

/// Read side of the catalog. Served from the in-process list only.
#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookCollection {
    async fn get_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let books = self.book_collection().read().await;
        Ok(into_dtos(books.iter()))
    }

    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let id = BookId::new(dto.id);
        let books = self.book_collection().read().await;
        Ok(books.find_by_id(&id).cloned().map(BookDto::from))
    }

    /// Title matches first, then author matches, each book at most once.
    async fn search_books(
        &self,
        dto: SearchBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let books = self.book_collection().read().await;
        let mut seen = HashSet::new();
        let found = books
            .search_by_title(&dto.query)
            .into_iter()
            .chain(books.search_by_author(&dto.query))
            .filter(|book| seen.insert(book.id()));
        Ok(into_dtos(found))
    }

    async fn search_books_by_title(
        &self,
        dto: SearchBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let books = self.book_collection().read().await;
        Ok(into_dtos(books.search_by_title(&dto.query)))
    }

    async fn search_books_by_author(
        &self,
        dto: SearchBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let books = self.book_collection().read().await;
        Ok(into_dtos(books.search_by_author(&dto.query)))
    }

    async fn get_books_by_category(
        &self,
        dto: GetCategoryBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let books = self.book_collection().read().await;
        Ok(into_dtos(books.filter_by_category(&dto.category)))
    }

    async fn get_available_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let books = self.book_collection().read().await;
        Ok(into_dtos(books.available()))
    }

    async fn get_unavailable_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let books = self.book_collection().read().await;
        Ok(into_dtos(books.borrowed()))
    }
}

impl<T> GetBookService for T where T: DependOnBookCollection {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static
    + Sync
    + Send
    + DependOnBookCollection
    + DependOnDatabaseConnection
    + DependOnBookModifier
    + DependOnStoreSynchronizer
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let draft = NewBook::new(
            BookTitle::try_new(dto.title)?,
            BookAuthor::try_new(dto.author)?,
            Isbn::try_new(dto.isbn)?,
            BookCategory::try_new(dto.category)?,
        );

        let mut books = self.book_collection().write().await;
        let mut connection = self.database_connection().transact().await?;
        let book = self.book_modifier().create(&mut connection, draft).await?;
        connection.commit().await?;

        books.insert(book.clone());
        notify_store(self.store_synchronizer()).await;
        info!(id = %book.id(), title = %book.title().as_ref(), "Added book");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where
    T: DependOnBookCollection
        + DependOnDatabaseConnection
        + DependOnBookModifier
        + DependOnStoreSynchronizer
{
}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static
    + Sync
    + Send
    + DependOnBookCollection
    + DependOnDatabaseConnection
    + DependOnBookModifier
    + DependOnStoreSynchronizer
{
    /// Edits the descriptive fields. Availability only changes through
    /// borrowing and returning.
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let id = BookId::new(dto.id);
        let patch = BookPatch {
            title: dto.title.map(BookTitle::try_new).transpose()?,
            author: dto.author.map(BookAuthor::try_new).transpose()?,
            isbn: dto.isbn.map(Isbn::try_new).transpose()?,
            category: dto.category.map(BookCategory::try_new).transpose()?,
            ..BookPatch::default()
        };

        let mut books = self.book_collection().write().await;
        let mut connection = self.database_connection().transact().await?;
        let Some(stored) = self
            .book_modifier()
            .update(&mut connection, &id, patch.clone())
            .await?
        else {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with id {id}")));
        };
        connection.commit().await?;

        books.update_by_id(&id, patch);
        let book = books.find_by_id(&id).cloned().unwrap_or(stored);
        notify_store(self.store_synchronizer()).await;
        info!(id = %id, "Updated book");
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where
    T: DependOnBookCollection
        + DependOnDatabaseConnection
        + DependOnBookModifier
        + DependOnStoreSynchronizer
{
}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static
    + Sync
    + Send
    + DependOnBookCollection
    + DependOnDatabaseConnection
    + DependOnBookModifier
    + DependOnStoreSynchronizer
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<Uuid, KernelError> {
        let id = BookId::new(dto.id);

        let mut books = self.book_collection().write().await;
        let mut connection = self.database_connection().transact().await?;
        if !self.book_modifier().delete(&mut connection, &id).await? {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with id {id}")));
        }
        connection.commit().await?;

        books.remove_by_id(&id);
        notify_store(self.store_synchronizer()).await;
        info!(id = %id, "Deleted book");
        Ok(dto.id)
    }
}

impl<T> DeleteBookService for T where
    T: DependOnBookCollection
        + DependOnDatabaseConnection
        + DependOnBookModifier
        + DependOnStoreSynchronizer
{
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::KernelError;

    use crate::service::test::TestModule;
    use crate::service::{
        CreateBookService, DeleteBookService, GetBookService, RentService, UpdateBookService,
    };
    use crate::transfer::{
        BorrowDto, CreateBookDto, DeleteBookDto, GetBookDto, GetCategoryBookDto, SearchBookDto,
        UpdateBookDto,
    };

    fn draft(title: &str) -> CreateBookDto {
        CreateBookDto {
            title: title.into(),
            author: "Frank Herbert".into(),
            isbn: "978-0441013593".into(),
            category: "science fiction".into(),
        }
    }

    fn query(query: &str) -> SearchBookDto {
        SearchBookDto {
            query: query.into(),
        }
    }

    #[tokio::test]
    async fn load_orders_newest_first() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let titles = module
            .get_books()
            .await?
            .into_iter()
            .map(|book| book.title)
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
        Ok(())
    }

    #[tokio::test]
    async fn create_reaches_list_and_store() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let created = module.create_book(draft("Dune")).await?;
        assert!(created.is_available);
        assert_eq!(created.category, "Science Fiction");

        let books = module.get_books().await?;
        assert_eq!(books.len(), 6);
        assert_eq!(books[0], created);

        let stored = module.stored_books().await;
        assert_eq!(stored[0].id().as_ref(), &created.id);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_before_the_store() -> error_stack::Result<(), KernelError>
    {
        let module = TestModule::sample().await;
        let mut bad = draft("  ");
        let report = module.create_book(bad).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        bad = draft("Dune");
        bad.isbn = "12345".into();
        let report = module.create_book(bad).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        assert_eq!(module.get_books().await?.len(), 5);
        assert_eq!(module.stored_books().await.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_position_and_other_fields() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let before = module.get_books().await?;
        let target = before[2].clone();

        let updated = module
            .update_book(UpdateBookDto {
                id: target.id,
                title: Some("Nineteen Eighty-Four".into()),
                author: None,
                isbn: None,
                category: None,
            })
            .await?;
        assert_eq!(updated.title, "Nineteen Eighty-Four");
        assert_eq!(updated.author, target.author);
        assert!(updated.updated_at > target.updated_at);

        let after = module.get_books().await?;
        assert_eq!(after[2].id, target.id);
        assert_eq!(after[2].title, "Nineteen Eighty-Four");

        let stored = module.stored_books().await;
        assert_eq!(stored[2].title().as_ref(), "Nineteen Eighty-Four");
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_unknown_book() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let report = module
            .update_book(UpdateBookDto {
                id: Uuid::new_v4(),
                title: Some("Anything".into()),
                author: None,
                isbn: None,
                category: None,
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);

        let report = module
            .delete_book(DeleteBookDto { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert_eq!(module.get_books().await?.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_from_list_and_store() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let target = module.get_books().await?.remove(1);

        let deleted = module.delete_book(DeleteBookDto { id: target.id }).await?;
        assert_eq!(deleted, target.id);
        assert!(module
            .get_book(GetBookDto { id: target.id })
            .await?
            .is_none());
        assert_eq!(module.get_books().await?.len(), 4);
        assert_eq!(module.stored_books().await.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn combined_search_deduplicates() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        module
            .create_book(CreateBookDto {
                title: "Austen: A Life".into(),
                author: "Jane Austen".into(),
                isbn: "978-0140271829".into(),
                category: "Biography".into(),
            })
            .await?;

        let found = module.search_books(query("austen")).await?;
        let titles = found.iter().map(|book| book.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, ["Austen: A Life", "Pride and Prejudice"]);

        assert_eq!(module.search_books_by_title(query("austen")).await?.len(), 1);
        assert_eq!(module.search_books_by_author(query("austen")).await?.len(), 2);
        assert!(module.search_books(query("dune")).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn category_and_availability_filters() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let fiction = module
            .get_books_by_category(GetCategoryBookDto {
                category: "FICTION".into(),
            })
            .await?;
        assert_eq!(fiction.len(), 2);

        let poetry = module
            .get_books_by_category(GetCategoryBookDto {
                category: "Poetry".into(),
            })
            .await?;
        assert!(poetry.is_empty());
        assert_eq!(module.get_available_books().await?.len(), 5);
        assert!(module.get_unavailable_books().await?.is_empty());

        let target = module.get_books().await?.remove(3);
        module
            .borrow_book(BorrowDto {
                book_id: target.id,
                user_id: module.user_id("john@example.com").await,
            })
            .await?;
        assert_eq!(module.get_available_books().await?.len(), 4);
        let lent = module.get_unavailable_books().await?;
        assert_eq!(lent.len(), 1);
        assert_eq!(lent[0].id, target.id);
        Ok(())
    }
}
