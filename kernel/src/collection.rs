use std::fmt::{Debug, Formatter};

use crate::entity::{Book, BookId, BookPatch, UserId};

/// Singly-linked list of books, newest first.
///
/// Insertion prepends in O(1); every lookup is a linear scan from the head.
/// Updates rewrite a node in place, so only insertion and removal change the
/// order.
#[derive(Default)]
pub struct BookList {
    head: Option<Box<Node>>,
    len: usize,
}

struct Node {
    book: Book,
    next: Option<Box<Node>>,
}

impl BookList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, book: Book) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { book, next }));
        self.len += 1;
    }

    /// Splices out the first book with `id`. Returns `false` if none matched.
    pub fn remove_by_id(&mut self, id: &BookId) -> bool {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.book.id() != id) {
            cursor = match cursor {
                Some(node) => &mut node.next,
                None => return false,
            };
        }
        let Some(removed) = cursor.take() else {
            return false;
        };
        let removed = *removed;
        *cursor = removed.next;
        self.len -= 1;
        true
    }

    pub fn find_by_id(&self, id: &BookId) -> Option<&Book> {
        self.iter().find(|book| book.id() == id)
    }

    /// Merges `patch` into the matching book and refreshes its update
    /// timestamp. Returns `false` if no book has `id`.
    pub fn update_by_id(&mut self, id: &BookId, patch: BookPatch) -> bool {
        match self.iter_mut().find(|book| book.id() == id) {
            Some(book) => {
                book.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring match on the title, in list order.
    pub fn search_by_title(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.iter()
            .filter(|book| book.title().contains_lowercase(&needle))
            .collect()
    }

    /// Case-insensitive substring match on the author, in list order.
    pub fn search_by_author(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.iter()
            .filter(|book| book.author().contains_lowercase(&needle))
            .collect()
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<&Book> {
        self.iter()
            .filter(|book| book.category().is(category))
            .collect()
    }

    pub fn filter_by_borrower(&self, user_id: &UserId) -> Vec<&Book> {
        self.iter()
            .filter(|book| book.is_borrowed_by(user_id))
            .collect()
    }

    pub fn available(&self) -> Vec<&Book> {
        self.iter()
            .filter(|book| *book.is_available().as_ref())
            .collect()
    }

    /// Books currently out, whoever holds them.
    pub fn borrowed(&self) -> Vec<&Book> {
        self.iter()
            .filter(|book| !*book.is_available().as_ref())
            .collect()
    }

    /// Clones every book, head to tail.
    pub fn to_vec(&self) -> Vec<Book> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }
}

impl Drop for BookList {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Debug for BookList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Inserts each book at the head, so the last one yielded ends up first.
impl Extend<Book> for BookList {
    fn extend<I: IntoIterator<Item = Book>>(&mut self, books: I) {
        books.into_iter().for_each(|book| self.insert(book));
    }
}

impl<'a> IntoIterator for &'a BookList {
    type Item = &'a Book;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.book
        })
    }
}

struct IterMut<'a> {
    next: Option<&'a mut Node>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut Book;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.book
        })
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::collection::BookList;
    use crate::entity::{
        Book, BookAuthor, BookCategory, BookId, BookPatch, BookTitle, BorrowedAt, IsAvailable,
        Isbn, NewBook, UserId,
    };

    fn book(title: &str, author: &str, category: &str, minutes_ago: i64) -> Book {
        let draft = NewBook::new(
            BookTitle::new(title),
            BookAuthor::new(author),
            Isbn::new("978-0000000000"),
            BookCategory::new(category),
        );
        Book::create(
            BookId::new(Uuid::new_v4()),
            draft,
            OffsetDateTime::now_utc() - Duration::minutes(minutes_ago),
        )
    }

    fn titles(list: &BookList) -> Vec<String> {
        list.iter()
            .map(|book| book.title().as_ref().to_string())
            .collect()
    }

    #[test]
    fn insert_keeps_newest_first() {
        let mut list = BookList::new();
        assert!(list.is_empty());

        list.insert(book("A", "Ann", "Fiction", 3));
        list.insert(book("B", "Bob", "Fiction", 2));
        list.insert(book("C", "Cid", "Fiction", 1));

        assert_eq!(list.len(), 3);
        assert!(!list.is_empty());
        assert_eq!(titles(&list), ["C", "B", "A"]);
        assert_eq!(list.to_vec().len(), 3);
    }

    #[test]
    fn find_after_insert_returns_the_same_book() {
        let mut list = BookList::new();
        let inserted = book("Emma", "Jane Austen", "Romance", 1);
        list.insert(inserted.clone());

        assert_eq!(list.find_by_id(inserted.id()), Some(&inserted));
        assert_eq!(list.find_by_id(&BookId::new(Uuid::new_v4())), None);
    }

    #[test]
    fn remove_head_middle_and_tail() {
        let mut list = BookList::new();
        let a = book("A", "Ann", "Fiction", 3);
        let b = book("B", "Bob", "Fiction", 2);
        let c = book("C", "Cid", "Fiction", 1);
        list.extend([a.clone(), b.clone(), c.clone()]);

        assert!(list.remove_by_id(b.id()));
        assert_eq!(titles(&list), ["C", "A"]);
        assert_eq!(list.len(), 2);
        assert!(list.find_by_id(b.id()).is_none());

        assert!(list.remove_by_id(c.id()));
        assert_eq!(titles(&list), ["A"]);

        assert!(list.remove_by_id(a.id()));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_unknown_leaves_list_untouched() {
        let mut list = BookList::new();
        assert!(!list.remove_by_id(&BookId::new(Uuid::new_v4())));

        list.insert(book("A", "Ann", "Fiction", 1));
        assert!(!list.remove_by_id(&BookId::new(Uuid::new_v4())));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn update_merges_in_place_and_advances_timestamp() {
        let mut list = BookList::new();
        let a = book("A", "Ann", "Fiction", 3);
        let b = book("B", "Bob", "Fiction", 2);
        list.extend([a.clone(), b.clone()]);

        let patch = BookPatch {
            is_available: Some(IsAvailable::new(false)),
            ..BookPatch::default()
        };
        assert!(list.update_by_id(a.id(), patch));

        let updated = list.find_by_id(a.id()).unwrap();
        assert!(!*updated.is_available().as_ref());
        assert!(updated.updated_at().as_ref() > a.updated_at().as_ref());
        assert_eq!(updated.title(), a.title());
        assert_eq!(updated.author(), a.author());
        assert_eq!(updated.created_at(), a.created_at());
        assert_eq!(titles(&list), ["B", "A"]);

        assert!(!list.update_by_id(&BookId::new(Uuid::new_v4()), BookPatch::release()));
    }

    #[test]
    fn searches_are_case_insensitive_and_ordered() {
        let mut list = BookList::new();
        list.insert(book("The Hobbit", "J.R.R. Tolkien", "Fantasy", 3));
        list.insert(book("The Silmarillion", "J.R.R. Tolkien", "Fantasy", 2));
        list.insert(book("1984", "George Orwell", "Science Fiction", 1));

        let found = list
            .search_by_title("the")
            .into_iter()
            .map(|book| book.title().as_ref().as_str())
            .collect::<Vec<_>>();
        assert_eq!(found, ["The Silmarillion", "The Hobbit"]);

        assert_eq!(list.search_by_author("tolkien").len(), 2);
        assert_eq!(list.search_by_author("ORWELL").len(), 1);
        assert!(list.search_by_title("dune").is_empty());
    }

    #[test]
    fn category_and_borrower_filters() {
        let mut list = BookList::new();
        let hobbit = book("The Hobbit", "J.R.R. Tolkien", "Fantasy", 2);
        let dune = book("Dune", "Frank Herbert", "Science Fiction", 1);
        list.extend([hobbit.clone(), dune.clone()]);

        assert_eq!(list.filter_by_category("fantasy").len(), 1);
        assert_eq!(list.filter_by_category("SCIENCE FICTION").len(), 1);
        assert!(list.filter_by_category("Science").is_empty());

        let reader = UserId::new(Uuid::new_v4());
        assert!(list.update_by_id(
            dune.id(),
            BookPatch::borrow(reader.clone(), BorrowedAt::new(OffsetDateTime::now_utc())),
        ));
        let borrowed = list.filter_by_borrower(&reader);
        assert_eq!(borrowed.len(), 1);
        assert_eq!(borrowed[0].id(), dune.id());
        assert!(list
            .filter_by_borrower(&UserId::new(Uuid::new_v4()))
            .is_empty());

        let available = list.available();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id(), hobbit.id());
        let lent = list.borrowed();
        assert_eq!(lent.len(), 1);
        assert_eq!(lent[0].id(), dune.id());
    }

    #[test]
    fn scenario_insert_remove_search_filter() {
        let mut list = BookList::new();
        let a = book("Pride and Prejudice", "Jane Austen", "Romance", 3);
        let b = book("To Kill a Mockingbird", "Harper Lee", "Fiction", 2);
        let c = book("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 1);
        list.insert(a.clone());
        list.insert(b.clone());
        list.insert(c.clone());
        assert_eq!(list.to_vec(), vec![c.clone(), b.clone(), a.clone()]);

        assert!(list.remove_by_id(b.id()));
        assert_eq!(list.to_vec(), vec![c.clone(), a.clone()]);
        assert_eq!(list.len(), 2);

        assert_eq!(list.search_by_title("gatsby"), vec![&c]);
        assert!(list.filter_by_category("Poetry").is_empty());
    }

    #[test]
    fn clear_resets_and_long_lists_drop_without_recursion() {
        let mut list = BookList::new();
        let template = book("Filler", "Nobody", "Other", 1);
        for _ in 0..200_000 {
            list.insert(template.clone());
        }
        assert_eq!(list.len(), 200_000);

        list.clear();
        assert!(list.is_empty());
        assert!(list.iter().next().is_none());

        list.extend(std::iter::repeat(template).take(200_000));
        drop(list);
    }
}
