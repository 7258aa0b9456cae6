use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateBookDto, DeleteBookDto, GetBookDto, GetBorrowerBookDto, GetCategoryBookDto,
    SearchBookDto, UpdateBookDto,
};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    title: String,
    author: String,
    isbn: String,
    category: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    category: Option<String>,
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Query string of `GET /books`. At most one filter applies; `q` wins, then
/// `title`, `author`, `category`, `borrower` and `available` in that order.
#[derive(Debug, Default, Deserialize)]
pub struct GetAllRequest {
    q: Option<String>,
    title: Option<String>,
    author: Option<String>,
    category: Option<String>,
    borrower: Option<Uuid>,
    available: Option<bool>,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub enum BookFilter {
    All,
    Search(SearchBookDto),
    Title(SearchBookDto),
    Author(SearchBookDto),
    Category(GetCategoryBookDto),
    Borrower(GetBorrowerBookDto),
    Available(bool),
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            category: input.category,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookDto {
            id,
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            category: input.category,
        }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = BookFilter;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        let search = |query: String| SearchBookDto { query };
        if let Some(query) = input.q {
            BookFilter::Search(search(query))
        } else if let Some(title) = input.title {
            BookFilter::Title(search(title))
        } else if let Some(author) = input.author {
            BookFilter::Author(search(author))
        } else if let Some(category) = input.category {
            BookFilter::Category(GetCategoryBookDto { category })
        } else if let Some(user_id) = input.borrower {
            BookFilter::Borrower(GetBorrowerBookDto { user_id })
        } else if let Some(available) = input.available {
            BookFilter::Available(available)
        } else {
            BookFilter::All
        }
    }
}
