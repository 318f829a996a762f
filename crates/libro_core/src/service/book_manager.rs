//! Book catalog use-case service.
//!
//! # Responsibility
//! - Enforce the catalog contract: validate-or-fail before any store call.
//! - Translate repository outcomes into caller-facing errors with fixed
//!   messages.
//!
//! # Invariants
//! - Invalid books never reach the repository, so a rejected add/update
//!   leaves the store unchanged.
//! - Blank ISBN or title-fragment arguments are rejected before any query.
//! - Log events carry ISBNs and counts only, never titles or authors.

use crate::model::book::{Book, BookValidationError};
use crate::repo::book_repo::{BookRepository, RepoError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Broad category of a [`ManagerError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Book failed field validation.
    Validation,
    /// Caller passed a blank argument.
    Argument,
    NotFound,
    /// Write collides with an existing record.
    Conflict,
    Storage,
}

/// Manager error; `Display` renders the fixed caller-facing message.
#[derive(Debug)]
pub enum ManagerError {
    InvalidBook(BookValidationError),
    EmptyIsbn,
    EmptyTitleFragment,
    /// Catalog holds no books at all.
    NoBooks,
    BookNotFound(String),
    NoTitleMatches,
    DuplicateIsbn(String),
    Repo(RepoError),
}

impl ManagerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBook(_) => ErrorKind::Validation,
            Self::EmptyIsbn | Self::EmptyTitleFragment => ErrorKind::Argument,
            Self::NoBooks | Self::BookNotFound(_) | Self::NoTitleMatches => ErrorKind::NotFound,
            Self::DuplicateIsbn(_) => ErrorKind::Conflict,
            Self::Repo(_) => ErrorKind::Storage,
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBook(_) => "book_invalid",
            Self::EmptyIsbn => "isbn_empty",
            Self::EmptyTitleFragment => "title_fragment_empty",
            Self::NoBooks => "catalog_empty",
            Self::BookNotFound(_) => "book_not_found",
            Self::NoTitleMatches => "title_no_match",
            Self::DuplicateIsbn(_) => "isbn_duplicate",
            Self::Repo(_) => "storage_failed",
        }
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBook(_) => write!(f, "Book is invalid."),
            Self::EmptyIsbn => write!(f, "ISBN cannot be empty."),
            Self::EmptyTitleFragment => write!(f, "Title fragment cannot be empty."),
            Self::NoBooks => write!(f, "No books found."),
            Self::BookNotFound(isbn) => write!(f, "No book found with ISBN: {isbn}"),
            Self::NoTitleMatches => write!(f, "No books found with the given title fragment."),
            Self::DuplicateIsbn(isbn) => write!(f, "A book with ISBN {isbn} already exists."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBook(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ManagerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidBook(err),
            RepoError::NotFound(isbn) => Self::BookNotFound(isbn),
            RepoError::Duplicate(isbn) => Self::DuplicateIsbn(isbn),
            other => Self::Repo(other),
        }
    }
}

/// Catalog facade that validates input and delegates to a repository.
pub struct BookManager<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookManager<R> {
    /// Creates a manager over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new book.
    ///
    /// # Errors
    /// - `Book is invalid.` when any field fails validation.
    /// - `A book with ISBN {isbn} already exists.` on a duplicate key.
    pub fn add(&self, book: &Book) -> ManagerResult<()> {
        ensure_valid("book_add", book)?;
        self.repo
            .add_book(book)
            .map_err(|err| log_failure("book_add", err.into()))?;
        info!(
            "event=book_add module=manager status=ok isbn={}",
            book.isbn
        );
        Ok(())
    }

    /// Replaces the stored fields of the book whose ISBN matches.
    ///
    /// # Errors
    /// - `Book is invalid.` when any field fails validation.
    /// - `No book found with ISBN: {isbn}` when nothing matches.
    pub fn update(&self, book: &Book) -> ManagerResult<()> {
        ensure_valid("book_update", book)?;
        self.repo
            .update_book(book)
            .map_err(|err| log_failure("book_update", err.into()))?;
        info!(
            "event=book_update module=manager status=ok isbn={}",
            book.isbn
        );
        Ok(())
    }

    /// Deletes exactly the book with `isbn`.
    ///
    /// # Errors
    /// - `ISBN cannot be empty.` for blank input.
    /// - `No book found with ISBN: {isbn}` when nothing matches.
    pub fn delete(&self, isbn: &str) -> ManagerResult<()> {
        ensure_isbn_present("book_delete", isbn)?;
        self.repo
            .delete_book(isbn)
            .map_err(|err| log_failure("book_delete", err.into()))?;
        info!("event=book_delete module=manager status=ok isbn={isbn}");
        Ok(())
    }

    /// Returns every stored book ordered by title.
    ///
    /// # Errors
    /// - `No books found.` when the catalog is empty.
    pub fn get_all(&self) -> ManagerResult<Vec<Book>> {
        let books = self
            .repo
            .list_books()
            .map_err(|err| log_failure("book_list", err.into()))?;
        if books.is_empty() {
            return Err(log_failure("book_list", ManagerError::NoBooks));
        }
        debug!(
            "event=book_list module=manager status=ok count={}",
            books.len()
        );
        Ok(books)
    }

    /// Returns the book stored under `isbn`.
    ///
    /// # Errors
    /// - `ISBN cannot be empty.` for blank input.
    /// - `No book found with ISBN: {isbn}` when nothing matches.
    pub fn get_specific(&self, isbn: &str) -> ManagerResult<Book> {
        ensure_isbn_present("book_get", isbn)?;
        let book = self
            .repo
            .get_book(isbn)
            .map_err(|err| log_failure("book_get", err.into()))?;
        match book {
            Some(book) => {
                debug!("event=book_get module=manager status=ok isbn={isbn}");
                Ok(book)
            }
            None => Err(log_failure(
                "book_get",
                ManagerError::BookNotFound(isbn.to_string()),
            )),
        }
    }

    /// Returns books whose title contains `title_fragment`, ignoring case.
    ///
    /// # Errors
    /// - `Title fragment cannot be empty.` for blank input.
    /// - `No books found with the given title fragment.` when nothing matches.
    pub fn search_by_title(&self, title_fragment: &str) -> ManagerResult<Vec<Book>> {
        if title_fragment.trim().is_empty() {
            return Err(log_failure(
                "book_search",
                ManagerError::EmptyTitleFragment,
            ));
        }
        let books = self
            .repo
            .search_by_title(title_fragment)
            .map_err(|err| log_failure("book_search", err.into()))?;
        if books.is_empty() {
            return Err(log_failure("book_search", ManagerError::NoTitleMatches));
        }
        debug!(
            "event=book_search module=manager status=ok count={}",
            books.len()
        );
        Ok(books)
    }

    /// Reports whether a book is stored under `isbn`, without logging a miss.
    pub fn contains(&self, isbn: &str) -> ManagerResult<bool> {
        Ok(self.repo.get_book(isbn)?.is_some())
    }

    /// Returns the number of stored books.
    pub fn count(&self) -> ManagerResult<u64> {
        Ok(self.repo.count_books()?)
    }
}

fn ensure_valid(event: &'static str, book: &Book) -> ManagerResult<()> {
    book.validate()
        .map_err(|err| log_failure(event, ManagerError::InvalidBook(err)))
}

fn ensure_isbn_present(event: &'static str, isbn: &str) -> ManagerResult<()> {
    if isbn.trim().is_empty() {
        return Err(log_failure(event, ManagerError::EmptyIsbn));
    }
    Ok(())
}

fn log_failure(event: &'static str, err: ManagerError) -> ManagerError {
    match err.kind() {
        ErrorKind::Storage => error!(
            "event={event} module=manager status=error error_code={} error={err}",
            err.code()
        ),
        _ => warn!(
            "event={event} module=manager status=rejected error_code={}",
            err.code()
        ),
    }
    err
}
