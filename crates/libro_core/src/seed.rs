//! Sample catalog used to populate fresh databases.
//!
//! # Invariants
//! - Every sample book passes `Book::validate()` and has a distinct ISBN.
//! - Seeding goes through the manager, so it obeys the same contract as
//!   any other caller.

use crate::model::book::Book;
use crate::repo::book_repo::BookRepository;
use crate::service::book_manager::{BookManager, ManagerError, ManagerResult};
use log::{info, warn};

const SAMPLE_BOOKS: &[(&str, &str, &str, i32, &str, i32, f64)] = &[
    ("To Kill a Mockingbird", "Harper Lee", "9780061120084", 1960, "Fiction", 336, 7.99),
    ("1984", "George Orwell", "9780451524935", 1949, "Dystopian", 328, 6.99),
    ("Pride and Prejudice", "Jane Austen", "9780307743394", 1813, "Romance", 279, 5.99),
    ("The Great Gatsby", "F. Scott Fitzgerald", "9780743273565", 1925, "Fiction", 180, 10.99),
    ("The Catcher in the Rye", "J.D. Salinger", "9780316769488", 1951, "Fiction", 277, 8.99),
    ("The Alchemist", "Paulo Coelho", "9780062315007", 1988, "Fiction", 208, 12.99),
    ("Moby-Dick", "Herman Melville", "9781503280786", 1851, "Adventure", 378, 11.99),
    ("War and Peace", "Leo Tolstoy", "9781400079988", 1869, "Historical Fiction", 1296, 14.99),
    ("The Hobbit", "J.R.R. Tolkien", "9780547928227", 1937, "Fantasy", 310, 9.99),
    ("Brave New World", "Aldous Huxley", "9780060850524", 1932, "Dystopian", 288, 13.99),
];

/// Returns the ten sample books in insertion order.
pub fn sample_catalog() -> Vec<Book> {
    SAMPLE_BOOKS
        .iter()
        .map(
            |&(title, author, isbn, year_published, genre, pages, price)| Book {
                title: title.to_string(),
                author: author.to_string(),
                isbn: isbn.to_string(),
                year_published,
                genre: genre.to_string(),
                pages,
                price,
            },
        )
        .collect()
}

/// Adds every sample book through `manager` and returns how many were added.
///
/// Sample ISBNs are checked for conflicts before the first write, so a
/// catalog that already holds any of them is left untouched.
///
/// # Errors
/// - `A book with ISBN {isbn} already exists.` for the first conflicting
///   sample, before anything is added.
/// - Storage failures from the underlying repository.
pub fn seed_catalog<R: BookRepository>(manager: &BookManager<R>) -> ManagerResult<usize> {
    let books = sample_catalog();
    if let Some(taken) = find_conflict(manager, &books)? {
        warn!("event=catalog_seed module=seed status=rejected error_code=isbn_duplicate isbn={taken}");
        return Err(ManagerError::DuplicateIsbn(taken));
    }
    for book in &books {
        manager.add(book)?;
    }
    info!(
        "event=catalog_seed module=seed status=ok count={}",
        books.len()
    );
    Ok(books.len())
}

fn find_conflict<R: BookRepository>(
    manager: &BookManager<R>,
    books: &[Book],
) -> ManagerResult<Option<String>> {
    for book in books {
        if manager.contains(&book.isbn)? {
            return Ok(Some(book.isbn.clone()));
        }
    }
    Ok(None)
}

/// Seeds only when the catalog is empty; returns the number of books added.
pub fn seed_if_empty<R: BookRepository>(manager: &BookManager<R>) -> ManagerResult<usize> {
    if manager.count()? > 0 {
        info!("event=catalog_seed module=seed status=skipped reason=not_empty");
        return Ok(0);
    }
    seed_catalog(manager)
}
