use libro_core::db::open_db_in_memory;
use libro_core::{Book, BookManager, ErrorKind, ManagerError, SqliteBookRepository};
use rusqlite::Connection;

fn test_book() -> Book {
    Book {
        title: "Test Book".to_string(),
        author: "John Doe".to_string(),
        isbn: "1234567890123".to_string(),
        year_published: 2021,
        genre: "Fiction".to_string(),
        pages: 100,
        price: 19.99,
    }
}

fn stored_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap()
}

fn assert_add_rejected(book: Book) {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());

    let err = manager.add(&book).unwrap_err();
    assert!(
        matches!(err, ManagerError::InvalidBook(_)),
        "unexpected error for {book:?}: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Book is invalid.");
    assert_eq!(stored_count(&conn), 0, "store changed for {book:?}");
}

#[test]
fn add_book_persists_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());

    manager.add(&test_book()).unwrap();

    let (title, author, year, pages, price): (String, String, i32, i32, f64) = conn
        .query_row(
            "SELECT title, author, year_published, pages, price FROM books WHERE isbn = ?1;",
            ["1234567890123"],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            },
        )
        .unwrap();
    assert_eq!(title, "Test Book");
    assert_eq!(author, "John Doe");
    assert_eq!(year, 2021);
    assert_eq!(pages, 100);
    assert_eq!(price, 19.99);

    assert_eq!(manager.get_specific("1234567890123").unwrap(), test_book());
}

#[test]
fn add_book_accepts_boundary_values() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());

    let mut lower = test_book();
    lower.title = "T".to_string();
    lower.author = "A".to_string();
    lower.genre = "G".to_string();
    lower.year_published = 1700;
    lower.pages = 1;
    lower.price = 0.01;
    manager.add(&lower).unwrap();

    let mut upper = test_book();
    upper.isbn = "1234567890124".to_string();
    upper.title = "t".repeat(255);
    upper.author = "a".repeat(100);
    upper.genre = "g".repeat(50);
    upper.year_published = 2024;
    upper.pages = i32::MAX;
    upper.price = 1_000_000.0;
    manager.add(&upper).unwrap();

    assert_eq!(manager.count().unwrap(), 2);
}

#[test]
fn add_book_rejects_invalid_title() {
    for title in [String::new(), "   ".to_string(), "c".repeat(256)] {
        let mut book = test_book();
        book.title = title;
        assert_add_rejected(book);
    }
}

#[test]
fn add_book_rejects_invalid_author() {
    for author in [String::new(), "   ".to_string(), "c".repeat(101)] {
        let mut book = test_book();
        book.author = author;
        assert_add_rejected(book);
    }
}

#[test]
fn add_book_rejects_invalid_isbn() {
    for isbn in [
        "",
        "  ",
        "1",
        "012345678911",
        "01234567898765",
        "abcdefghijklm",
        " 123456123456",
        "123456123456 ",
        "123456 123456",
        "123456a123456",
        "a123456123456",
        "123456123456a",
        "?????????????",
    ] {
        let mut book = test_book();
        book.isbn = isbn.to_string();
        assert_add_rejected(book);
    }
}

#[test]
fn add_book_rejects_year_outside_range() {
    for year in [0, 1699, 2025, -2021, i32::MAX, i32::MIN] {
        let mut book = test_book();
        book.year_published = year;
        assert_add_rejected(book);
    }
}

#[test]
fn add_book_rejects_invalid_genre() {
    for genre in [String::new(), "  ".to_string(), "c".repeat(51)] {
        let mut book = test_book();
        book.genre = genre;
        assert_add_rejected(book);
    }
}

#[test]
fn add_book_rejects_non_positive_pages() {
    for pages in [0, -1, i32::MIN] {
        let mut book = test_book();
        book.pages = pages;
        assert_add_rejected(book);
    }
}

#[test]
fn add_book_rejects_invalid_price() {
    for price in [0.0, 0.0099, -1.0, f64::MIN, f64::NAN, f64::INFINITY] {
        let mut book = test_book();
        book.price = price;
        assert_add_rejected(book);
    }
}

#[test]
fn add_book_with_existing_isbn_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    manager.add(&test_book()).unwrap();

    let mut second = test_book();
    second.title = "Another Title".to_string();
    let err = manager.add(&second).unwrap_err();

    assert!(matches!(&err, ManagerError::DuplicateIsbn(isbn) if isbn == "1234567890123"));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        err.to_string(),
        "A book with ISBN 1234567890123 already exists."
    );
    assert_eq!(stored_count(&conn), 1);
    assert_eq!(
        manager.get_specific("1234567890123").unwrap().title,
        "Test Book"
    );
}
