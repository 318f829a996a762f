use libro_core::db::open_db_in_memory;
use libro_core::{
    seed_catalog, Book, BookManager, ErrorKind, ManagerError, SqliteBookRepository,
};

fn books() -> Vec<Book> {
    vec![
        Book {
            title: "Test Book 1".to_string(),
            author: "John Doe".to_string(),
            isbn: "1234567890123".to_string(),
            year_published: 2021,
            genre: "Fiction".to_string(),
            pages: 100,
            price: 19.99,
        },
        Book {
            title: "Test Book 2".to_string(),
            author: "Some Author".to_string(),
            isbn: "1234567890121".to_string(),
            year_published: 2021,
            genre: "Horror".to_string(),
            pages: 110,
            price: 11.99,
        },
        Book {
            title: "IT".to_string(),
            author: "Stephen King".to_string(),
            isbn: "1234567890124".to_string(),
            year_published: 1978,
            genre: "Horror".to_string(),
            pages: 483,
            price: 21.99,
        },
    ]
}

#[test]
fn get_specific_with_valid_isbn_returns_book() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    let books = books();
    for book in &books {
        manager.add(book).unwrap();
    }

    let found = manager.get_specific(&books[0].isbn).unwrap();

    assert_eq!(found, books[0]);
}

#[test]
fn get_specific_finds_seeded_book() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    seed_catalog(&manager).unwrap();

    let found = manager.get_specific("9780062315007").unwrap();

    assert_eq!(found.title, "The Alchemist");
    assert_eq!(found.author, "Paulo Coelho");
    assert_eq!(found.pages, 208);
}

#[test]
fn get_specific_with_unknown_isbn_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    for book in &books() {
        manager.add(book).unwrap();
    }

    for isbn in ["0000000000000", "000000000"] {
        let err = manager.get_specific(isbn).unwrap_err();
        assert!(matches!(&err, ManagerError::BookNotFound(missing) if missing == isbn));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), format!("No book found with ISBN: {isbn}"));
    }
}

#[test]
fn get_specific_with_blank_isbn_is_an_argument_error() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    for book in &books() {
        manager.add(book).unwrap();
    }

    for isbn in ["", "   "] {
        let err = manager.get_specific(isbn).unwrap_err();
        assert!(matches!(err, ManagerError::EmptyIsbn));
        assert_eq!(err.to_string(), "ISBN cannot be empty.");
    }
}
