use libro_core::db::open_db_in_memory;
use libro_core::{
    seed_catalog, Book, BookManager, ErrorKind, ManagerError, SqliteBookRepository,
};

fn book(title: &str, isbn: &str) -> Book {
    Book {
        title: title.to_string(),
        author: "Some Author".to_string(),
        isbn: isbn.to_string(),
        year_published: 2021,
        genre: "Fiction".to_string(),
        pages: 100,
        price: 19.99,
    }
}

#[test]
fn search_returns_all_books_containing_fragment() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    for item in [
        book("Test Book 1", "1234567890123"),
        book("Test Book 2", "1234567890121"),
        book("Test Book 3", "1234567890122"),
        book("IT", "1234567890124"),
    ] {
        manager.add(&item).unwrap();
    }

    let found = manager.search_by_title("Te").unwrap();

    let titles: Vec<_> = found.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["Test Book 1", "Test Book 2", "Test Book 3"]);
}

#[test]
fn search_ignores_case() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    seed_catalog(&manager).unwrap();

    let found = manager.search_by_title("pRIDE").unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].isbn, "9780307743394");
    assert_eq!(found[0].author, "Jane Austen");
}

#[test]
fn search_folds_case_of_accented_titles() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    manager.add(&book("École Rust", "1234567890123")).unwrap();
    manager.add(&book("Straße nach Süden", "1234567890124")).unwrap();

    let found = manager.search_by_title("école").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].isbn, "1234567890123");

    let found = manager.search_by_title("SÜDEN").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].isbn, "1234567890124");
}

#[test]
fn search_treats_wildcard_characters_literally() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    manager.add(&book("100% Rust", "1234567890123")).unwrap();
    manager.add(&book("1000 Rust tips", "1234567890124")).unwrap();

    let found = manager.search_by_title("0%").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% Rust");

    let err = manager.search_by_title("_ Rust").unwrap_err();
    assert!(matches!(err, ManagerError::NoTitleMatches));
}

#[test]
fn search_with_blank_fragment_is_an_argument_error() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    seed_catalog(&manager).unwrap();

    for fragment in ["", "   "] {
        let err = manager.search_by_title(fragment).unwrap_err();
        assert!(matches!(err, ManagerError::EmptyTitleFragment));
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert_eq!(err.to_string(), "Title fragment cannot be empty.");
    }
}

#[test]
fn search_without_match_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let manager = BookManager::new(SqliteBookRepository::try_new(&conn).unwrap());
    seed_catalog(&manager).unwrap();

    let err = manager.search_by_title("Non Existent").unwrap_err();

    assert!(matches!(err, ManagerError::NoTitleMatches));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        err.to_string(),
        "No books found with the given title fragment."
    );
}
