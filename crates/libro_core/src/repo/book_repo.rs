//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and title-search APIs over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Book::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Listing and search results are ordered by `title ASC, isbn ASC`.
//! - Title search folds case in Rust; SQLite `LIKE` only folds ASCII.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::book::{Book, BookValidationError};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    isbn,
    title,
    author,
    year_published,
    genre,
    pages,
    price
FROM books";

const BOOK_ORDER_SQL: &str = "ORDER BY title ASC, isbn ASC";

const REQUIRED_BOOK_COLUMNS: &[&str] = &[
    "isbn",
    "title",
    "author",
    "year_published",
    "genre",
    "pages",
    "price",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    /// No stored row matches the ISBN.
    NotFound(String),
    /// A row with the ISBN already exists.
    Duplicate(String),
    InvalidData(String),
    /// Connection has not been migrated to the schema this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(isbn) => write!(f, "book not found: {isbn}"),
            Self::Duplicate(isbn) => write!(f, "book already exists: {isbn}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Storage(value))
    }
}

/// Repository interface for the book catalog, keyed by ISBN.
pub trait BookRepository {
    fn add_book(&self, book: &Book) -> RepoResult<()>;
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    fn delete_book(&self, isbn: &str) -> RepoResult<()>;
    fn get_book(&self, isbn: &str) -> RepoResult<Option<Book>>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Case-insensitive substring match on `title`, folding Unicode case.
    /// The fragment is matched literally.
    fn search_by_title(&self, fragment: &str) -> RepoResult<Vec<Book>>;
    fn count_books(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository borrowing an opened catalog connection.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Wraps a connection after checking it carries the current schema.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when `user_version` differs
    ///   from the latest migration.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   when the `books` table shape is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_books_schema(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn add_book(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        self.conn
            .execute(
                "INSERT INTO books (
                    isbn,
                    title,
                    author,
                    year_published,
                    genre,
                    pages,
                    price
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    book.isbn.as_str(),
                    book.title.as_str(),
                    book.author.as_str(),
                    book.year_published,
                    book.genre.as_str(),
                    book.pages,
                    book.price,
                ],
            )
            .map_err(|err| map_insert_error(err, &book.isbn))?;

        Ok(())
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                author = ?2,
                year_published = ?3,
                genre = ?4,
                pages = ?5,
                price = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE isbn = ?7;",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.year_published,
                book.genre.as_str(),
                book.pages,
                book.price,
                book.isbn.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(book.isbn.clone()));
        }

        Ok(())
    }

    fn delete_book(&self, isbn: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE isbn = ?1;", [isbn])?;

        if changed == 0 {
            return Err(RepoError::NotFound(isbn.to_string()));
        }

        Ok(())
    }

    fn get_book(&self, isbn: &str) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE isbn = ?1;"))?;

        let mut rows = stmt.query([isbn])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} {BOOK_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        collect_books(&mut rows)
    }

    fn search_by_title(&self, fragment: &str) -> RepoResult<Vec<Book>> {
        let needle = fragment.to_lowercase();
        let mut books = self.list_books()?;
        books.retain(|book| title_contains(&book.title, &needle));
        Ok(books)
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative book count `{count}`")))
    }
}

fn ensure_books_schema(conn: &Connection) -> RepoResult<()> {
    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'books'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("books"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('books');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in REQUIRED_BOOK_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "books",
                column,
            });
        }
    }

    Ok(())
}

fn collect_books(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let book = Book {
        isbn: row.get("isbn")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year_published: row.get("year_published")?,
        genre: row.get("genre")?,
        pages: row.get("pages")?,
        price: row.get("price")?,
    };

    book.validate()
        .map_err(|err| RepoError::InvalidData(format!("book `{}`: {err}", book.isbn)))?;
    Ok(book)
}

fn map_insert_error(err: rusqlite::Error, isbn: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepoError::Duplicate(isbn.to_string())
        }
        _ => err.into(),
    }
}

/// Unicode case-insensitive containment; `needle` is already lowercase.
fn title_contains(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}
