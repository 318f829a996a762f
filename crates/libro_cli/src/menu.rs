//! Numbered text menu over the catalog manager.
//!
//! Every manager error is printed as its fixed message; the loop only ends
//! on `0` or end of input.

use libro_core::{Book, BookManager, BookRepository};
use std::io::{self, BufRead, Write};

const MENU: &str = "\
1) List all books
2) Find book by ISBN
3) Search books by title
4) Add book
5) Update book
6) Delete book
0) Exit";

/// Runs the menu until the user exits or input ends.
pub fn run<R, I, O>(manager: &BookManager<R>, mut input: I, mut output: O) -> io::Result<()>
where
    R: BookRepository,
    I: BufRead,
    O: Write,
{
    writeln!(output, "Libro catalog {}", libro_core::core_version())?;
    loop {
        writeln!(output, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut output, "> ")? else {
            return Ok(());
        };

        match choice.trim() {
            "0" => return Ok(()),
            "1" => match manager.get_all() {
                Ok(books) => print_books(&mut output, &books)?,
                Err(err) => writeln!(output, "{err}")?,
            },
            "2" => {
                let Some(isbn) = prompt(&mut input, &mut output, "ISBN: ")? else {
                    return Ok(());
                };
                match manager.get_specific(&isbn) {
                    Ok(book) => print_books(&mut output, std::slice::from_ref(&book))?,
                    Err(err) => writeln!(output, "{err}")?,
                }
            }
            "3" => {
                let Some(fragment) = prompt(&mut input, &mut output, "Title fragment: ")? else {
                    return Ok(());
                };
                match manager.search_by_title(&fragment) {
                    Ok(books) => print_books(&mut output, &books)?,
                    Err(err) => writeln!(output, "{err}")?,
                }
            }
            "4" | "5" => {
                let Some(entry) = prompt_book(&mut input, &mut output)? else {
                    return Ok(());
                };
                let Some(book) = entry else {
                    writeln!(output, "Book is invalid.")?;
                    continue;
                };
                let (result, done) = if choice.trim() == "4" {
                    (manager.add(&book), "Book added.")
                } else {
                    (manager.update(&book), "Book updated.")
                };
                match result {
                    Ok(()) => writeln!(output, "{done}")?,
                    Err(err) => writeln!(output, "{err}")?,
                }
            }
            "6" => {
                let Some(isbn) = prompt(&mut input, &mut output, "ISBN: ")? else {
                    return Ok(());
                };
                match manager.delete(&isbn) {
                    Ok(()) => writeln!(output, "Book deleted.")?,
                    Err(err) => writeln!(output, "{err}")?,
                }
            }
            other => writeln!(output, "Unknown option `{other}`.")?,
        }
    }
}

/// Reads one line after printing `label`; `None` at end of input.
fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// Collects book fields. Outer `None` means end of input; inner `None`
/// means a numeric field could not be parsed.
fn prompt_book<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
) -> io::Result<Option<Option<Book>>> {
    let mut fields = Vec::with_capacity(7);
    for label in [
        "Title: ",
        "Author: ",
        "ISBN: ",
        "Year published: ",
        "Genre: ",
        "Pages: ",
        "Price: ",
    ] {
        match prompt(input, output, label)? {
            Some(value) => fields.push(value),
            None => return Ok(None),
        }
    }

    let (Ok(year_published), Ok(pages), Ok(price)) = (
        fields[3].trim().parse::<i32>(),
        fields[5].trim().parse::<i32>(),
        fields[6].trim().parse::<f64>(),
    ) else {
        return Ok(Some(None));
    };

    Ok(Some(Some(Book {
        title: fields[0].clone(),
        author: fields[1].clone(),
        isbn: fields[2].clone(),
        year_published,
        genre: fields[4].clone(),
        pages,
        price,
    })))
}

fn print_books<O: Write>(output: &mut O, books: &[Book]) -> io::Result<()> {
    for book in books {
        writeln!(
            output,
            "{} | {} | {} | {} | {} | {} pages | {:.2}",
            book.isbn,
            book.title,
            book.author,
            book.year_published,
            book.genre,
            book.pages,
            book.price
        )?;
    }
    Ok(())
}
