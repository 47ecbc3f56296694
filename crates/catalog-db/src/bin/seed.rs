//! # Seed Data Generator
//!
//! Populates the database with demo books and authors for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 books (default)
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//! ```
//!
//! ## Generated Data
//! Books are registered through `RegistrationService`, so the usual rules
//! apply: authors with the same name and birthdate are shared between books,
//! and every book gets one to three authors.

use std::env;

use catalog_core::{AuthorEntry, BookRequest, RegistrationService, Stores};
use catalog_db::{Database, DbConfig};
use chrono::NaiveDate;

/// Title stems combined with a volume number.
const TITLE_STEMS: &[&str] = &[
    "The Ownership Model",
    "Fearless Concurrency",
    "Zero-Cost Abstractions",
    "Async in Practice",
    "Lifetimes Explained",
    "Trait Objects and You",
    "Macros by Example",
    "Systems Programming Basics",
    "Embedded Adventures",
    "The Borrow Checker Diaries",
];

/// Author pool: (name, year, month, day).
const AUTHORS: &[(&str, i32, u32, u32)] = &[
    ("Jane Doe", 1970, 1, 1),
    ("John Smith", 1965, 4, 12),
    ("Akira Tanaka", 1982, 9, 30),
    ("Maria Garcia", 1990, 2, 14),
    ("Olu Adeyemi", 1978, 11, 5),
    ("Priya Patel", 1985, 7, 21),
    ("Lena Novak", 1993, 3, 8),
    ("Jane Doe", 1985, 6, 1),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./catalog_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Book Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of books to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./catalog_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Book Catalog Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Books:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.books().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} books", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let books = db.books();
    let authors = db.authors();
    let links = db.book_authors();
    let service = RegistrationService::new(Stores::new(&books, &authors, &links));

    println!();
    println!("Registering books...");

    let start = std::time::Instant::now();
    let mut generated = 0;
    for seed in 0..count {
        let request = generate_book(seed)?;
        if let Err(e) = service.register_book(&request).await {
            eprintln!("Failed to register '{}': {}", request.title, e);
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Registered {} books...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Registered {} books in {:?}", generated, elapsed);
    println!("  Authors: {}", db.authors().count().await?);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds a deterministic registration request for `seed`.
fn generate_book(seed: usize) -> Result<BookRequest, String> {
    let stem = TITLE_STEMS[seed % TITLE_STEMS.len()];
    let title = format!("{}, Vol. {}", stem, seed / TITLE_STEMS.len() + 1);

    let author_count = 1 + seed % 3;
    let mut entries = Vec::with_capacity(author_count);
    for offset in 0..author_count {
        let (name, y, m, d) = AUTHORS[(seed + offset * 3) % AUTHORS.len()];
        let birthdate = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| format!("invalid birthdate for {}", name))?;
        entries.push(AuthorEntry::New {
            name: name.to_string(),
            birthdate,
        });
    }

    Ok(BookRequest {
        title,
        price: 990 + ((seed * 37) % 4000) as i64,
        is_published: Some(seed % 5 != 0),
        authors: entries,
    })
}
