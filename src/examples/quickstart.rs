//! Quickstart Example
//!
//! Creates a collection, indexes a book, searches for it and cleans up.
//! Needs a Typesense server on localhost:8108.
//!
//! Run with: cargo run --example quickstart

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use typesense_rs::{Client, ClientError, CollectionSchema, Field, Node, SearchOptions};

#[derive(Debug, Serialize, Deserialize)]
struct Book {
    id: String,
    title: String,
    authors: Vec<String>,
    publication_year: i32,
    ratings_count: i32,
    authors_facet: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typesense_rs=debug")),
        )
        .with_target(false)
        .init();

    let api_key = std::env::var("TYPESENSE_API_KEY").unwrap_or_else(|_| "xyz".to_string());
    let client = Client::new(
        Node::new("localhost", 8108, "http", api_key),
        Duration::from_secs(2),
        vec![],
    )
    .await?;
    println!("Connected to Typesense {}\n", client.debug_info().await?);

    let schema = CollectionSchema::new(
        "books",
        vec![
            Field::new("title", "string"),
            Field::new("authors", "string[]"),
            Field::new("publication_year", "int32"),
            Field::new("ratings_count", "int32"),
            Field::facet("authors_facet", "string[]"),
        ],
    )
    .with_default_sorting_field("ratings_count");

    match client.create_collection(&schema).await {
        Ok(collection) => println!("Created collection {}", collection.schema.name),
        Err(ClientError::CollectionDuplicate) => println!("Collection books already exists"),
        Err(e) => return Err(e.into()),
    }

    let book = Book {
        id: "1".to_string(),
        title: "The Go Programming Language".to_string(),
        authors: vec!["Alan Donovan".to_string(), "Brian Kernighan".to_string()],
        publication_year: 2015,
        ratings_count: 480,
        authors_facet: vec!["Alan Donovan".to_string(), "Brian Kernighan".to_string()],
    };
    let indexed: Book = client.index_document("books", &book).await.decode()?;
    println!("Indexed document {}", indexed.id);

    let options = SearchOptions {
        facet_by: vec!["authors_facet".to_string()],
        sort_by: vec!["ratings_count:desc".to_string()],
        per_page: Some(10),
        ..Default::default()
    };
    let result = client
        .search("books", "programming", &["title"], Some(options))
        .await?;
    println!("\nFound {} books:", result.found);
    for hit in &result.hits {
        let book: Book = serde_json::from_value(serde_json::Value::Object(hit.document.clone()))?;
        println!("  {} ({})", book.title, book.publication_year);
    }

    client.delete_collection("books").await?;
    println!("\nDeleted collection books");

    Ok(())
}
