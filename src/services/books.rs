//! Book management service

use crate::{
    error::AppResult,
    models::book::{Book, BookChanges, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let book = self.repository.books.create(data).await?;
        tracing::info!(book_id = book.id, "Book created");
        Ok(book)
    }

    /// Apply an update payload. Missing and empty fields keep their stored value.
    pub async fn update(&self, id: i64, data: UpdateBook) -> AppResult<Book> {
        let changes = BookChanges::from(data);
        if changes.is_empty() {
            tracing::debug!(book_id = id, "Update carries no changes");
        }

        let book = self.repository.books.update(id, &changes).await?;
        tracing::info!(book_id = book.id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
