//! Books repository for database operations

use sqlx::{sqlite::SqliteRow, FromRow, Pool, Row, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookChanges, CreateBook},
};

impl<'r> FromRow<'r, SqliteRow> for Book {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Book {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            description: row.try_get("description")?,
        })
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT id, title, author, description FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(AppError::book_not_found)
    }

    /// List all books in storage order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author, description FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Insert a book and return it with its assigned id
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        // RETURNING statements must run to completion before the commit
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, description)
            VALUES (?, ?, ?)
            RETURNING id, title, author, description
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.description)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal("Insert returned no row".to_string()))?;

        tx.commit().await?;
        Ok(book)
    }

    /// Overwrite the supplied fields of a book in a single statement
    pub async fn update(&self, id: i64, changes: &BookChanges) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE(?, title),
                author = COALESCE(?, author),
                description = COALESCE(?, description)
            WHERE id = ?
            RETURNING id, title, author, description
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.description)
        .bind(id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .next()
        .ok_or_else(AppError::book_not_found)?;

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::book_not_found());
        }
        Ok(())
    }
}
