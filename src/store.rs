use tokio::sync::RwLock;

use crate::types::book::{Book, BookPayload};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Book with id {id} not found")]
    NotFound { id: i64 },
}

/// In-memory book collection.
///
/// Every operation holds the lock for its whole duration, so concurrent
/// requests never observe a half applied mutation.
pub struct BookStore {
    holder: RwLock<BookHolder>,
}

struct BookHolder {
    /// Insertion order is listing order.
    records: Vec<Book>,
    /// Never reused, even after deletes.
    next_id: i64,
}

impl BookHolder {
    fn position(&self, id: i64) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|book| book.id == id)
            .ok_or(StoreError::NotFound { id })
    }
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            holder: RwLock::new(BookHolder {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// A store holding the three books the service starts with.
    pub async fn seeded() -> Self {
        let store = Self::new();

        for payload in seed_books() {
            store.create(payload).await;
        }

        store
    }

    pub async fn len(&self) -> usize {
        self.holder.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn list(&self) -> Vec<Book> {
        self.holder.read().await.records.clone()
    }

    pub async fn get(&self, id: i64) -> Result<Book, StoreError> {
        let holder = self.holder.read().await;
        let index = holder.position(id)?;

        Ok(holder.records[index].clone())
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, payload: BookPayload) -> Book {
        let mut holder = self.holder.write().await;

        let id = holder.next_id;
        holder.next_id += 1;

        let book = Book::from_payload(id, payload);
        holder.records.push(book.clone());

        tracing::debug!(id, "Created");

        book
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: BookPayload) -> Result<Book, StoreError> {
        let mut holder = self.holder.write().await;
        let index = holder.position(id)?;

        let book = Book::from_payload(id, payload);
        holder.records[index] = book.clone();

        tracing::debug!("Updated");

        Ok(book)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut holder = self.holder.write().await;
        let index = holder.position(id)?;

        holder.records.remove(index);

        tracing::debug!("Deleted");

        Ok(())
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_books() -> [BookPayload; 3] {
    [
        BookPayload::new("1984", "George Orwell", 1949),
        BookPayload::new("To Kill a Mockingbird", "Harper Lee", 1960),
        BookPayload::new("The Great Gatsby", "F. Scott Fitzgerald", 1925),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> BookPayload {
        BookPayload::new("Dune", "Frank Herbert", 1965)
    }

    #[tokio::test]
    async fn seeded_store_holds_three_books_in_order() {
        let store = BookStore::seeded().await;
        let books = store.list().await;

        let ids: Vec<i64> = books.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(books[0].title, "1984");
        assert_eq!(books[1].author, "Harper Lee");
        assert_eq!(books[2].year, 1925);
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = BookStore::new();

        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_ignores_client_id() {
        let store = BookStore::seeded().await;

        let mut payload = dune();
        payload.id = Some(1);

        let first = store.create(payload).await;
        let second = store.create(dune()).await;

        assert_eq!(first.id, 4);
        assert_eq!(second.id, 5);
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn create_then_get_returns_the_same_fields() {
        let store = BookStore::new();

        let created = store.create(dune()).await;
        let fetched = store.get(created.id).await.expect("Created book not found");

        assert_eq!(created, fetched);
        assert_eq!(fetched.title, "Dune");
        assert_eq!(fetched.author, "Frank Herbert");
        assert_eq!(fetched.year, 1965);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = BookStore::seeded().await;

        assert_eq!(store.get(99).await, Err(StoreError::NotFound { id: 99 }));
    }

    #[tokio::test]
    async fn update_keeps_the_path_id() {
        let store = BookStore::seeded().await;

        let mut payload = BookPayload::new("Nineteen Eighty-Four", "George Orwell", 1949);
        payload.id = Some(42);

        let updated = store.update(1, payload).await.expect("Update failed");

        assert_eq!(updated.id, 1);
        assert_eq!(store.get(1).await, Ok(updated));
        assert_eq!(store.get(42).await, Err(StoreError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn update_unknown_id_does_not_create() {
        let store = BookStore::seeded().await;

        assert_eq!(
            store.update(7, dune()).await,
            Err(StoreError::NotFound { id: 7 })
        );
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn delete_preserves_order_and_never_reuses_ids() {
        let store = BookStore::seeded().await;

        store.delete(2).await.expect("Delete failed");

        let ids: Vec<i64> = store.list().await.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.get(2).await, Err(StoreError::NotFound { id: 2 }));

        store.delete(3).await.expect("Delete failed");
        let created = store.create(dune()).await;
        assert_eq!(created.id, 4);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let store = BookStore::seeded().await;

        store.delete(1).await.expect("Delete failed");

        assert_eq!(store.delete(1).await, Err(StoreError::NotFound { id: 1 }));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn concurrent_creates_get_unique_ids() {
        let store = std::sync::Arc::new(BookStore::seeded().await);

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(dune()).await.id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("Task panicked"));
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 32);
        assert_eq!(store.len().await, 35);
        assert!(ids.iter().all(|id| *id > 3));
    }
}
