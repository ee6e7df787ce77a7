//! Repository for the `documents` table.
//!
//! Every mutating method runs in a single `BEGIN IMMEDIATE` transaction, so
//! a failure never leaves a half-written tree behind and concurrent writers
//! queue on the database lock instead of failing mid-transaction.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use docver_core::document::{prepare_fields, DocumentFields, DOCUMENT_ENTITY};
use docver_core::error::CoreError;
use docver_core::types::DbId;
use docver_core::version_tree::VersionTree;

use crate::error::StoreError;
use crate::models::document::{CreateDocument, Document, DocumentEdge};

/// Column list for documents queries.
const COLUMNS: &str = "id, title, content, created_at, parent_id";

/// Upper bound on ids bound into a single `IN (...)` list.
const MAX_IDS_PER_QUERY: usize = 500;

/// Takes the write lock up front. A deferred transaction that reads first
/// cannot upgrade while another writer holds the lock.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// Provides storage operations for the document version forest.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new root document.
    pub async fn create_root(
        pool: &SqlitePool,
        input: &CreateDocument,
    ) -> Result<Document, StoreError> {
        let fields = prepare_fields(&input.title, &input.content)?;
        let mut tx = pool.begin_with(BEGIN_WRITE).await?;
        let document = insert(&mut tx, &fields, None).await?;
        tx.commit().await?;
        Ok(document)
    }

    /// Insert a new version as a child of `parent_id`.
    ///
    /// The parent lookup and the insert share one transaction. A missing
    /// parent is reported before invalid fields.
    pub async fn create_version(
        pool: &SqlitePool,
        parent_id: DbId,
        input: &CreateDocument,
    ) -> Result<Document, StoreError> {
        let mut tx = pool.begin_with(BEGIN_WRITE).await?;
        if find_edge(&mut tx, parent_id).await?.is_none() {
            return Err(not_found(parent_id));
        }
        let fields = prepare_fields(&input.title, &input.content)?;
        let document = insert(&mut tx, &fields, Some(parent_id)).await?;
        tx.commit().await?;
        Ok(document)
    }

    /// Find a document by its primary key.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = ?");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Like [`find_by_id`](Self::find_by_id) but a missing row is an error.
    pub async fn get(pool: &SqlitePool, id: DbId) -> Result<Document, StoreError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// All root documents in creation order.
    pub async fn list_roots(pool: &SqlitePool) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE parent_id IS NULL ORDER BY id");
        sqlx::query_as::<_, Document>(&query).fetch_all(pool).await
    }

    /// A document together with its parent, read from one snapshot.
    ///
    /// The parent is `None` for roots.
    pub async fn get_with_parent(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<(Document, Option<Document>), StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = ?");
        let mut tx = pool.begin().await?;
        let document = sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found(id))?;
        let parent = match document.parent_id {
            Some(parent_id) => Some(
                sqlx::query_as::<_, Document>(&query)
                    .bind(parent_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        StoreError::Core(CoreError::Internal(format!(
                            "Parent {parent_id} of document {id} is missing"
                        )))
                    })?,
            ),
            None => None,
        };
        tx.commit().await?;
        Ok((document, parent))
    }

    /// A document and all of its descendants, ordered by id.
    pub async fn list_subtree(
        pool: &SqlitePool,
        root_id: DbId,
    ) -> Result<Vec<Document>, StoreError> {
        let mut tx = pool.begin().await?;
        let root = find_edge(&mut tx, root_id)
            .await?
            .ok_or_else(|| not_found(root_id))?;
        let edges = collect_subtree_edges(&mut tx, root).await?;
        let ids: Vec<DbId> = edges.iter().map(|edge| edge.id).collect();

        let mut documents = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new(format!("SELECT {COLUMNS} FROM documents WHERE id IN ("));
            {
                let mut separated = builder.separated(", ");
                for id in chunk {
                    separated.push_bind(*id);
                }
                separated.push_unseparated(")");
            }
            let rows: Vec<Document> = builder.build_query_as().fetch_all(&mut *tx).await?;
            documents.extend(rows);
        }
        tx.commit().await?;

        documents.sort_by_key(|document| document.id);
        Ok(documents)
    }

    /// Delete a document together with every descendant.
    ///
    /// The subtree is collected level by level, then removed leaves-first,
    /// all inside one transaction. Returns the removed ids in deletion order.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Vec<DbId>, StoreError> {
        let mut tx = pool.begin_with(BEGIN_WRITE).await?;
        let root = find_edge(&mut tx, id).await?.ok_or_else(|| not_found(id))?;
        let edges = collect_subtree_edges(&mut tx, root).await?;
        let tree = VersionTree::from_edges(edges.iter().map(|edge| (edge.id, edge.parent_id)));
        let order = tree.subtree_post_order(id);

        for doc_id in &order {
            sqlx::query("DELETE FROM documents WHERE id = ?")
                .bind(*doc_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!(document_id = id, deleted_count = order.len(), "Subtree deleted");
        Ok(order)
    }

    /// Remove every document. Returns the number of rows deleted.
    pub async fn delete_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> StoreError {
    StoreError::Core(CoreError::NotFound {
        entity: DOCUMENT_ENTITY,
        id,
    })
}

async fn insert(
    conn: &mut SqliteConnection,
    fields: &DocumentFields,
    parent_id: Option<DbId>,
) -> Result<Document, sqlx::Error> {
    let query = format!(
        "INSERT INTO documents (title, content, created_at, parent_id)
         VALUES (?, ?, ?, ?)
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Document>(&query)
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(Utc::now())
        .bind(parent_id)
        .fetch_one(&mut *conn)
        .await
}

async fn find_edge(
    conn: &mut SqliteConnection,
    id: DbId,
) -> Result<Option<DocumentEdge>, sqlx::Error> {
    sqlx::query_as::<_, DocumentEdge>("SELECT id, parent_id FROM documents WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Walk the tree below `root` one level at a time. The result starts with
/// `root` and lists each level in id order.
async fn collect_subtree_edges(
    conn: &mut SqliteConnection,
    root: DocumentEdge,
) -> Result<Vec<DocumentEdge>, sqlx::Error> {
    let mut edges = vec![root];
    let mut frontier = vec![root.id];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for chunk in frontier.chunks(MAX_IDS_PER_QUERY) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT id, parent_id FROM documents WHERE parent_id IN (");
            {
                let mut separated = builder.separated(", ");
                for id in chunk {
                    separated.push_bind(*id);
                }
                separated.push_unseparated(") ORDER BY id");
            }
            let children: Vec<DocumentEdge> =
                builder.build_query_as().fetch_all(&mut *conn).await?;
            next.extend(children);
        }
        frontier = next.iter().map(|edge| edge.id).collect();
        edges.extend(next);
    }

    Ok(edges)
}
