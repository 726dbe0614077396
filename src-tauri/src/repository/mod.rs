//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod document_repo;
mod traits;


pub use db::{init_db, DbConn};
pub use document_repo::SqliteDocumentRepository;
pub use traits::{DocumentRepository, Mutation};
