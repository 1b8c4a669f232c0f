pub mod manager;
pub mod models;
pub mod schema;
pub mod todo_repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use todo_repository::TodoRepository;
