pub mod complete;
pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

// Re-export handler functions for use in routing
pub use complete::complete_todo;
pub use create::create_todo;
pub use delete::delete_todo;
pub use list::read_todos;
pub use show::read_todo;
pub use update::update_todo;
