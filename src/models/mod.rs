pub mod message;
pub mod todo;

pub use message::{DELETED_MESSAGE, MessageResponse, WELCOME_MESSAGE};
pub use todo::{NewTodoRequest, Todo, UpdateTodoRequest};
