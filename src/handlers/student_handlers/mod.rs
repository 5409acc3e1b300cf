pub mod crud;
pub mod helpers;
pub mod list;

pub use self::crud::{create, delete, edit_form, new_form, update};
pub use self::list::list;
