pub mod detail;
pub mod images;
pub mod list;
pub mod monitoring;
pub mod roster;

pub use self::detail::detail;
pub use self::images::images;
pub use self::list::list;
pub use self::monitoring::toggle;
pub use self::roster::{add_student, remove_student};
