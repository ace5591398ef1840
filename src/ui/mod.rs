pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{failure, header, info, status, success, warn};
pub use table::{schema_table, table_list};
pub use theme::{Theme, theme};
