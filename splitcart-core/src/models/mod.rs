mod item;
mod list;

pub use item::Item;
pub use list::{normalize_list_name, List, SharePayload, DEFAULT_LIST_NAME, FALLBACK_LIST_NAME};
