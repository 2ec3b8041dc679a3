//! Local artifact cache and the verifying fetch.
//!
//! Layout: `<root>/<arch>/<file_name>`. A cached file is only returned after
//! it verifies against its record; anything else is deleted and fetched
//! again.

mod fetch;
mod layout;

pub use fetch::{fetch, FetchOptions};
pub use layout::CacheLayout;
