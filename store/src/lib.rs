pub mod collection;
pub mod session;

mod storage;
pub use storage::{KeyValueStorage, MemoryStorage};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use collection::{Collection, Keyed};
pub use session::{Session, REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};
