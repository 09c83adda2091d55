pub mod http;
pub mod local;

pub use http::{HttpSource, DEFAULT_UPSTREAM_URL};
pub use local::{FileSource, StaticSource};

pub mod prelude {
    pub use super::{FileSource, HttpSource, StaticSource};
    pub use rh_core::{ArticleSource, Error, Result};
}
