pub mod docstore_repo;

pub use docstore_repo::{DocstoreGenresRepository, DocstoreMoviesRepository};
