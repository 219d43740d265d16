mod book;
mod isbn;
mod lend;
mod patron;

pub use self::book::Book;
pub use self::isbn::{InvalidIsbn, Isbn};
pub use self::lend::Lend;
pub use self::patron::PatronId;
