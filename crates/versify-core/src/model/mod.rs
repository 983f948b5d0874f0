pub mod discography;
pub mod song;

pub use discography::Discography;
pub use song::Song;
