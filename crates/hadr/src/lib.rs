#![doc(html_no_source)]

mod hadr;
pub use hadr::Hadr;

// Reexport all crates
pub use hadr_pow;
pub use hadr_time;
