//! Catalogue operations.
//!
//! Each entity gets its own `impl Backoffice` block. Mutations take the write
//! gate, validate before any I/O and run their cross-collection writes as a
//! [`Saga`](crate::cascade::Saga).

mod backoffice;
mod categories;
mod municipalities;
mod points_of_interest;
mod provinces;
mod tour_categories;
mod tours;

pub use backoffice::Backoffice;
