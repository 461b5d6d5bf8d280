//! Repository structs, one per table.
//!
//! Repositories are zero-sized types with associated async functions that
//! take either a pool (reads, single-statement writes) or a `&mut
//! PgConnection` borrowed from an open transaction (multi-statement writes).

pub mod actor_repo;
pub mod movie_actor_repo;
pub mod movie_repo;

pub use actor_repo::ActorRepo;
pub use movie_actor_repo::MovieActorRepo;
pub use movie_repo::MovieRepo;
