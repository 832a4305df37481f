//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Multi-statement mutations open their own
//! transaction so callers never observe a partial write.

pub mod client_repo;
pub mod member_repo;
pub mod project_repo;
pub mod share_link_repo;
pub mod update_repo;
pub mod user_repo;
pub mod waitlist_repo;

pub use client_repo::ClientRepo;
pub use member_repo::MemberRepo;
pub use project_repo::ProjectRepo;
pub use share_link_repo::ShareLinkRepo;
pub use update_repo::UpdateRepo;
pub use user_repo::UserRepo;
pub use waitlist_repo::WaitlistRepo;
