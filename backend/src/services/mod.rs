//! Business logic services
//!
//! Services sit between the routes and the repositories: they apply
//! ownership rules, hash passwords, issue tokens and shape records into
//! response types.

pub mod comment;
pub mod like;
pub mod post;
pub mod user;

pub use comment::CommentService;
pub use like::LikeService;
pub use post::PostService;
pub use user::UserService;
