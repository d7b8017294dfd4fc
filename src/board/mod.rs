//! Board module for clubboard.
//!
//! Messages tagged with a club, the feed query model, and the posting
//! service.

mod feed;
mod message;
mod message_repository;
mod service;

pub use feed::{FeedMode, FeedQuery};
pub use message::{Message, NewMessage};
pub use message_repository::MessageRepository;
pub use service::{BoardService, PostError, PostRequest};
