//! MessageStore の具体的な実装

pub mod inmemory;

pub use inmemory::InMemoryMessageStore;
