pub mod contact;
pub mod dom;
pub mod events;
pub mod page;
pub mod storage;
