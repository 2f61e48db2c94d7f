pub mod bucket_chain;
pub mod slot_arena;

pub use bucket_chain::{Bucket, BucketChain, BucketChainIter};
pub use slot_arena::{SlotArena, SlotId};
