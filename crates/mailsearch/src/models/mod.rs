mod record;
mod resource;

pub use record::{MessageDetail, MessageRecord, SearchRecord, ThreadRecord};
pub use resource::Resource;
