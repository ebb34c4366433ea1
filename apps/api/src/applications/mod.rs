// Application tracking: one record per "apply" action on a listing, read back newest first.

pub mod handlers;
pub mod store;
pub mod tracker;
