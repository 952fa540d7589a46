pub mod instance_created;
pub mod membership;
pub mod prewarm;
