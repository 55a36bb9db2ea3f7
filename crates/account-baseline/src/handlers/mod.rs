//! Account baseline handlers
//!
//! Every handler takes the event produced by the previous one and returns a
//! new event. A handler whose configuration section is absent returns its
//! input unchanged without touching AWS.

mod default_vpc;
mod ebs;
mod imdsv2;
mod load_config;
mod password_policy;
mod s3;

pub use default_vpc::default_vpc;
pub use ebs::ebs_block_public_access;
pub use imdsv2::imdsv2;
pub use load_config::load_config;
pub use password_policy::password_policy;
pub use s3::s3_block_public_access;
