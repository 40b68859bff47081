pub mod checksum;
pub mod limit_read;
