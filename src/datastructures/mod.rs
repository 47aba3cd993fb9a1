pub mod input;
pub mod ram_store;
pub mod ring_buffer;
