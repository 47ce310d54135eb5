mod timeouts;

pub use timeouts::StoreTimeouts;
