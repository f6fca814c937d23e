mod leetify;

pub use leetify::LeetifyClient;
