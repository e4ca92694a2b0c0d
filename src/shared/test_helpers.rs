#[cfg(test)]
pub use fake::*;
