pub mod catalog;
pub mod clipboard;
pub mod features;
pub mod notify;
pub mod speech;

#[cfg(test)]
pub(crate) mod testing;
