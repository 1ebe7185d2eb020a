pub mod api;
pub mod api_state;
pub mod error;

#[cfg(test)]
pub(crate) mod test_utils;
