pub(crate) mod fixtures;
mod mock_backend;
