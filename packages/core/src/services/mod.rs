pub mod explorer;

#[cfg(test)]
pub mod mock_explorer;
