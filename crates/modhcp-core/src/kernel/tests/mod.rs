pub mod bootstrap_tests;
pub mod lifecycle_tests;
