pub mod message_tests;
