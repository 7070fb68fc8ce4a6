//! Unit tests for the login-code service module

mod store_tests;
