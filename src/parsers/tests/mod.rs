
mod locator_tests;
