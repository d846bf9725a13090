//! Integration tests against an in-process ILS stand-in

mod api_tests;
mod resolver_tests;
mod support;
