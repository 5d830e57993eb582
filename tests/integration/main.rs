//! Integration tests for Sumi-Drift

mod crawl_tests;
