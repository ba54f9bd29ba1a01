pub mod support;

mod feed_tests;
