//! Integration tests for link resolution, maintenance and configuration

mod include_links;
mod scanner_completeness;
mod test_utils;
