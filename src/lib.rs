pub mod analysis;
pub mod config;
pub mod http_client;
pub mod match_table;
pub mod render;
pub mod report_export;
pub mod sofascore_fetch;
pub mod web;
