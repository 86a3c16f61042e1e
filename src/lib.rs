pub mod change;
pub mod cli;
pub mod collect;
pub mod config;
pub mod daily;
pub mod error;
pub mod ingest;
pub mod model;
pub mod render;
pub mod series;
pub mod util;
pub mod weekly;
