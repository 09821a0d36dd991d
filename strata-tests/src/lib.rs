mod instantiate;
mod nullability;
mod person;
mod round_trip;
mod topic;

use crate::{
    instantiate::{instantiate, projection_subsets},
    nullability::nullability,
    person::person,
    round_trip::round_trip,
    topic::{ranked_topic, topic},
};
use log::LevelFilter;
use std::env;
use strata::Connection;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub fn execute_tests<C: Connection>(mut connection: C) {
    instantiate(&mut connection);
    projection_subsets(&mut connection);
    topic(&mut connection);
    ranked_topic(&mut connection);
    person(&mut connection);
    nullability(&mut connection);
    round_trip(&mut connection);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
