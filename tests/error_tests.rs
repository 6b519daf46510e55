// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_literal_inliner::error::{
    config_error, empty_state_set, file_read_error, parameter_error, position_out_of_range
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/query.sql", io_error);
    let _msg = error.to_string();
}

#[test]
fn test_position_out_of_range() {
    let error = position_out_of_range(10, 3);
    let _msg = error.to_string();
}

#[test]
fn test_empty_state_set() {
    let error = empty_state_set();
    let _msg = error.to_string();
}

#[test]
fn test_parameter_error() {
    let error = parameter_error("p0", "expected a int value");
    let _msg = error.to_string();
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid configuration value");
    let _msg = error.to_string();
}

#[test]
fn test_errors_are_debug() {
    let error = parameter_error("p0", String::from("bad"));
    assert!(!format!("{:?}", error).is_empty());
}
