// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    step_failure = { 1, 1 },
    preserved    = { 42, 42 },
    timeout      = { 124, 124 },
    zero         = { 0, 1 },
    signalled    = { -1, 1 },
    too_large    = { 300, 1 },
)]
fn status_for_return_code(return_code: i32, expected: i32) {
    assert_eq!(ExitError::status_for(return_code), expected);
}

#[test]
fn quiet_has_no_message() {
    let err = ExitError::quiet(3);
    assert_eq!(err.code, 3);
    assert_eq!(err.to_string(), "");
}
