//! Integration tests for loopviz.

mod helpers;

mod cli_test;
mod playback_test;
mod scenario_test;
