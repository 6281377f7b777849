//! Integration tests for midiplay

mod helpers;

mod cli_test;
mod config_test;
mod convert_test;
mod media_test;
