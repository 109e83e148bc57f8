// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the process-wide configuration store.
//!
//! Everything runs in one test so `reset` cannot race with other tests.

mod common;

use common::{nested, write_config};
use layercfg::service::global;
use tempfile::TempDir;

#[test]
fn test_global_lifecycle() {
    global::reset();
    assert!(global::all_keys().is_empty());

    global::set_default("server.port", 8080);
    global::set_default("server.host", "localhost");
    assert_eq!(global::get_int("server.port"), 8080);

    global::register_alias("port", "server.port");
    global::set("port", 9090);
    assert_eq!(global::get_int("server.port"), 9090);
    assert!(global::is_set("PORT"));

    global::set(
        "limits",
        nested(vec![("upload", layercfg::domain::ConfigValue::from("1MB"))]),
    );
    assert_eq!(global::get_size_in_bytes("limits.upload"), 1024 * 1024);
    assert_eq!(global::get_string_map("limits").len(), 1);

    #[cfg(feature = "yaml")]
    {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "config.yaml", "server:\n  host: example.org\n");
        global::add_config_path(dir.path());
        global::read_in_config().unwrap();

        assert!(global::in_config("server"));
        assert_eq!(global::get_string("server.host"), "example.org");
        assert_eq!(
            global::config_file_used(),
            Some(dir.path().join("config.yaml"))
        );
    }

    global::reset();
    assert!(!global::is_set("server.port"));
    assert!(global::config_file_used().is_none());
    assert!(global::all_settings().is_empty());
}
