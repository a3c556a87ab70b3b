/*! Integration tests for Postbox.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * - store: JsonFileStore initialization, load/save and restart behavior
 * - relay: the UDP listener end to end, including malformed datagrams
 * - frontend: the HTTP routing table and the form-to-relay path
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("postbox=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod relay;
