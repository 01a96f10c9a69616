//! Helpers shared by the unit tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::player::Player;

static INITIALIZED: OnceCell<()> = OnceCell::new();

const NAMES: [&str; 8] = ["Ann", "Bob", "Cat", "Dan", "Eve", "Fay", "Gus", "Hal"];

/// Installs a test-writer subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Roster of `count` players with ids `p1..` and short names.
pub fn players(count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| Player::new(format!("p{}", i + 1), NAMES[i % NAMES.len()]))
        .collect()
}
