/// Initializes structured logging for the whole process.
///
/// Filtering is environment-based via `RUST_LOG`:
/// - `RUST_LOG=info` - lifecycle events and acknowledged saves
/// - `RUST_LOG=debug` - every edit, commit, and payload
/// - `RUST_LOG=game_editor=debug` - debug only for this crate
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
