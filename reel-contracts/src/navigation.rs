/// Out-of-band address updates.
///
/// The feed owns its state; the address bar only mirrors it. Implementations
/// must replace the current history entry and must not trigger a route change
/// or remount.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait NavigationPort: Send {
    fn replace_path(&mut self, path: &str);
}
