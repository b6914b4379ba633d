//! Terminal session management.
//!
//! A session is an interactive shell the runner can send command text to.
//! [`SessionProvider`] is the seam between the executor and the host: it
//! hands out opaque [`SessionId`]s, acquires sessions by name or by
//! "currently active", and delivers one-shot close notifications.
//!
//! The production [`ShellSessionProvider`] spawns one shell process per
//! session with a piped stdin and inherited stdout/stderr. A waiter thread
//! per session fires the registered close handlers exactly once when the
//! shell process exits.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use log::debug;

use crate::config::{expand_working_directory, DEFAULT_SHELL};
use crate::definitions::SessionOptions;
use crate::error::{Error, Result};

/// Opaque handle for one session instance. Ids are never reused by a
/// provider, so a handle to a closed session stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Mints a handle from a raw id. Providers outside this crate (hosts,
    /// test doubles) need this; the engine itself never inspects the value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Callback fired once when a specific session closes. It receives the
/// provider so it can inspect the remaining sessions.
pub type CloseHandler = Box<dyn FnOnce(&dyn SessionProvider) + Send>;

/// The operations the executor needs from a terminal host.
pub trait SessionProvider {
    /// A live session with exactly this name, if one exists.
    fn find(&self, name: &str) -> Option<SessionId>;

    /// The currently active session, if any.
    fn active(&self) -> Option<SessionId>;

    /// Creates a new session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionUnavailable`] if the session cannot be
    /// started.
    fn create(&self, options: &SessionOptions) -> Result<SessionId>;

    /// Brings the session to the foreground.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is no longer live.
    fn show(&self, session: SessionId) -> Result<()>;

    /// Clears the session's visible content.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is no longer live.
    fn clear(&self, session: SessionId) -> Result<()>;

    /// Sends one line of text to the session's shell.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is no longer live or its input
    /// channel fails.
    fn send_text(&self, session: SessionId, text: &str) -> Result<()>;

    /// Asks the host to maximize the panel containing the sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the request.
    fn maximize_panel(&self) -> Result<()>;

    /// Asks the host to toggle terminal panel visibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the request.
    fn toggle_panel(&self) -> Result<()>;

    /// Registers a one-shot close handler scoped to `session`. The handler
    /// fires exactly once, never for any other session; registering against
    /// an already closed session fires it immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot accept the registration.
    fn on_close(&self, session: SessionId, handler: CloseHandler) -> Result<()>;
}

/// Find-or-create acquisition: a named request reuses the live session with
/// that exact name, an unnamed request reuses whatever is active. A new
/// session is created only when no match exists.
///
/// # Errors
///
/// Propagates the provider's creation failure.
pub fn find_or_create(
    provider: &dyn SessionProvider,
    options: &SessionOptions,
) -> Result<SessionId> {
    if let Some(name) = &options.name {
        if let Some(existing) = provider.find(name) {
            debug!("Reusing terminal session `{name}`");
            return Ok(existing);
        }
        return provider.create(options);
    }

    match provider.active() {
        Some(active) => Ok(active),
        None => provider.create(options),
    }
}

struct ShellSession {
    id: SessionId,
    name: Option<String>,
    stdin: std::process::ChildStdin,
    handlers: Vec<CloseHandler>,
}

#[derive(Default)]
struct ProviderState {
    next_id: u64,
    sessions: Vec<ShellSession>,
    active: Option<SessionId>,
    waiters: Vec<thread::JoinHandle<()>>,
}

/// Shell-process-backed [`SessionProvider`].
///
/// Cloning is cheap and shares the session registry; the waiter threads hold
/// a clone so close handlers can observe the surviving sessions.
#[derive(Clone)]
pub struct ShellSessionProvider {
    default_shell: String,
    state: Arc<Mutex<ProviderState>>,
}

impl ShellSessionProvider {
    #[must_use]
    pub fn new(default_shell: String) -> Self {
        Self {
            default_shell,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    /// Builds a provider using `$SHELL`, falling back to [`DEFAULT_SHELL`].
    #[must_use]
    pub fn from_environment() -> Self {
        let shell = std::env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string());
        Self::new(shell)
    }

    fn state(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes the closed session from the registry and hands back its
    /// handlers so they can fire outside the lock.
    fn take_closed(&self, id: SessionId) -> Vec<CloseHandler> {
        let mut state = self.state();

        let Some(position) = state.sessions.iter().position(|s| s.id == id) else {
            return Vec::new();
        };

        let session = state.sessions.remove(position);
        if state.active == Some(id) {
            // The host keeps some terminal focused; fall back to the most
            // recently created survivor.
            state.active = state.sessions.last().map(|s| s.id);
        }

        session.handlers
    }

    fn spawn_waiter(&self, id: SessionId, mut child: Child) {
        let provider = self.clone();
        let handle = thread::spawn(move || {
            let _ = child.wait();
            debug!("Terminal session {id:?} closed");
            for handler in provider.take_closed(id) {
                handler(&provider);
            }
        });
        self.state().waiters.push(handle);
    }

    /// Blocks until every session started by this provider has closed.
    pub fn wait_all(&self) {
        loop {
            let handle = self.state().waiters.pop();
            let Some(handle) = handle else {
                break;
            };
            let _ = handle.join();
        }
    }
}

impl SessionProvider for ShellSessionProvider {
    fn find(&self, name: &str) -> Option<SessionId> {
        self.state()
            .sessions
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
            .map(|s| s.id)
    }

    fn active(&self) -> Option<SessionId> {
        let state = self.state();
        state
            .active
            .filter(|id| state.sessions.iter().any(|s| s.id == *id))
    }

    fn create(&self, options: &SessionOptions) -> Result<SessionId> {
        let shell = options
            .shell
            .clone()
            .unwrap_or_else(|| self.default_shell.clone());

        let mut command = Command::new(&shell);
        // `-i` starts an interactive shell so the user's rc files apply.
        command
            .arg("-i")
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(working_directory) = expand_working_directory(&options.working_directory) {
            command.current_dir(working_directory);
        }

        let mut child = command
            .spawn()
            .map_err(|e| Error::SessionUnavailable(format!("failed to start `{shell}`: {e}")))?;

        let stdin = child.stdin.take().ok_or_else(|| {
            Error::SessionUnavailable(format!("no input channel for `{shell}`"))
        })?;

        let id = {
            let mut state = self.state();
            state.next_id += 1;
            let id = SessionId(state.next_id);
            state.sessions.push(ShellSession {
                id,
                name: options.name.clone(),
                stdin,
                handlers: Vec::new(),
            });
            state.active = Some(id);
            id
        };

        if options.hide_from_user {
            debug!("hide_from_user requested for {id:?}; sessions are always visible");
        }

        self.spawn_waiter(id, child);
        Ok(id)
    }

    fn show(&self, session: SessionId) -> Result<()> {
        let mut state = self.state();
        if !state.sessions.iter().any(|s| s.id == session) {
            return Err(Error::SessionUnavailable(format!(
                "session {session:?} is not live"
            )));
        }

        state.active = Some(session);
        debug!("Focused terminal session {session:?}");
        Ok(())
    }

    fn clear(&self, session: SessionId) -> Result<()> {
        // Running `clear` inside the session resets its visible content.
        self.send_text(session, "clear")
    }

    fn send_text(&self, session: SessionId, text: &str) -> Result<()> {
        let mut state = self.state();
        let Some(live) = state.sessions.iter_mut().find(|s| s.id == session) else {
            return Err(Error::SessionUnavailable(format!(
                "session {session:?} is not live"
            )));
        };

        writeln!(live.stdin, "{text}")?;
        live.stdin.flush()?;
        Ok(())
    }

    fn maximize_panel(&self) -> Result<()> {
        // A plain terminal has no panel to resize; the request is honored as
        // a no-op.
        debug!("Panel maximize requested");
        Ok(())
    }

    fn toggle_panel(&self) -> Result<()> {
        debug!("Panel toggle requested");
        Ok(())
    }

    fn on_close(&self, session: SessionId, handler: CloseHandler) -> Result<()> {
        {
            let mut state = self.state();
            if let Some(live) = state.sessions.iter_mut().find(|s| s.id == session) {
                live.handlers.push(handler);
                return Ok(());
            }
        }

        // Already closed: fire immediately, still exactly once.
        handler(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::mpsc;
    use std::time::Duration;

    /// Scripted provider for the acquisition policy tests.
    #[derive(Default)]
    struct ScriptedProvider {
        named: Vec<(String, SessionId)>,
        active: Option<SessionId>,
        created: RefCell<u64>,
    }

    impl SessionProvider for ScriptedProvider {
        fn find(&self, name: &str) -> Option<SessionId> {
            self.named
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, id)| *id)
        }

        fn active(&self) -> Option<SessionId> {
            self.active
        }

        fn create(&self, _options: &SessionOptions) -> Result<SessionId> {
            let mut created = self.created.borrow_mut();
            *created += 1;
            Ok(SessionId(1000 + *created))
        }

        fn show(&self, _session: SessionId) -> Result<()> {
            Ok(())
        }

        fn clear(&self, _session: SessionId) -> Result<()> {
            Ok(())
        }

        fn send_text(&self, _session: SessionId, _text: &str) -> Result<()> {
            Ok(())
        }

        fn maximize_panel(&self) -> Result<()> {
            Ok(())
        }

        fn toggle_panel(&self) -> Result<()> {
            Ok(())
        }

        fn on_close(&self, _session: SessionId, _handler: CloseHandler) -> Result<()> {
            Ok(())
        }
    }

    fn named_options(name: &str) -> SessionOptions {
        SessionOptions {
            name: Some(name.to_string()),
            ..SessionOptions::default()
        }
    }

    #[test]
    fn test_find_or_create_reuses_named_session() {
        let provider = ScriptedProvider {
            named: vec![("build".to_string(), SessionId(7))],
            ..ScriptedProvider::default()
        };

        let id = find_or_create(&provider, &named_options("build")).unwrap();
        assert_eq!(id, SessionId(7));
        assert_eq!(*provider.created.borrow(), 0);
    }

    #[test]
    fn test_find_or_create_creates_when_name_missing() {
        let provider = ScriptedProvider {
            active: Some(SessionId(3)),
            ..ScriptedProvider::default()
        };

        let id = find_or_create(&provider, &named_options("build")).unwrap();
        assert_ne!(id, SessionId(3));
        assert_eq!(*provider.created.borrow(), 1);
    }

    #[test]
    fn test_find_or_create_prefers_active_when_unnamed() {
        let provider = ScriptedProvider {
            active: Some(SessionId(3)),
            ..ScriptedProvider::default()
        };

        let id = find_or_create(&provider, &SessionOptions::default()).unwrap();
        assert_eq!(id, SessionId(3));
        assert_eq!(*provider.created.borrow(), 0);
    }

    #[test]
    fn test_find_or_create_creates_when_nothing_active() {
        let provider = ScriptedProvider::default();
        find_or_create(&provider, &SessionOptions::default()).unwrap();
        assert_eq!(*provider.created.borrow(), 1);
    }

    fn sh_options(name: Option<&str>) -> SessionOptions {
        SessionOptions {
            name: name.map(ToString::to_string),
            shell: Some("/bin/sh".to_string()),
            ..SessionOptions::default()
        }
    }

    #[test]
    fn test_shell_provider_named_reuse() {
        let provider = ShellSessionProvider::new("/bin/sh".to_string());

        let first = find_or_create(&provider, &sh_options(Some("runner"))).unwrap();
        let second = find_or_create(&provider, &sh_options(Some("runner"))).unwrap();
        assert_eq!(first, second);

        provider.send_text(first, "exit").unwrap();
    }

    #[test]
    fn test_shell_provider_close_handler_fires_once() {
        let provider = ShellSessionProvider::new("/bin/sh".to_string());
        let session = provider.create(&sh_options(None)).unwrap();

        let (sender, receiver) = mpsc::channel();
        provider
            .on_close(
                session,
                Box::new(move |p| {
                    let _ = sender.send(p.active().is_some());
                }),
            )
            .unwrap();

        provider.send_text(session, "exit").unwrap();

        let other_session_active = receiver
            .recv_timeout(Duration::from_secs(10))
            .expect("close handler did not fire");
        // The only session just closed, so nothing else is active.
        assert!(!other_session_active);
        assert!(receiver.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_shell_provider_send_to_closed_session_fails() {
        let provider = ShellSessionProvider::new("/bin/sh".to_string());
        let session = provider.create(&sh_options(None)).unwrap();

        let (sender, receiver) = mpsc::channel();
        provider
            .on_close(session, Box::new(move |_| drop(sender.send(()))))
            .unwrap();

        provider.send_text(session, "exit").unwrap();
        receiver
            .recv_timeout(Duration::from_secs(10))
            .expect("session did not close");

        assert!(matches!(
            provider.send_text(session, "echo late"),
            Err(Error::SessionUnavailable(_))
        ));
    }

    #[test]
    fn test_shell_provider_show_marks_active() {
        let provider = ShellSessionProvider::new("/bin/sh".to_string());
        let first = provider.create(&sh_options(Some("a"))).unwrap();
        let second = provider.create(&sh_options(Some("b"))).unwrap();
        assert_eq!(provider.active(), Some(second));

        provider.show(first).unwrap();
        assert_eq!(provider.active(), Some(first));

        provider.send_text(first, "exit").unwrap();
        provider.send_text(second, "exit").unwrap();
    }
}
